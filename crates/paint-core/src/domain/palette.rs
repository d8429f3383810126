//! The shared eight-colour palette.
//!
//! Colours never travel on the wire; only their index does, so every
//! participant must agree on this table.

use serde::{Deserialize, Serialize};

/// Number of palette entries.
pub const PALETTE_SIZE: usize = 8;

/// An opaque 8-bit-per-channel colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Black, gray, red, green, blue, yellow, fuchsia, cyan.
const COLORS: [Rgb; PALETTE_SIZE] = [
    Rgb::new(0x00, 0x00, 0x00),
    Rgb::new(0x80, 0x80, 0x80),
    Rgb::new(0xFF, 0x00, 0x00),
    Rgb::new(0x00, 0xFF, 0x00),
    Rgb::new(0x00, 0x00, 0xFF),
    Rgb::new(0xFF, 0xFF, 0x00),
    Rgb::new(0xFF, 0x00, 0xFF),
    Rgb::new(0x00, 0xFF, 0xFF),
];

/// Lookup and cycling over the fixed palette.
pub struct Palette;

impl Palette {
    /// Returns the colour at `index`, or `None` if it is outside the palette.
    pub fn get(index: u16) -> Option<Rgb> {
        COLORS.get(usize::from(index)).copied()
    }

    /// Returns `true` if `index` names a palette entry.
    pub fn contains(index: u16) -> bool {
        usize::from(index) < PALETTE_SIZE
    }

    /// Steps `index` by `step` entries, wrapping at both ends.
    pub fn cycle(index: u16, step: i8) -> u16 {
        let len = PALETTE_SIZE as i32;
        (i32::from(index) + i32::from(step)).rem_euclid(len) as u16
    }
}
