//! Binary codec for Multiplayer Paint datagrams.
//!
//! Client to relay:
//! ```text
//! Connect     [op:2]
//! Disconnect  [op:2]
//! Draw        [op:2][x:2][y:2][color:2]
//! Erase       [op:2][x:2][y:2]
//! Message     [op:2][text\0]
//! ```
//!
//! Relay to client (sender identity inserted after the opcode):
//! ```text
//! Connect     [op:2][user\0]
//! Disconnect  [op:2][user\0]
//! Draw        [op:2][user\0][x:2][y:2][color:2]
//! Erase       [op:2][user\0][x:2][y:2][color:2]
//! Message     [op:2][user\0][text\0]
//! ```
//!
//! All integers are big-endian `u16`.  Strings have no length prefix; a
//! missing terminator means the string runs to the end of the datagram.
//! Bytes that are not valid UTF-8 decode to U+FFFD rather than failing.
//! Trailing bytes after the last field are ignored.

use crate::protocol::commands::{Command, Opcode, OutboundCommand, Point, OPCODE_SIZE};
use thiserror::Error;

/// Errors that can occur while decoding a datagram.
///
/// Every variant means "no applicable command": the caller drops the datagram.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    /// The datagram is shorter than the layout requires.
    #[error("insufficient data: need at least {needed} bytes, got {available}")]
    InsufficientData { needed: usize, available: usize },

    /// The opcode is not one of the five known values.
    #[error("unknown opcode: 0x{0:04X}")]
    UnknownOpcode(u16),
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Encodes a client-to-relay command.
///
/// # Examples
///
/// ```rust
/// use paint_core::protocol::{encode_outbound, OutboundCommand};
///
/// assert_eq!(encode_outbound(&OutboundCommand::Connect), vec![0x00, 0x00]);
/// ```
pub fn encode_outbound(cmd: &OutboundCommand) -> Vec<u8> {
    let mut buf = Vec::with_capacity(8);
    write_u16(&mut buf, cmd.opcode() as u16);
    match cmd {
        OutboundCommand::Connect | OutboundCommand::Disconnect => {}
        OutboundCommand::Draw(point) => write_point(&mut buf, point),
        OutboundCommand::Erase { x, y } => {
            write_u16(&mut buf, *x);
            write_u16(&mut buf, *y);
        }
        OutboundCommand::Message { text } => write_cstring(&mut buf, text),
    }
    buf
}

/// Decodes a client-to-relay datagram.
///
/// This is the relay's view of the traffic; the client uses it to inspect
/// what it sent.
///
/// # Errors
///
/// Returns [`ProtocolError`] if the datagram is truncated or has an unknown
/// opcode.
pub fn decode_outbound(bytes: &[u8]) -> Result<OutboundCommand, ProtocolError> {
    let (opcode, payload) = split_opcode(bytes)?;
    match opcode {
        Opcode::Connect => Ok(OutboundCommand::Connect),
        Opcode::Disconnect => Ok(OutboundCommand::Disconnect),
        Opcode::Draw => read_point(payload, 0).map(OutboundCommand::Draw),
        Opcode::Erase => {
            let x = read_u16(payload, 0)?;
            let y = read_u16(payload, 2)?;
            Ok(OutboundCommand::Erase { x, y })
        }
        Opcode::Message => {
            let (text, _) = read_cstring(payload, 0);
            Ok(OutboundCommand::Message { text })
        }
    }
}

/// Encodes a relay-to-client command, identity included.
///
/// The client never sends this shape; it exists for relays and test fixtures.
pub fn encode_inbound(cmd: &Command) -> Vec<u8> {
    let mut buf = Vec::with_capacity(16);
    write_u16(&mut buf, cmd.opcode() as u16);
    write_cstring(&mut buf, cmd.user());
    match cmd {
        Command::Connect { .. } | Command::Disconnect { .. } => {}
        Command::Draw { point, .. } | Command::Erase { point, .. } => write_point(&mut buf, point),
        Command::Message { text, .. } => write_cstring(&mut buf, text),
    }
    buf
}

/// Decodes a relay-to-client datagram.
///
/// No semantic validation happens here: coordinates and colour indices are
/// returned as found.
///
/// # Errors
///
/// Returns [`ProtocolError`] if the datagram is truncated or has an unknown
/// opcode.
///
/// # Examples
///
/// ```rust
/// use paint_core::protocol::{decode_inbound, Command};
///
/// let bytes = [0x00, 0x00, b'a', b'l', b'i', b'c', b'e', 0x00];
/// assert_eq!(
///     decode_inbound(&bytes).unwrap(),
///     Command::Connect { user: "alice".to_string() }
/// );
/// ```
pub fn decode_inbound(bytes: &[u8]) -> Result<Command, ProtocolError> {
    let (opcode, payload) = split_opcode(bytes)?;
    let (user, off) = read_cstring(payload, 0);
    match opcode {
        Opcode::Connect => Ok(Command::Connect { user }),
        Opcode::Disconnect => Ok(Command::Disconnect { user }),
        Opcode::Draw => {
            let point = read_point(payload, off)?;
            Ok(Command::Draw { user, point })
        }
        Opcode::Erase => {
            let point = read_point(payload, off)?;
            Ok(Command::Erase { user, point })
        }
        Opcode::Message => {
            let (text, _) = read_cstring(payload, off);
            Ok(Command::Message { user, text })
        }
    }
}

// ── Framing helpers ───────────────────────────────────────────────────────────

fn split_opcode(bytes: &[u8]) -> Result<(Opcode, &[u8]), ProtocolError> {
    let raw = read_u16(bytes, 0)?;
    let opcode = Opcode::try_from(raw).map_err(|_| ProtocolError::UnknownOpcode(raw))?;
    Ok((opcode, &bytes[OPCODE_SIZE..]))
}

fn write_u16(buf: &mut Vec<u8>, value: u16) {
    buf.extend_from_slice(&value.to_be_bytes());
}

fn write_point(buf: &mut Vec<u8>, point: &Point) {
    write_u16(buf, point.x);
    write_u16(buf, point.y);
    write_u16(buf, point.color_index);
}

/// Writes `s` up to its first NUL, then a single terminating NUL.
fn write_cstring(buf: &mut Vec<u8>, s: &str) {
    let bytes = s.as_bytes();
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    buf.extend_from_slice(&bytes[..end]);
    buf.push(0x00);
}

fn read_u16(buf: &[u8], offset: usize) -> Result<u16, ProtocolError> {
    if buf.len() < offset + 2 {
        return Err(ProtocolError::InsufficientData {
            needed: offset + 2,
            available: buf.len(),
        });
    }
    Ok(u16::from_be_bytes([buf[offset], buf[offset + 1]]))
}

fn read_point(buf: &[u8], offset: usize) -> Result<Point, ProtocolError> {
    let x = read_u16(buf, offset)?;
    let y = read_u16(buf, offset + 2)?;
    let color_index = read_u16(buf, offset + 4)?;
    Ok(Point { x, y, color_index })
}

/// Reads a NUL-terminated string starting at `offset`, decoding it lossily.
///
/// Returns the string and the offset just past its terminator (or the buffer
/// length when the terminator is missing).
fn read_cstring(buf: &[u8], offset: usize) -> (String, usize) {
    let rest = buf.get(offset..).unwrap_or_default();
    let (raw, next) = match rest.iter().position(|&b| b == 0) {
        Some(nul) => (&rest[..nul], offset + nul + 1),
        None => (rest, buf.len()),
    };
    // Identities are opaque to the relay; invalid UTF-8 is replaced, not rejected.
    (String::from_utf8_lossy(raw).into_owned(), next)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
