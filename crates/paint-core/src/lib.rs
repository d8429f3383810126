//! # paint-core
//!
//! Shared library for Multiplayer Paint containing the datagram protocol codec
//! and the client-side session state that reconciles the inbound stream into a
//! canvas and a chat log.
//!
//! This crate performs no I/O.  It has no dependency on sockets, windows, or
//! input devices; the client crate wires those to it.
//!
//! # Architecture overview
//!
//! Multiplayer Paint lets several people draw on one shared canvas and chat
//! while they do it.  Every participant talks to a relay over UDP.  The relay
//! stamps each datagram with the sender's identity and fans it out to everyone,
//! including the sender.
//!
//! - **`protocol`** – The five commands and their byte layouts.  The
//!   client-to-relay shape and the relay-to-client shape differ, so each
//!   direction has its own type.
//!
//! - **`domain`** – The [`Session`](domain::Session): connection lifecycle,
//!   the ordered point sequence, the three-line log, and the selected palette
//!   colour.  It turns local intents into outbound commands and applies
//!   inbound commands, but never applies its own outbound commands.

pub mod domain;
pub mod protocol;

pub use domain::{ConnectionState, Intent, Log, Palette, Rgb, Session, SessionConfig};
pub use protocol::{
    codec::{decode_inbound, decode_outbound, encode_inbound, encode_outbound, ProtocolError},
    commands::{Command, Opcode, OutboundCommand, Point},
};
