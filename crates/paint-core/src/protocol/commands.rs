//! Multiplayer Paint command types.
//!
//! A command has two wire shapes.  The client sends an [`OutboundCommand`],
//! which carries no identity because the relay knows who sent the datagram.
//! The relay forwards a [`Command`] that has the sender identity inserted
//! right after the opcode.

use serde::{Deserialize, Serialize};

// ── Protocol constants ────────────────────────────────────────────────────────

/// Size of the opcode that starts every datagram.
pub const OPCODE_SIZE: usize = 2;

/// Default UDP port of the relay.
pub const DEFAULT_PORT: u16 = 5303;

// ── Opcodes ───────────────────────────────────────────────────────────────────

/// Two-byte big-endian tag identifying a command on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum Opcode {
    Connect = 0,
    Disconnect = 1,
    Draw = 2,
    Erase = 3,
    Message = 4,
}

impl TryFrom<u16> for Opcode {
    type Error = ();

    fn try_from(value: u16) -> Result<Self, ()> {
        match value {
            0 => Ok(Opcode::Connect),
            1 => Ok(Opcode::Disconnect),
            2 => Ok(Opcode::Draw),
            3 => Ok(Opcode::Erase),
            4 => Ok(Opcode::Message),
            _ => Err(()),
        }
    }
}

// ── Point ─────────────────────────────────────────────────────────────────────

/// A drawn pixel position with the palette index it was drawn in.
///
/// Equality is structural: two points are the same point only when all three
/// fields match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: u16,
    pub y: u16,
    pub color_index: u16,
}

impl Point {
    pub fn new(x: u16, y: u16, color_index: u16) -> Self {
        Self { x, y, color_index }
    }
}

// ── Relay-to-client commands ──────────────────────────────────────────────────

/// A command as delivered by the relay, attributed to its sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// `user` joined, or asked the relay to replay the canvas.
    Connect { user: String },
    /// `user` left.
    Disconnect { user: String },
    /// `user` added a point.
    Draw { user: String, point: Point },
    /// `user` removed a point.
    Erase { user: String, point: Point },
    /// `user` said `text`.
    Message { user: String, text: String },
}

impl Command {
    /// Returns the opcode this command is framed with.
    pub fn opcode(&self) -> Opcode {
        match self {
            Command::Connect { .. } => Opcode::Connect,
            Command::Disconnect { .. } => Opcode::Disconnect,
            Command::Draw { .. } => Opcode::Draw,
            Command::Erase { .. } => Opcode::Erase,
            Command::Message { .. } => Opcode::Message,
        }
    }

    /// Returns the identity the relay attributed this command to.
    pub fn user(&self) -> &str {
        match self {
            Command::Connect { user }
            | Command::Disconnect { user }
            | Command::Draw { user, .. }
            | Command::Erase { user, .. }
            | Command::Message { user, .. } => user,
        }
    }
}

// ── Client-to-relay commands ──────────────────────────────────────────────────

/// A command as sent by the client.
///
/// `Erase` carries coordinates only; the relay-to-client `Erase` carries a
/// colour index as well.  Both shapes are kept as observed on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutboundCommand {
    /// Announce this client, or request a fresh replay of the canvas.
    Connect,
    /// Leave the session.
    Disconnect,
    /// Add a point in the selected colour.
    Draw(Point),
    /// Remove the point under the pointer.
    Erase { x: u16, y: u16 },
    /// Send a chat line.
    Message { text: String },
}

impl OutboundCommand {
    /// Returns the opcode this command is framed with.
    pub fn opcode(&self) -> Opcode {
        match self {
            OutboundCommand::Connect => Opcode::Connect,
            OutboundCommand::Disconnect => Opcode::Disconnect,
            OutboundCommand::Draw(_) => Opcode::Draw,
            OutboundCommand::Erase { .. } => Opcode::Erase,
            OutboundCommand::Message { .. } => Opcode::Message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_try_from_accepts_all_known_values() {
        for op in [
            Opcode::Connect,
            Opcode::Disconnect,
            Opcode::Draw,
            Opcode::Erase,
            Opcode::Message,
        ] {
            assert_eq!(Opcode::try_from(op as u16), Ok(op));
        }
    }

    #[test]
    fn test_opcode_try_from_rejects_unknown_value() {
        assert_eq!(Opcode::try_from(5), Err(()));
        assert_eq!(Opcode::try_from(0xFFFF), Err(()));
    }

    #[test]
    fn test_point_equality_is_structural() {
        assert_eq!(Point::new(1, 2, 3), Point::new(1, 2, 3));
        assert_ne!(Point::new(1, 2, 3), Point::new(1, 2, 4));
    }

    #[test]
    fn test_command_user_returns_sender_for_every_variant() {
        let p = Point::new(0, 0, 0);
        let commands = [
            Command::Connect { user: "a".into() },
            Command::Disconnect { user: "a".into() },
            Command::Draw { user: "a".into(), point: p },
            Command::Erase { user: "a".into(), point: p },
            Command::Message { user: "a".into(), text: "hi".into() },
        ];
        for cmd in &commands {
            assert_eq!(cmd.user(), "a");
        }
    }

    #[test]
    fn test_outbound_and_inbound_share_opcodes() {
        assert_eq!(OutboundCommand::Connect.opcode(), Command::Connect { user: String::new() }.opcode());
        assert_eq!(
            OutboundCommand::Erase { x: 1, y: 1 }.opcode(),
            Command::Erase { user: String::new(), point: Point::new(1, 1, 0) }.opcode()
        );
    }
}
