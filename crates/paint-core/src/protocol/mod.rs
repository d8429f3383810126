pub mod codec;
pub mod commands;

pub use codec::{decode_inbound, decode_outbound, encode_inbound, encode_outbound, ProtocolError};
pub use commands::{Command, Opcode, OutboundCommand, Point};
