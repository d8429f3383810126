//! Domain layer: the client's reconciled view of the shared canvas.
//!
//! Nothing in here touches a socket.  [`Session`] consumes decoded
//! [`Command`](crate::protocol::Command)s and produces
//! [`OutboundCommand`](crate::protocol::OutboundCommand)s; the caller moves the
//! bytes.

pub mod log;
pub mod palette;
pub mod session;

pub use log::{Log, LOG_CAPACITY};
pub use palette::{Palette, Rgb, PALETTE_SIZE};
pub use session::{Applied, ConnectionState, Intent, Session, SessionConfig, SessionSnapshot};
