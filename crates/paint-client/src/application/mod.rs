//! Application layer for the paint client.
//!
//! - [`tick`]: samples an [`InputFrame`](tick::InputFrame), sends the
//!   resulting commands, and drains the transport into the session.

pub mod tick;
