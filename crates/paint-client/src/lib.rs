//! paint-client library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does paint-client do?
//!
//! The client owns one [`Session`](paint_core::Session) and one UDP socket.
//! Once per frame it:
//!
//! 1. Turns the frame's input into at most a handful of outbound commands and
//!    sends each as a single non-blocking datagram.
//! 2. Drains every datagram waiting on the socket, decoding and applying each.
//! 3. Lets the session time out a pending sync.
//!
//! Rendering reads the session afterwards.  There is no network thread: all
//! socket work happens inside [`TickLoop::tick`](application::tick::TickLoop::tick).

/// Application layer: the per-frame tick loop.
pub mod application;

/// Infrastructure layer: transport, configuration, and console adapter.
pub mod infrastructure;
