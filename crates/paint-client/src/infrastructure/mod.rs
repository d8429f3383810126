//! Infrastructure layer for the paint client.
//!
//! Contains the adapters between the application layer and the outside world:
//! - `network`: the [`Transport`](network::Transport) seam, a non-blocking UDP
//!   implementation, and an in-memory mock.
//! - `storage`: TOML configuration.
//! - `console`: stdin parsing and stdout rendering for the headless binary.

pub mod console;
pub mod network;
pub mod storage;
