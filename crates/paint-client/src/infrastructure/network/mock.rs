//! In-memory transport for tests.
//!
//! `ScriptedTransport` replaces the UDP socket with two queues: datagrams
//! queued with [`ScriptedTransport::push_inbound`] are handed out by
//! `try_recv` in order, and everything passed to `send` is recorded in
//! [`ScriptedTransport::sent`].
//!
//! # Usage in tests
//!
//! ```ignore
//! let mut transport = ScriptedTransport::new();
//! transport.push_inbound(encode_inbound(&Command::Connect { user: "alice".into() }));
//! let mut tick_loop = TickLoop::new(transport, Session::default(), DEFAULT_RECV_BUFFER);
//! tick_loop.tick(&InputFrame::default(), Instant::now());
//! assert_eq!(tick_loop.session().lines().count(), 1);
//! ```
//!
//! Set `fail_sends = true` to make every send fail, which simulates an
//! unreachable network.

use std::collections::VecDeque;
use std::io;

use super::{Transport, TransportError};

/// A transport that records sends and replays queued datagrams.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    /// Datagrams waiting to be received, oldest first.
    pub inbound: VecDeque<Vec<u8>>,
    /// Every datagram passed to `send`, in order.
    pub sent: Vec<Vec<u8>>,
    /// When `true`, `send` returns an error instead of recording.
    pub fail_sends: bool,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a datagram for a later `try_recv`.
    pub fn push_inbound(&mut self, datagram: impl Into<Vec<u8>>) {
        self.inbound.push_back(datagram.into());
    }
}

impl Transport for ScriptedTransport {
    fn send(&mut self, datagram: &[u8]) -> Result<(), TransportError> {
        if self.fail_sends {
            return Err(TransportError::Send(io::Error::new(
                io::ErrorKind::NetworkUnreachable,
                "scripted failure",
            )));
        }
        self.sent.push(datagram.to_vec());
        Ok(())
    }

    fn try_recv(&mut self, buf: &mut [u8]) -> Result<Option<usize>, TransportError> {
        let Some(datagram) = self.inbound.pop_front() else {
            return Ok(None);
        };
        // Like UDP: bytes past the buffer are lost.
        let len = datagram.len().min(buf.len());
        buf[..len].copy_from_slice(&datagram[..len]);
        Ok(Some(len))
    }
}
