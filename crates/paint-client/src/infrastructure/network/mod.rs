//! Network infrastructure for the client application.
//!
//! The client talks to the relay over one connected, non-blocking UDP socket.
//! Nothing here blocks: an empty receive queue is reported as `Ok(None)`, which
//! is how the tick loop knows the drain is finished.
//!
//! Architecture:
//! - [`Transport`] is the seam the tick loop is written against.
//! - [`UdpTransport`] is the real socket.
//! - [`mock::ScriptedTransport`] is an in-memory queue for tests.

pub mod mock;

use std::io::ErrorKind;
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};

use thiserror::Error;
use tracing::{debug, info};

/// Largest datagram the client will read; longer ones are truncated by the OS.
pub const DEFAULT_RECV_BUFFER: usize = 65536;

/// Errors that can occur in the client network layer.
#[derive(Debug, Error)]
pub enum TransportError {
    /// `host:port` did not resolve to any address.
    #[error("could not resolve relay address {host}:{port}")]
    Resolve {
        host: String,
        port: u16,
        #[source]
        source: Option<std::io::Error>,
    },
    /// The local socket could not be bound.
    #[error("failed to bind local UDP socket on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    /// The socket could not be connected to the relay or switched to non-blocking.
    #[error("failed to connect UDP socket to {addr}: {source}")]
    Connect {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    /// A datagram could not be sent.
    #[error("send failed: {0}")]
    Send(#[source] std::io::Error),
    /// Receiving failed for a reason other than an empty queue.
    #[error("recv failed: {0}")]
    Recv(#[source] std::io::Error),
}

/// A non-blocking datagram transport bound to a single peer.
#[cfg_attr(test, mockall::automock)]
pub trait Transport {
    /// Sends one datagram.  Never blocks.
    fn send(&mut self, datagram: &[u8]) -> Result<(), TransportError>;

    /// Receives one datagram into `buf`.
    ///
    /// Returns `Ok(Some(len))` for a datagram, `Ok(None)` when nothing is
    /// waiting.
    fn try_recv(&mut self, buf: &mut [u8]) -> Result<Option<usize>, TransportError>;
}

/// A connected, non-blocking UDP socket.
#[derive(Debug)]
pub struct UdpTransport {
    socket: UdpSocket,
    peer: SocketAddr,
}

impl UdpTransport {
    /// Resolves `host:port`, binds an ephemeral local port, and connects to it.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if resolution, binding, or connecting fails.
    pub fn connect(host: &str, port: u16) -> Result<Self, TransportError> {
        let resolve_err = |source| TransportError::Resolve {
            host: host.to_string(),
            port,
            source,
        };
        let peer = (host, port)
            .to_socket_addrs()
            .map_err(|e| resolve_err(Some(e)))?
            .next()
            .ok_or_else(|| resolve_err(None))?;

        let local: SocketAddr = if peer.is_ipv4() {
            SocketAddr::from(([0, 0, 0, 0], 0))
        } else {
            SocketAddr::from(([0u16; 8], 0))
        };
        let socket =
            UdpSocket::bind(local).map_err(|source| TransportError::Bind { addr: local, source })?;
        socket
            .connect(peer)
            .and_then(|()| socket.set_nonblocking(true))
            .map_err(|source| TransportError::Connect { addr: peer, source })?;

        info!("UDP socket {:?} connected to relay {peer}", socket.local_addr().ok());
        Ok(Self { socket, peer })
    }

    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.socket.local_addr().ok()
    }
}

impl Transport for UdpTransport {
    fn send(&mut self, datagram: &[u8]) -> Result<(), TransportError> {
        let sent = self.socket.send(datagram).map_err(TransportError::Send)?;
        if sent != datagram.len() {
            debug!("short send: {sent} of {} bytes", datagram.len());
        }
        Ok(())
    }

    fn try_recv(&mut self, buf: &mut [u8]) -> Result<Option<usize>, TransportError> {
        match self.socket.recv(buf) {
            Ok(len) => Ok(Some(len)),
            Err(e) if e.kind() == ErrorKind::WouldBlock => Ok(None),
            Err(e) => Err(TransportError::Recv(e)),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn fake_relay() -> UdpSocket {
        let relay = UdpSocket::bind("127.0.0.1:0").expect("bind relay");
        relay
            .set_read_timeout(Some(Duration::from_secs(2)))
            .expect("set timeout");
        relay
    }

    fn recv_within(transport: &mut UdpTransport, buf: &mut [u8]) -> Option<usize> {
        let deadline = Instant::now() + Duration::from_secs(2);
        while Instant::now() < deadline {
            if let Ok(Some(n)) = transport.try_recv(buf) {
                return Some(n);
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        None
    }

    #[test]
    fn test_try_recv_on_empty_socket_returns_none() {
        // Arrange
        let relay = fake_relay();
        let port = relay.local_addr().unwrap().port();
        let mut transport = UdpTransport::connect("127.0.0.1", port).expect("connect");

        // Act
        let mut buf = [0u8; 64];
        let result = transport.try_recv(&mut buf);

        // Assert
        assert!(matches!(result, Ok(None)));
    }

    #[test]
    fn test_send_reaches_connected_peer() {
        let relay = fake_relay();
        let port = relay.local_addr().unwrap().port();
        let mut transport = UdpTransport::connect("127.0.0.1", port).expect("connect");

        transport.send(&[0x00, 0x00]).expect("send");

        let mut buf = [0u8; 64];
        let (len, from) = relay.recv_from(&mut buf).expect("relay receives");
        assert_eq!(&buf[..len], &[0x00, 0x00]);
        assert_eq!(Some(from.port()), transport.local_addr().map(|a| a.port()));
    }

    #[test]
    fn test_reply_from_peer_is_received() {
        let relay = fake_relay();
        let port = relay.local_addr().unwrap().port();
        let mut transport = UdpTransport::connect("127.0.0.1", port).expect("connect");
        transport.send(&[0x00, 0x00]).expect("send");

        let mut buf = [0u8; 64];
        let (_, from) = relay.recv_from(&mut buf).expect("relay receives");
        relay.send_to(&[0x00, 0x00, b'a', 0x00], from).expect("relay replies");

        let len = recv_within(&mut transport, &mut buf).expect("reply arrives");
        assert_eq!(&buf[..len], &[0x00, 0x00, b'a', 0x00]);
    }

    #[test]
    fn test_connect_reports_peer_address() {
        let relay = fake_relay();
        let port = relay.local_addr().unwrap().port();
        let transport = UdpTransport::connect("127.0.0.1", port).expect("connect");
        assert_eq!(transport.peer(), SocketAddr::from(([127, 0, 0, 1], port)));
    }
}
