//! TickLoop: one iteration of the client per rendered frame.
//!
//! Each [`TickLoop::tick`] does the same three things, in order:
//!
//! 1. Feeds the frame's intents to the session and sends whatever commands
//!    come back.  Discrete intents (colour, reset, chat) go first, then the
//!    mouse, which emits at most one Draw or Erase.
//! 2. Drains the transport until it reports an empty queue, so a burst of any
//!    size is absorbed within the tick.
//! 3. Lets the session time out a pending sync.
//!
//! Sends are fire-and-forget.  A failed send is logged and counted; the tick
//! carries on, because the canvas must stay usable while the relay is away.

use std::time::Instant;

use paint_core::domain::Applied;
use paint_core::{decode_inbound, encode_outbound, Intent, OutboundCommand, Session};
use tracing::{debug, trace, warn};

use crate::infrastructure::network::Transport;

/// Input sampled for one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputFrame {
    /// Pointer position in canvas pixels.
    pub pointer: (u16, u16),
    /// Left button held: draw at the pointer.
    pub left_held: bool,
    /// Right button held: erase at the pointer.  Ignored while left is held.
    pub right_held: bool,
    /// A chat line submitted this frame.
    pub submitted: Option<String>,
    pub reset: bool,
    /// Colour wheel notches this frame; each notch cycles one entry.
    pub color_step: i8,
}

impl InputFrame {
    /// Converts window coordinates to canvas pixels, clamping to `u16`.
    pub fn pointer_from_window(x: f32, y: f32) -> (u16, u16) {
        let clamp = |v: f32| {
            if v.is_nan() {
                0
            } else {
                v.clamp(0.0, f32::from(u16::MAX)) as u16
            }
        };
        (clamp(x), clamp(y))
    }

    /// Translates the frame into session intents, discrete ones first.
    pub fn intents(&self) -> Vec<Intent> {
        let mut intents = Vec::new();
        let notch = self.color_step.signum();
        for _ in 0..self.color_step.unsigned_abs() {
            intents.push(Intent::CycleColor(notch));
        }
        if self.reset {
            intents.push(Intent::Reset);
        }
        if let Some(text) = &self.submitted {
            intents.push(Intent::Submit(text.clone()));
        }
        let (x, y) = self.pointer;
        if self.left_held {
            intents.push(Intent::Draw { x, y });
        } else if self.right_held {
            intents.push(Intent::Erase { x, y });
        }
        intents
    }
}

/// Counters for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub sent: usize,
    pub send_failures: usize,
    /// Inbound commands decoded and applied.
    pub applied: usize,
    /// Inbound commands decoded but refused by the session.
    pub rejected: usize,
    /// Inbound datagrams dropped as undecodable.
    pub discarded: usize,
}

/// Owns the session and the transport and drives both once per frame.
pub struct TickLoop<T: Transport> {
    transport: T,
    session: Session,
    recv_buf: Vec<u8>,
}

impl<T: Transport> TickLoop<T> {
    /// Creates a loop reading datagrams of up to `recv_buffer_size` bytes.
    pub fn new(transport: T, session: Session, recv_buffer_size: usize) -> Self {
        Self {
            transport,
            session,
            recv_buf: vec![0u8; recv_buffer_size.max(1)],
        }
    }

    /// Announces the client to the relay.  Returns `true` if Connect was sent.
    pub fn start(&mut self, now: Instant) -> bool {
        match self.session.start(now) {
            Some(cmd) => self.send(&cmd),
            None => false,
        }
    }

    /// Runs one frame.
    pub fn tick(&mut self, input: &InputFrame, now: Instant) -> TickReport {
        let mut report = TickReport::default();

        for intent in input.intents() {
            if let Some(cmd) = self.session.originate(intent) {
                if self.send(&cmd) {
                    report.sent += 1;
                } else {
                    report.send_failures += 1;
                }
            }
        }

        self.drain(&mut report);
        self.session.poll(now);

        if report.applied > 0 || report.rejected > 0 || report.discarded > 0 {
            trace!(
                "tick: sent={} applied={} rejected={} discarded={}",
                report.sent,
                report.applied,
                report.rejected,
                report.discarded
            );
        }
        report
    }

    /// Sends a best-effort Disconnect.  Returns `true` if it went out.
    ///
    /// Whether it arrives is not checked; the caller drops the transport next.
    pub fn shutdown(&mut self) -> bool {
        match self.session.shutdown() {
            Some(cmd) => self.send(&cmd),
            None => false,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    fn send(&mut self, cmd: &OutboundCommand) -> bool {
        let bytes = encode_outbound(cmd);
        match self.transport.send(&bytes) {
            Ok(()) => true,
            Err(e) => {
                warn!("dropping outbound {:?}: {e}", cmd.opcode());
                false
            }
        }
    }

    fn drain(&mut self, report: &mut TickReport) {
        loop {
            let len = match self.transport.try_recv(&mut self.recv_buf) {
                Ok(Some(len)) => len,
                Ok(None) => break,
                Err(e) => {
                    warn!("receive failed, ending drain for this tick: {e}");
                    break;
                }
            };
            match decode_inbound(&self.recv_buf[..len]) {
                Ok(cmd) => match self.session.apply(&cmd) {
                    Applied::Rejected | Applied::Ignored => report.rejected += 1,
                    _ => report.applied += 1,
                },
                Err(e) => {
                    debug!("discarding {len}-byte datagram: {e}");
                    report.discarded += 1;
                }
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
