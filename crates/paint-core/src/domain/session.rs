//! Client session state: the reconciled view of the shared canvas.
//!
//! The session is the only mutable state in the client.  It is fed from two
//! directions every tick:
//!
//! - **Local intents** ([`Session::originate`]) turn into outbound commands.
//!   They never touch the canvas directly.  A freshly drawn point shows up only
//!   once the relay echoes it back, so the local view and everyone else's view
//!   are built from the same stream.
//! - **Inbound commands** ([`Session::apply`]) mutate the point sequence and
//!   the log.
//!
//! # Connection lifecycle
//!
//! ```text
//! Disconnected ──start()──> AwaitingSync ──inbound / timeout──> Connected
//!                                ^                                  │
//!                                └──────────── Reset ───────────────┘
//! any ──shutdown()──> Disconnected (terminal)
//! ```
//!
//! The protocol has no acknowledgement; the client proceeds optimistically.
//! There is also no heartbeat, so a peer that vanishes without a Disconnect
//! is never noticed.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::log::Log;
use crate::domain::palette::{Palette, Rgb};
use crate::protocol::commands::{Command, OutboundCommand, Point};

/// Where the client is in its connection lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionState {
    /// Not started yet, or shut down.
    Disconnected,
    /// Connect sent; waiting for the relay's replay to start arriving.
    AwaitingSync,
    /// Inbound traffic seen, or the sync timeout elapsed.
    Connected,
}

/// A discrete input intent sampled from the input layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Left button held over `(x, y)`.
    Draw { x: u16, y: u16 },
    /// Right button held over `(x, y)`.
    Erase { x: u16, y: u16 },
    /// A chat line was submitted.
    Submit(String),
    /// The user asked to drop the local canvas and resync.
    Reset,
    /// Move the selected colour by `+1` or `-1`.
    CycleColor(i8),
}

/// What [`Session::apply`] did with a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// A line was added to the log.
    Logged,
    PointAdded,
    PointRemoved,
    /// Erase for a point that is not on the canvas.
    NoMatch,
    /// Draw with a colour index outside the palette.
    Rejected,
    /// The session is shut down.
    Ignored,
}

/// Tunables for a [`Session`].
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How long to stay in `AwaitingSync` without inbound traffic.
    pub sync_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            sync_timeout: Duration::from_millis(2000),
        }
    }
}

/// Serializable copy of everything the presentation layer draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub connection_state: ConnectionState,
    pub lines: Vec<String>,
    pub points: Vec<Point>,
    pub selected_color_index: u16,
    pub selected_color: Rgb,
}

/// The client's reconciled view of the session.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    state: ConnectionState,
    /// When the last Connect went out; drives the sync timeout.
    sync_started: Option<Instant>,
    points: Vec<Point>,
    log: Log,
    color_index: u16,
    shut_down: bool,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            state: ConnectionState::Disconnected,
            sync_started: None,
            points: Vec::new(),
            log: Log::new(),
            color_index: 0,
            shut_down: false,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────────

    /// Announces the client.  Returns the Connect to send.
    ///
    /// Calling `start` on a running session re-announces it, like a reset that
    /// keeps the canvas.
    pub fn start(&mut self, now: Instant) -> Option<OutboundCommand> {
        if self.shut_down {
            return None;
        }
        self.begin_sync(now);
        Some(OutboundCommand::Connect)
    }

    /// Promotes `AwaitingSync` to `Connected` once the sync timeout elapses.
    pub fn poll(&mut self, now: Instant) {
        if self.state != ConnectionState::AwaitingSync {
            return;
        }
        // A reset opens the window without a clock; the first poll stamps it.
        let started = *self.sync_started.get_or_insert(now);
        if now.saturating_duration_since(started) >= self.config.sync_timeout {
            debug!("no inbound traffic within {:?}", self.config.sync_timeout);
            self.transition(ConnectionState::Connected);
        }
    }

    /// Leaves the session for good.
    ///
    /// Returns the Disconnect to send the first time it is called on a started
    /// session; afterwards, or on a session that never started, returns `None`.
    pub fn shutdown(&mut self) -> Option<OutboundCommand> {
        if self.shut_down {
            return None;
        }
        self.shut_down = true;
        let was_started = self.state != ConnectionState::Disconnected;
        self.transition(ConnectionState::Disconnected);
        self.sync_started = None;
        was_started.then_some(OutboundCommand::Disconnect)
    }

    // ── Outbound ──────────────────────────────────────────────────────────────

    /// Turns a local intent into the command to send, if any.
    ///
    /// Draw and Erase are not applied locally; the echo from the relay does
    /// that.  Colour cycling is local only and never produces a command.
    pub fn originate(&mut self, intent: Intent) -> Option<OutboundCommand> {
        if self.shut_down {
            return None;
        }
        match intent {
            Intent::Draw { x, y } => Some(OutboundCommand::Draw(Point::new(x, y, self.color_index))),
            Intent::Erase { x, y } => Some(OutboundCommand::Erase { x, y }),
            Intent::Submit(text) => Some(OutboundCommand::Message { text }),
            Intent::Reset => {
                info!("reset requested; dropping {} local points", self.points.len());
                self.points.clear();
                // Before start(), a reset doubles as the first announce.
                Some(self.start_resync())
            }
            Intent::CycleColor(step) => {
                self.color_index = Palette::cycle(self.color_index, step);
                debug!("selected colour index {}", self.color_index);
                None
            }
        }
    }

    fn start_resync(&mut self) -> OutboundCommand {
        self.sync_started = None;
        self.transition(ConnectionState::AwaitingSync);
        OutboundCommand::Connect
    }

    // ── Inbound ───────────────────────────────────────────────────────────────

    /// Applies one command received from the relay.
    ///
    /// Any inbound command completes a pending sync.
    pub fn apply(&mut self, command: &Command) -> Applied {
        if self.shut_down {
            return Applied::Ignored;
        }
        if self.state == ConnectionState::AwaitingSync {
            self.transition(ConnectionState::Connected);
        }

        match command {
            Command::Connect { user } => {
                self.log.push(format!("{user} connected"));
                Applied::Logged
            }
            Command::Disconnect { user } => {
                self.log.push(format!("{user} disconnected"));
                Applied::Logged
            }
            Command::Message { user, text } => {
                self.log.push(format!("{user}: {text}"));
                Applied::Logged
            }
            Command::Draw { user, point } => {
                if !Palette::contains(point.color_index) {
                    debug!(
                        "dropping draw from {user}: colour index {} outside palette",
                        point.color_index
                    );
                    return Applied::Rejected;
                }
                self.points.push(*point);
                Applied::PointAdded
            }
            Command::Erase { point, .. } => match self.points.iter().position(|p| p == point) {
                Some(idx) => {
                    self.points.remove(idx);
                    Applied::PointRemoved
                }
                None => Applied::NoMatch,
            },
        }
    }

    // ── Read surface ──────────────────────────────────────────────────────────

    /// Log lines, oldest first.  At most three.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.log.iter()
    }

    pub fn log(&self) -> &Log {
        &self.log
    }

    /// Points in the order they arrived.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn selected_color_index(&self) -> u16 {
        self.color_index
    }

    pub fn selected_color(&self) -> Rgb {
        // color_index only ever moves through Palette::cycle
        Palette::get(self.color_index).unwrap_or(Rgb::new(0, 0, 0))
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.state
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            connection_state: self.state,
            lines: self.log.to_vec(),
            points: self.points.clone(),
            selected_color_index: self.color_index,
            selected_color: self.selected_color(),
        }
    }

    // ── Internals ─────────────────────────────────────────────────────────────

    fn begin_sync(&mut self, now: Instant) {
        self.sync_started = Some(now);
        self.transition(ConnectionState::AwaitingSync);
    }

    fn transition(&mut self, next: ConnectionState) {
        if self.state != next {
            info!("connection state {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
