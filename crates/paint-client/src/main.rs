//! Multiplayer Paint client entry point.
//!
//! Wires together the UDP transport, the session, and the console front-end,
//! then paces the tick loop on a single-threaded Tokio runtime.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ ClientConfig       -- config file, then CLI/env overrides
//!  └─ UdpTransport       -- connected, non-blocking socket
//!  └─ TickLoop::start()  -- Connect
//!  └─ select! loop
//!       ├─ interval tick  -> TickLoop::tick(next queued frame) -> render
//!       ├─ stdin line     -> parse_line -> queue a frame
//!       └─ Ctrl-C / /quit -> TickLoop::shutdown() (Disconnect), exit
//! ```
//!
//! The socket is only touched inside `TickLoop`, on the runtime's one thread.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use paint_client::application::tick::{InputFrame, TickLoop};
use paint_client::infrastructure::console::{parse_line, ConsoleInput, ConsoleRenderer};
use paint_client::infrastructure::network::UdpTransport;
use paint_client::infrastructure::storage::{load_config, load_config_from, ClientConfig};
use paint_core::Session;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Multiplayer Paint console client.
///
/// Connects to a relay over UDP and shares a canvas and chat log with
/// everyone else connected to it.
#[derive(Debug, Parser)]
#[command(
    name = "paint-client",
    about = "Console client for Multiplayer Paint",
    version
)]
struct Cli {
    /// Relay host name or IP address.
    #[arg(long, env = "PAINT_HOST")]
    host: Option<String>,

    /// Relay UDP port.
    #[arg(long, env = "PAINT_PORT")]
    port: Option<u16>,

    /// Path to a config file.  Defaults to the platform config directory.
    #[arg(long, env = "PAINT_CONFIG")]
    config: Option<PathBuf>,

    /// Ticks per second.
    #[arg(long)]
    tick_rate: Option<u32>,
}

impl Cli {
    /// Loads the config file and applies command-line overrides on top.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed, or if the
    /// merged result is invalid.
    fn into_client_config(self) -> anyhow::Result<ClientConfig> {
        let mut config = match &self.config {
            Some(path) => load_config_from(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => load_config().context("loading config")?,
        };

        if let Some(host) = self.host {
            config.network.host = host;
        }
        if let Some(port) = self.port {
            config.network.port = port;
        }
        if let Some(rate) = self.tick_rate {
            config.session.tick_rate_hz = rate;
        }

        config.validate()?;
        Ok(config)
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Cli::parse().into_client_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.session.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(
        "Multiplayer Paint client starting; relay {}:{} at {} Hz",
        config.network.host, config.network.port, config.session.tick_rate_hz
    );

    let transport = UdpTransport::connect(&config.network.host, config.network.port)
        .with_context(|| {
            format!(
                "connecting to relay {}:{}",
                config.network.host, config.network.port
            )
        })?;
    let session = Session::new(config.session_config());
    let mut tick_loop = TickLoop::new(transport, session, config.network.recv_buffer_size);
    tick_loop.start(Instant::now());

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut pending: VecDeque<InputFrame> = VecDeque::new();
    let mut renderer = ConsoleRenderer::new();
    let mut stdout = std::io::stdout();

    let mut interval = tokio::time::interval(config.tick_interval());
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                // One console line drives one frame.
                let frame = pending.pop_front().unwrap_or_default();
                tick_loop.tick(&frame, Instant::now());
                if let Err(e) = renderer.render(tick_loop.session(), &mut stdout) {
                    warn!("failed to write to stdout: {e}");
                }
            }
            line = stdin.next_line(), if stdin_open => match line {
                Ok(Some(line)) => match parse_line(&line) {
                    Some(ConsoleInput::Quit) => break,
                    Some(ConsoleInput::Frame(frame)) => pending.push_back(frame),
                    None => {}
                },
                Ok(None) => {
                    info!("stdin closed; still listening until Ctrl-C");
                    stdin_open = false;
                }
                Err(e) => {
                    warn!("stdin read error: {e}");
                    stdin_open = false;
                }
            },
            _ = &mut ctrl_c => {
                info!("shutdown signal received");
                break;
            }
        }
    }

    if !tick_loop.shutdown() {
        warn!("disconnect could not be sent");
    }
    info!("Multiplayer Paint client stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
