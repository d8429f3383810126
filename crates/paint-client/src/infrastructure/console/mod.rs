//! Console adapter for the headless client binary.
//!
//! Stands in for a window: stdin lines become [`InputFrame`]s, and the log is
//! reprinted to stdout whenever it changes.
//!
//! | Line            | Frame                                   |
//! |-----------------|-----------------------------------------|
//! | `/draw X Y`     | left button held at `(X, Y)` for a tick |
//! | `/erase X Y`    | right button held at `(X, Y)`           |
//! | `/color +`/`-`  | colour cycle                            |
//! | `/reset`        | reset                                   |
//! | `/quit`         | leave                                   |
//! | anything else   | chat line                               |

use std::io::{self, Write};

use paint_core::Session;

use crate::application::tick::InputFrame;

/// One parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleInput {
    Frame(InputFrame),
    Quit,
}

/// Parses a console line.  Blank lines yield `None`.
pub fn parse_line(line: &str) -> Option<ConsoleInput> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut words = trimmed.split_whitespace();
    let frame = match (words.next(), words.next(), words.next(), words.next()) {
        (Some("/quit"), None, ..) => return Some(ConsoleInput::Quit),
        (Some("/reset"), None, ..) => Some(InputFrame { reset: true, ..Default::default() }),
        (Some("/color"), Some("+"), None, _) => Some(InputFrame { color_step: 1, ..Default::default() }),
        (Some("/color"), Some("-"), None, _) => Some(InputFrame { color_step: -1, ..Default::default() }),
        (Some(cmd @ ("/draw" | "/erase")), Some(x), Some(y), None) => {
            match (x.parse::<u16>(), y.parse::<u16>()) {
                (Ok(x), Ok(y)) => Some(InputFrame {
                    pointer: (x, y),
                    left_held: cmd == "/draw",
                    right_held: cmd == "/erase",
                    ..Default::default()
                }),
                _ => None,
            }
        }
        _ => None,
    };

    Some(ConsoleInput::Frame(frame.unwrap_or_else(|| InputFrame {
        submitted: Some(trimmed.to_string()),
        ..Default::default()
    })))
}

/// Prints the session log whenever it changes.
#[derive(Debug, Default)]
pub struct ConsoleRenderer {
    last_lines: Vec<String>,
    last_point_count: usize,
}

impl ConsoleRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes the log to `out` if it differs from the last render.
    ///
    /// Returns `true` if anything was written.
    pub fn render(&mut self, session: &Session, out: &mut impl Write) -> io::Result<bool> {
        let points = session.points().len();
        if points != self.last_point_count {
            tracing::debug!("canvas now holds {points} points");
            self.last_point_count = points;
        }

        let lines = session.log().to_vec();
        if lines == self.last_lines {
            return Ok(false);
        }
        writeln!(out, "── colour {} · {} points ──", session.selected_color_index(), points)?;
        for line in &lines {
            writeln!(out, "{line}")?;
        }
        out.flush()?;
        self.last_lines = lines;
        Ok(true)
    }
}
