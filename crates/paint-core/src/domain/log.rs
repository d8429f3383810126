//! Rolling status/chat log shown at the top of the canvas.

use std::collections::VecDeque;

/// Number of lines the log keeps.
pub const LOG_CAPACITY: usize = 3;

/// A fixed-capacity FIFO of display lines.
///
/// Lines are formatted before they are pushed; the log stores plain text.
/// Pushing onto a full log evicts the oldest line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Log {
    lines: VecDeque<String>,
    capacity: usize,
}

impl Log {
    /// Creates an empty log holding at most [`LOG_CAPACITY`] lines.
    pub fn new() -> Self {
        Self::with_capacity(LOG_CAPACITY)
    }

    /// Creates an empty log holding at most `capacity` lines.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends `line`, evicting the oldest line when the log is full.
    pub fn push(&mut self, line: impl Into<String>) {
        if self.capacity == 0 {
            return;
        }
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line.into());
    }

    /// Iterates the lines oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Copies the lines out, oldest first.
    pub fn to_vec(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Default for Log {
    fn default() -> Self {
        Self::new()
    }
}
