//! Terminal event polling.

use crate::utils::error::{Result, ReviewerError};
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, MouseEvent};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// No input within the tick rate; drives the spinner and result polling.
    Tick,
    Key(KeyEvent),
    Paste(String),
    Mouse(MouseEvent),
}

pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    /// Blocks for at most one tick. Returns `None` for events the app does
    /// not handle, such as focus changes.
    pub fn next(&self) -> Result<Option<Event>> {
        let ready = event::poll(self.tick_rate).map_err(|e| ReviewerError::TerminalError {
            message: format!("Failed to poll events: {}", e),
        })?;

        if !ready {
            return Ok(Some(Event::Tick));
        }

        let event = event::read().map_err(|e| ReviewerError::TerminalError {
            message: format!("Failed to read event: {}", e),
        })?;

        Ok(match event {
            CrosstermEvent::Key(key) => Some(Event::Key(key)),
            CrosstermEvent::Paste(text) => Some(Event::Paste(text)),
            CrosstermEvent::Mouse(mouse) => Some(Event::Mouse(mouse)),
            _ => None,
        })
    }
}
