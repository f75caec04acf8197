//! Main loop of the review screen.

use crate::core::controller::{ReviewController, ReviewResult};
use crate::domain::ports::ReviewService;
use crate::tui::{App, EventHandler};
use crate::utils::error::{Result, ReviewerError};
use crossterm::{
    event::{
        DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use tokio::sync::mpsc;

const TICK_RATE_MS: u64 = 100;

/// Raw mode, alternate screen, mouse capture and bracketed paste for as long
/// as it lives. Restores the terminal on drop, including on error paths.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    keyboard_enhanced: bool,
}

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().map_err(|e| terminal_error("Failed to enable raw mode", e))?;

        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste
        )
        .map_err(|e| terminal_error("Failed to setup terminal", e))?;

        // Lets terminals that support it report Ctrl+Enter distinctly.
        let keyboard_enhanced = matches!(supports_keyboard_enhancement(), Ok(true));
        if keyboard_enhanced {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
            )
            .map_err(|e| terminal_error("Failed to enable keyboard enhancement", e))?;
        }

        let terminal = Terminal::new(CrosstermBackend::new(stdout))
            .map_err(|e| terminal_error("Failed to create terminal", e))?;

        Ok(Self {
            terminal,
            keyboard_enhanced,
        })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.keyboard_enhanced {
            let _ = execute!(self.terminal.backend_mut(), PopKeyboardEnhancementFlags);
        }
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        let _ = self.terminal.show_cursor();
    }
}

fn terminal_error(context: &str, e: io::Error) -> ReviewerError {
    ReviewerError::TerminalError {
        message: format!("{}: {}", context, e),
    }
}

/// Runs the editor until the user quits. Review requests run as tokio tasks,
/// so this must be called from within a runtime.
pub fn run_tui<S: ReviewService + ?Sized + 'static>(
    controller: ReviewController<S>,
    endpoint: String,
) -> Result<()> {
    let (results_tx, mut results_rx) = mpsc::unbounded_channel::<ReviewResult>();
    let mut app = App::new(controller, endpoint, results_tx);
    let events = EventHandler::new(TICK_RATE_MS);

    let mut guard = TerminalGuard::enter()?;
    tracing::info!("Review screen started");

    while !app.should_quit {
        guard
            .terminal
            .draw(|f| crate::tui::ui::draw(f, &mut app))
            .map_err(|e| terminal_error("Failed to draw", e))?;

        while let Ok(result) = results_rx.try_recv() {
            app.on_review_result(result);
        }

        if let Some(event) = events.next()? {
            app.handle_event(event);
        }
    }

    tracing::info!("Review screen closed");
    Ok(())
}
