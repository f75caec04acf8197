//! Application state for the review screen.

use crate::core::controller::{ReviewController, ReviewResult, SkipReason, SubmitOutcome};
use crate::domain::ports::ReviewService;
use crate::tui::keymap::{self, Action};
use crate::tui::markdown::render_markdown;
use crate::tui::Event;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use ratatui::text::Line;
use tokio::sync::mpsc::UnboundedSender;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const MOUSE_SCROLL: u16 = 3;

pub struct App<S: ReviewService + ?Sized> {
    pub controller: ReviewController<S>,
    pub endpoint: String,
    pub status_message: String,
    pub review_scroll: u16,
    pub should_quit: bool,
    spinner_frame: usize,
    results_tx: UnboundedSender<ReviewResult>,
    rendered: Option<(u64, Vec<Line<'static>>)>,
    /// Screen areas from the last draw, used for mouse hit testing.
    pub(crate) button_area: Rect,
    pub(crate) review_area: Rect,
}

impl<S: ReviewService + ?Sized + 'static> App<S> {
    pub fn new(
        controller: ReviewController<S>,
        endpoint: String,
        results_tx: UnboundedSender<ReviewResult>,
    ) -> Self {
        Self {
            controller,
            endpoint,
            status_message: "Ready".to_string(),
            review_scroll: 0,
            should_quit: false,
            spinner_frame: 0,
            results_tx,
            rendered: None,
            button_area: Rect::default(),
            review_area: Rect::default(),
        }
    }

    pub fn handle_event(&mut self, event: Event) {
        let action = match event {
            Event::Tick => {
                if self.controller.is_busy() {
                    self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
                }
                None
            }
            Event::Key(key) => keymap::dispatch(key),
            Event::Paste(text) => Some(Action::InsertText(text)),
            Event::Mouse(mouse) => self.mouse_action(mouse),
        };

        if let Some(action) = action {
            self.apply(action);
        }
    }

    /// A left click on the Review button is the same `Submit` the keyboard
    /// chord produces.
    pub fn mouse_action(&self, mouse: MouseEvent) -> Option<Action> {
        let position = Position::new(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) if self.button_area.contains(position) => {
                Some(Action::Submit)
            }
            MouseEventKind::ScrollUp if self.review_area.contains(position) => {
                Some(Action::ScrollReviewUp(MOUSE_SCROLL))
            }
            MouseEventKind::ScrollDown if self.review_area.contains(position) => {
                Some(Action::ScrollReviewDown(MOUSE_SCROLL))
            }
            _ => None,
        }
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Submit => self.submit(),
            Action::Quit => self.should_quit = true,
            Action::ClearInput => {
                self.controller.input_mut().clear();
                self.status_message = "Editor cleared".to_string();
            }
            Action::Insert(c) => self.controller.input_mut().insert_char(c),
            Action::InsertText(text) => self.controller.input_mut().insert_str(&text),
            Action::Newline => self.controller.input_mut().insert_char('\n'),
            Action::Backspace => self.controller.input_mut().backspace(),
            Action::Delete => self.controller.input_mut().delete(),
            Action::CursorLeft => self.controller.input_mut().move_left(),
            Action::CursorRight => self.controller.input_mut().move_right(),
            Action::CursorUp => self.controller.input_mut().move_up(),
            Action::CursorDown => self.controller.input_mut().move_down(),
            Action::CursorHome => self.controller.input_mut().move_home(),
            Action::CursorEnd => self.controller.input_mut().move_end(),
            Action::ScrollReviewUp(n) => self.review_scroll = self.review_scroll.saturating_sub(n),
            Action::ScrollReviewDown(n) => {
                self.review_scroll = self.review_scroll.saturating_add(n)
            }
        }
    }

    fn submit(&mut self) {
        match self.controller.spawn_submit(self.results_tx.clone()) {
            Ok(()) => {
                self.review_scroll = 0;
                self.spinner_frame = 0;
                self.status_message = "Review requested".to_string();
            }
            Err(SkipReason::Busy) => {
                self.status_message = "A review is already running".to_string();
            }
            Err(SkipReason::EmptyInput) => {
                self.status_message = "Nothing to review: paste some code first".to_string();
            }
        }
    }

    /// Feeds a finished request back into the controller.
    pub fn on_review_result(&mut self, result: ReviewResult) {
        self.status_message = match self.controller.settle(result) {
            SubmitOutcome::Reviewed => "Review ready".to_string(),
            SubmitOutcome::Failed(kind) => format!("Review failed ({:?})", kind),
            SubmitOutcome::Skipped(_) => return,
        };
        self.review_scroll = 0;
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_frame]
    }

    /// Rendered review, re-parsed only when the output changed.
    pub fn review_lines(&mut self) -> &[Line<'static>] {
        let revision = self.controller.revision();
        let stale = !matches!(&self.rendered, Some((r, _)) if *r == revision);
        if stale {
            self.rendered = Some((revision, render_markdown(self.controller.output())));
        }
        self.rendered
            .as_ref()
            .map(|(_, lines)| lines.as_slice())
            .unwrap_or_default()
    }
}
