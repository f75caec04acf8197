//! UI rendering for the review screen.

use crate::domain::ports::ReviewService;
use crate::tui::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const HELP_TEXT: &str = "Ctrl+Enter / Ctrl+R: Review | PgUp/PgDn: Scroll | Ctrl+L: Clear | Esc: Quit";

/// Draw the whole screen and remember where the button and review pane are.
#[tracing::instrument(skip_all)]
pub fn draw<S: ReviewService + ?Sized + 'static>(f: &mut Frame, app: &mut App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Editor and review
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    draw_header(f, app, chunks[0]);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(panes[0]);

    draw_editor(f, app, left[0]);
    draw_button(f, app, left[1]);
    draw_review(f, app, panes[1]);
    draw_status_bar(f, app, chunks[2]);

    app.button_area = left[1];
    app.review_area = panes[1];
}

fn draw_header<S: ReviewService + ?Sized + 'static>(f: &mut Frame, app: &App<S>, area: Rect) {
    let title = format!("Code Reviewer | {}", app.endpoint);
    let header = Paragraph::new(title)
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    f.render_widget(header, area);
}

fn draw_editor<S: ReviewService + ?Sized + 'static>(f: &mut Frame, app: &App<S>, area: Rect) {
    let input = app.controller.input();
    let block = Block::default().borders(Borders::ALL).title(" Code ");
    let inner = block.inner(area);

    if input.is_blank() {
        let placeholder = Paragraph::new(vec![
            Line::default(),
            Line::from(vec![
                Span::raw("Copy and Paste Your "),
                Span::styled(
                    "CODE",
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" Here"),
            ]),
            Line::styled("To Review It", Style::default().fg(Color::DarkGray)),
        ])
        .block(block)
        .alignment(Alignment::Center);
        f.render_widget(placeholder, area);
        f.set_cursor_position(Position::new(inner.x, inner.y));
        return;
    }

    let (row, col) = input.cursor_position();
    let height = inner.height.max(1) as usize;
    let width = inner.width.max(1) as usize;
    let scroll_y = row.saturating_sub(height - 1);
    let scroll_x = col.saturating_sub(width - 1);

    let editor = Paragraph::new(input.text())
        .block(block)
        .style(Style::default().fg(Color::White))
        .scroll((scroll_y as u16, scroll_x as u16));
    f.render_widget(editor, area);

    f.set_cursor_position(Position::new(
        inner.x + (col - scroll_x) as u16,
        inner.y + (row - scroll_y) as u16,
    ));
}

fn draw_button<S: ReviewService + ?Sized + 'static>(f: &mut Frame, app: &App<S>, area: Rect) {
    let (label, style) = if app.controller.is_busy() {
        (
            format!("{} Analyzing...", app.spinner()),
            Style::default().fg(Color::Yellow),
        )
    } else if app.controller.can_submit() {
        (
            "Review (Ctrl+Enter)".to_string(),
            Style::default()
                .fg(Color::Black)
                .bg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (
            "Review".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    };

    let button = Paragraph::new(label)
        .block(Block::default().borders(Borders::ALL))
        .style(style)
        .alignment(Alignment::Center);
    f.render_widget(button, area);
}

fn draw_review<S: ReviewService + ?Sized + 'static>(f: &mut Frame, app: &mut App<S>, area: Rect) {
    let title = if app.controller.is_busy() {
        " Review (working) "
    } else {
        " Review "
    };
    let border_style = if app.controller.is_busy() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);
    let inner = block.inner(area);

    let text = Paragraph::new(app.review_lines().to_vec()).wrap(Wrap { trim: false });
    // Scroll is in wrapped rows, not Markdown lines.
    let rows = text.line_count(inner.width);
    let max_scroll = rows
        .saturating_sub(inner.height as usize)
        .min(u16::MAX as usize) as u16;
    app.review_scroll = app.review_scroll.min(max_scroll);

    let review = text.block(block).scroll((app.review_scroll, 0));
    f.render_widget(review, area);
}

fn draw_status_bar<S: ReviewService + ?Sized + 'static>(f: &mut Frame, app: &App<S>, area: Rect) {
    let status_text = format!("{} | {}", app.status_message, HELP_TEXT);
    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Gray));
    f.render_widget(status, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::controller::{ReviewController, ReviewResult};
    use async_trait::async_trait;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;
    use tokio::sync::mpsc;

    struct NoopService;

    #[async_trait]
    impl ReviewService for NoopService {
        async fn review(&self, _code: &str) -> ReviewResult {
            Ok(String::new())
        }
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_draw_records_button_area_and_placeholder() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let controller = ReviewController::new(Arc::new(NoopService));
        let mut app = App::new(controller, "http://localhost/ai/get-review".to_string(), tx);
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        terminal.draw(|f| draw(f, &mut app)).unwrap();

        assert_eq!(app.button_area, Rect::new(0, 24, 50, 3));
        assert_eq!(app.review_area, Rect::new(50, 3, 50, 24));
        let text = screen_text(&terminal);
        assert!(text.contains("Copy and Paste Your CODE Here"));
        assert!(text.contains("Code Reviewer | http://localhost/ai/get-review"));
    }

    fn app_with_review(review: &str) -> App<NoopService> {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut controller = ReviewController::new(Arc::new(NoopService));
        controller.input_mut().set_text("x");
        controller.begin().unwrap();
        controller.settle(Ok(review.to_string()));
        App::new(controller, "http://localhost".to_string(), tx)
    }

    #[test]
    fn test_long_wrapped_review_scrolls_to_the_end() {
        let paragraph = vec!["lorem"; 120].join(" ");
        let review = format!("{}\n\nFINAL_LINE_MARKER", vec![paragraph; 6].join("\n\n"));
        let mut app = app_with_review(&review);
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        terminal.draw(|f| draw(f, &mut app)).unwrap();
        assert!(!screen_text(&terminal).contains("FINAL_LINE_MARKER"));

        for _ in 0..50 {
            app.review_scroll = app.review_scroll.saturating_add(10);
            terminal.draw(|f| draw(f, &mut app)).unwrap();
        }

        assert!(app.review_scroll > 12);
        assert!(screen_text(&terminal).contains("FINAL_LINE_MARKER"));

        // The last row of the pane holds the marker, nothing scrolled past it.
        let buffer = terminal.backend().buffer();
        let last_row: String = (51u16..99)
            .map(|x| buffer[(x, 25u16)].symbol().to_string())
            .collect();
        assert!(last_row.starts_with("FINAL_LINE_MARKER"));
    }

    #[test]
    fn test_short_review_does_not_scroll() {
        let mut app = app_with_review("Looks good.");
        app.review_scroll = 40;
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        terminal.draw(|f| draw(f, &mut app)).unwrap();

        assert_eq!(app.review_scroll, 0);
        assert!(screen_text(&terminal).contains("Looks good."));
    }

    #[test]
    fn test_tab_indented_code_draws_without_tabs() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut controller = ReviewController::new(Arc::new(NoopService));
        controller
            .input_mut()
            .set_text("func main() {\n\t\tfmt.Println()\n}");
        let mut app = App::new(controller, "http://localhost".to_string(), tx);
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        terminal.draw(|f| draw(f, &mut app)).unwrap();

        let buffer = terminal.backend().buffer();
        let row: String = (1u16..49)
            .map(|x| buffer[(x, 5u16)].symbol().to_string())
            .collect();
        assert!(row.starts_with("        fmt.Println()"));
        assert!(!screen_text(&terminal).contains('\t'));
    }

    #[test]
    fn test_whitespace_input_shows_placeholder() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut controller = ReviewController::new(Arc::new(NoopService));
        controller.input_mut().set_text("  \n  ");
        let mut app = App::new(controller, "http://localhost".to_string(), tx);
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        terminal.draw(|f| draw(f, &mut app)).unwrap();

        assert!(screen_text(&terminal).contains("Copy and Paste Your CODE Here"));
    }

    #[test]
    fn test_draw_shows_code() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut controller = ReviewController::new(Arc::new(NoopService));
        controller.input_mut().set_text("fn main() {}");
        let mut app = App::new(controller, "http://localhost".to_string(), tx);
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        terminal.draw(|f| draw(f, &mut app)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("fn main() {}"));
        assert!(text.contains("Review (Ctrl+Enter)"));
    }
}
