//! Converts review Markdown into styled ratatui lines.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

const RULE_WIDTH: usize = 40;

pub fn render_markdown(markdown: &str) -> Vec<Line<'static>> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut state = RenderState::default();
    for event in Parser::new_ext(markdown, options) {
        state.handle(event);
    }
    state.finish()
}

#[derive(Default)]
struct RenderState {
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    style_stack: Vec<Style>,
    /// One entry per open list: `Some(next number)` for ordered lists.
    list_stack: Vec<Option<u64>>,
    blockquote_depth: usize,
    in_code_block: bool,
    needs_blank: bool,
}

impl RenderState {
    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => {
                if self.in_code_block {
                    self.push_code(&text);
                } else {
                    self.push_span(text.into_string(), self.style());
                }
            }
            Event::Code(code) => {
                self.push_span(code.into_string(), inline_code_style());
            }
            Event::SoftBreak => self.push_span(" ".to_string(), self.style()),
            Event::HardBreak => self.flush(),
            Event::Rule => {
                self.flush();
                self.blank_if_needed();
                self.lines.push(Line::styled(
                    "─".repeat(RULE_WIDTH),
                    Style::default().fg(Color::DarkGray),
                ));
                self.needs_blank = true;
            }
            Event::TaskListMarker(checked) => {
                let marker = if checked { "[x] " } else { "[ ] " };
                self.push_span(marker.to_string(), self.style());
            }
            Event::Html(html) | Event::InlineHtml(html) => {
                self.push_span(html.into_string(), self.style());
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                if self.list_stack.is_empty() {
                    self.blank_if_needed();
                }
            }
            Tag::Heading { level, .. } => {
                self.flush();
                self.blank_if_needed();
                self.style_stack.push(heading_style(level));
            }
            Tag::BlockQuote(_) => {
                self.flush();
                self.blank_if_needed();
                self.blockquote_depth += 1;
                self.style_stack
                    .push(self.style().fg(Color::Gray).add_modifier(Modifier::ITALIC));
            }
            Tag::CodeBlock(kind) => {
                self.flush();
                self.blank_if_needed();
                self.in_code_block = true;
                if let CodeBlockKind::Fenced(lang) = kind {
                    if !lang.is_empty() {
                        self.lines.push(Line::styled(
                            format!("  {}", lang),
                            Style::default()
                                .fg(Color::DarkGray)
                                .add_modifier(Modifier::ITALIC),
                        ));
                    }
                }
            }
            Tag::List(start) => {
                self.flush();
                if self.list_stack.is_empty() {
                    self.blank_if_needed();
                }
                self.list_stack.push(start);
            }
            Tag::Item => {
                self.flush();
                let depth = self.list_stack.len().saturating_sub(1);
                let bullet = match self.list_stack.last_mut() {
                    Some(Some(n)) => {
                        let bullet = format!("{}. ", n);
                        *n += 1;
                        bullet
                    }
                    _ => "• ".to_string(),
                };
                self.current.push(Span::styled(
                    format!("{}{}", "  ".repeat(depth), bullet),
                    Style::default().fg(Color::Yellow),
                ));
            }
            Tag::Emphasis => self
                .style_stack
                .push(self.style().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self
                .style_stack
                .push(self.style().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => self
                .style_stack
                .push(self.style().add_modifier(Modifier::CROSSED_OUT)),
            Tag::Link { .. } => self.style_stack.push(
                self.style()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::UNDERLINED),
            ),
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                self.flush();
                if self.list_stack.is_empty() {
                    self.needs_blank = true;
                }
            }
            TagEnd::Heading(_) => {
                self.flush();
                self.style_stack.pop();
                self.needs_blank = true;
            }
            TagEnd::BlockQuote(_) => {
                self.flush();
                self.style_stack.pop();
                self.blockquote_depth = self.blockquote_depth.saturating_sub(1);
                self.needs_blank = true;
            }
            TagEnd::CodeBlock => {
                self.in_code_block = false;
                self.needs_blank = true;
            }
            TagEnd::List(_) => {
                self.flush();
                self.list_stack.pop();
                if self.list_stack.is_empty() {
                    self.needs_blank = true;
                }
            }
            TagEnd::Item => self.flush(),
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough | TagEnd::Link => {
                self.style_stack.pop();
            }
            _ => {}
        }
    }

    fn style(&self) -> Style {
        self.style_stack.last().copied().unwrap_or_default()
    }

    fn push_span(&mut self, text: String, style: Style) {
        self.current.push(Span::styled(text, style));
    }

    fn push_code(&mut self, text: &str) {
        let style = code_block_style();
        for line in text.strip_suffix('\n').unwrap_or(text).split('\n') {
            self.lines
                .push(Line::from(vec![Span::styled(format!("  {}", line), style)]));
        }
    }

    fn blank_if_needed(&mut self) {
        if self.needs_blank && !self.lines.is_empty() {
            self.lines.push(Line::default());
        }
        self.needs_blank = false;
    }

    fn flush(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let mut spans = Vec::with_capacity(self.current.len() + 1);
        if self.blockquote_depth > 0 {
            spans.push(Span::styled(
                "│ ".repeat(self.blockquote_depth),
                Style::default().fg(Color::DarkGray),
            ));
        }
        spans.append(&mut self.current);
        self.lines.push(Line::from(spans));
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush();
        self.lines
    }
}

fn heading_style(level: HeadingLevel) -> Style {
    let style = Style::default().add_modifier(Modifier::BOLD);
    match level {
        HeadingLevel::H1 => style.fg(Color::Magenta).add_modifier(Modifier::UNDERLINED),
        HeadingLevel::H2 => style.fg(Color::Cyan),
        _ => style.fg(Color::LightBlue),
    }
}

fn inline_code_style() -> Style {
    Style::default().fg(Color::Yellow).bg(Color::Black)
}

fn code_block_style() -> Style {
    Style::default().fg(Color::LightGreen)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_heading_and_paragraph() {
        let lines = render_markdown("## Summary\n\nThe code is *fine*.");
        assert_eq!(text_of(&lines), vec!["Summary", "", "The code is fine."]);
        assert!(lines[0].spans[0].style.add_modifier.contains(Modifier::BOLD));
        assert!(lines[2].spans[1].style.add_modifier.contains(Modifier::ITALIC));
    }

    #[test]
    fn test_error_markdown_renders_heading() {
        let lines = render_markdown("## ⚠️ Review Error\n\nServer error occurred.");
        assert_eq!(text_of(&lines)[0], "⚠️ Review Error");
    }

    #[test]
    fn test_fenced_code_block_keeps_lines() {
        let lines = render_markdown("Fix:\n\n```rust\nlet x = 1;\nlet y = 2;\n```\n");
        assert_eq!(
            text_of(&lines),
            vec!["Fix:", "", "  rust", "  let x = 1;", "  let y = 2;"]
        );
    }

    #[test]
    fn test_lists() {
        let lines = render_markdown("- one\n- two\n\n1. first\n2. second\n");
        assert_eq!(
            text_of(&lines),
            vec!["• one", "• two", "", "1. first", "2. second"]
        );
    }

    #[test]
    fn test_rule_between_paragraphs() {
        let lines = render_markdown("Before\n\n---\n\nAfter");
        assert_eq!(
            text_of(&lines),
            vec![
                "Before".to_string(),
                String::new(),
                "─".repeat(RULE_WIDTH),
                String::new(),
                "After".to_string(),
            ]
        );
        assert_eq!(lines[2].style.fg, Some(Color::DarkGray));
    }

    #[test]
    fn test_nested_lists_indent() {
        let lines = render_markdown("- outer\n  - inner\n- next\n");
        assert_eq!(text_of(&lines), vec!["• outer", "  • inner", "• next"]);

        let lines = render_markdown("1. a\n   1. b\n   2. c\n2. d\n");
        assert_eq!(text_of(&lines), vec!["1. a", "  1. b", "  2. c", "2. d"]);
    }

    #[test]
    fn test_inline_code_and_blockquote() {
        let lines = render_markdown("> use `Vec`");
        assert_eq!(text_of(&lines), vec!["│ use Vec"]);
        assert_eq!(lines[0].spans[2].style, inline_code_style());
    }

    #[test]
    fn test_plain_text_passes_through() {
        let lines = render_markdown("Analyzing your code...");
        assert_eq!(text_of(&lines), vec!["Analyzing your code..."]);
    }
}
