use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::challenge;
use crate::ui::theme::Theme;

/// Read-only view of the practice text with every token equal to the target
/// word underlined in the highlight color.
pub struct HighlightView<'a> {
    text: &'a str,
    target: &'a str,
    theme: &'a Theme,
}

impl<'a> HighlightView<'a> {
    pub fn new(text: &'a str, target: &'a str, theme: &'a Theme) -> Self {
        Self { text, target, theme }
    }
}

/// Expand the highlight spans into styled lines. Tokens keep their inner
/// newlines (splitting is on single spaces only), so a token may itself
/// span lines; every piece of it carries the token's style.
fn build_lines<'a>(
    text: &'a str,
    target: &str,
    normal: Style,
    marked: Style,
) -> Vec<Line<'a>> {
    let mut lines: Vec<Line> = vec![Line::default()];

    for (i, span) in challenge::highlight(text, target).into_iter().enumerate() {
        if i > 0 {
            lines.last_mut().unwrap().spans.push(Span::raw(" "));
        }
        let style = if span.is_target { marked } else { normal };
        for (j, piece) in span.word.split('\n').enumerate() {
            if j > 0 {
                lines.push(Line::default());
            }
            if !piece.is_empty() {
                lines.last_mut().unwrap().spans.push(Span::styled(piece, style));
            }
        }
    }

    lines
}

impl Widget for HighlightView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let normal = Style::default().fg(colors.fg());
        let marked = Style::default()
            .fg(colors.highlight())
            .add_modifier(Modifier::UNDERLINED | Modifier::BOLD);

        let lines = build_lines(self.text, self.target, normal, marked);

        let block = Block::bordered()
            .title(" Practice ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });

        paragraph.render(area, buf);
    }
}
