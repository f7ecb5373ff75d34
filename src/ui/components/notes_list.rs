use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::notes::Note;
use crate::ui::theme::Theme;

/// Saved-notes panel: one row per note, selection cursor, and a marker on
/// the note currently loaded into the editor.
pub struct NotesList<'a> {
    notes: &'a [Note],
    selected: usize,
    active_title: Option<&'a str>,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> NotesList<'a> {
    pub fn new(
        notes: &'a [Note],
        selected: usize,
        active_title: Option<&'a str>,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            notes,
            selected,
            active_title,
            focused,
            theme,
        }
    }
}

impl Widget for NotesList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let border = if self.focused {
            colors.border_focused()
        } else {
            colors.border()
        };
        let block = Block::bordered()
            .title(" Notes ")
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.notes.is_empty() {
            let empty = Paragraph::new(Line::from(Span::styled(
                " no saved notes",
                Style::default().fg(colors.text_dim()),
            )));
            empty.render(inner, buf);
            return;
        }

        // Keep the selection visible when the list outgrows the panel.
        let visible = inner.height as usize;
        let offset = self.selected.saturating_sub(visible.saturating_sub(1));

        let lines: Vec<Line> = self
            .notes
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .map(|(i, note)| {
                let is_selected = self.focused && i == self.selected;
                let is_active = self.active_title == Some(note.title.as_str());

                let cursor = if is_selected { ">" } else { " " };
                let marker = if is_active { "*" } else { " " };

                let style = if is_active {
                    Style::default()
                        .fg(colors.accent())
                        .add_modifier(Modifier::BOLD)
                } else if is_selected {
                    Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(colors.fg())
                };

                Line::from(Span::styled(
                    format!(" {cursor}{marker} {}", note.title),
                    style,
                ))
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn note(title: &str) -> Note {
        Note {
            title: title.to_string(),
            text: "body".to_string(),
        }
    }

    fn render_to_string(notes: &[Note], selected: usize, active: Option<&str>) -> String {
        let theme = Theme::default();
        let backend = TestBackend::new(30, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let list = NotesList::new(notes, selected, active, true, &theme);
                f.render_widget(list, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_empty_list_shows_placeholder() {
        let content = render_to_string(&[], 0, None);
        assert!(content.contains("no saved notes"));
    }

    #[test]
    fn test_titles_and_active_marker_render() {
        let notes = vec![note("alpha"), note("beta")];
        let content = render_to_string(&notes, 0, Some("beta"));
        assert!(content.contains("alpha"));
        assert!(content.contains("*"));
        assert!(content.contains("beta"));
    }
}
