use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutTier {
    Wide,   // ≥90 cols: notes sidebar next to the practice panels
    Narrow, // <90 cols: notes panel stacked below
}

impl LayoutTier {
    pub fn from_area(area: Rect) -> Self {
        if area.width >= 90 {
            LayoutTier::Wide
        } else {
            LayoutTier::Narrow
        }
    }

    pub fn show_sidebar(&self) -> bool {
        *self == LayoutTier::Wide
    }
}

pub struct AppLayout {
    pub header: Rect,
    pub main: Rect,
    pub notes: Rect,
    pub footer: Rect,
    pub tier: LayoutTier,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let tier = LayoutTier::from_area(area);

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(10),
                Constraint::Length(1),
            ])
            .split(area);

        if tier.show_sidebar() {
            let horizontal = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(72), Constraint::Percentage(28)])
                .split(vertical[1]);

            Self {
                header: vertical[0],
                main: horizontal[0],
                notes: horizontal[1],
                footer: vertical[2],
                tier,
            }
        } else {
            let stacked = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(8), Constraint::Length(7)])
                .split(vertical[1]);

            Self {
                header: vertical[0],
                main: stacked[0],
                notes: stacked[1],
                footer: vertical[2],
                tier,
            }
        }
    }
}

/// Rows of the main column: text editor, highlight view, retype/bounds row,
/// title row, error line.
pub struct MainLayout {
    pub editor: Rect,
    pub preview: Rect,
    pub controls: Rect,
    pub title: Rect,
    pub message: Rect,
}

impl MainLayout {
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(40),
                Constraint::Percentage(40),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(area);

        Self {
            editor: rows[0],
            preview: rows[1],
            controls: rows[2],
            title: rows[3],
            message: rows[4],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(LayoutTier::from_area(Rect::new(0, 0, 120, 40)), LayoutTier::Wide);
        assert_eq!(LayoutTier::from_area(Rect::new(0, 0, 89, 40)), LayoutTier::Narrow);
    }

    #[test]
    fn test_wide_layout_places_sidebar_beside_main() {
        let layout = AppLayout::new(Rect::new(0, 0, 120, 40));
        assert!(layout.tier.show_sidebar());
        assert_eq!(layout.main.y, layout.notes.y);
        assert!(layout.notes.x > layout.main.x);
    }

    #[test]
    fn test_narrow_layout_stacks_notes_below() {
        let layout = AppLayout::new(Rect::new(0, 0, 60, 40));
        assert!(!layout.tier.show_sidebar());
        assert!(layout.notes.y > layout.main.y);
        assert_eq!(layout.main.x, layout.notes.x);
    }

    #[test]
    fn test_main_layout_row_order() {
        let main = MainLayout::new(Rect::new(0, 0, 80, 30));
        assert!(main.preview.y > main.editor.y);
        assert!(main.controls.y > main.preview.y);
        assert!(main.title.y > main.controls.y);
        assert!(main.message.y > main.title.y);
    }
}
