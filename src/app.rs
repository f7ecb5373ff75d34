use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::challenge::{self, Feedback, LengthBounds};
use crate::config::Config;
use crate::notes::{EditState, Notebook, SaveOutcome};
use crate::store::json_store::JsonStore;
use crate::ui::text_input::{LineInput, TextArea};
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Text,
    Word,
    MinLen,
    MaxLen,
    Title,
    Notes,
}

impl Focus {
    const ORDER: [Focus; 6] = [
        Focus::Text,
        Focus::Word,
        Focus::MinLen,
        Focus::MaxLen,
        Focus::Title,
        Focus::Notes,
    ];

    pub fn next(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Owner of the whole session: practice text, length bounds, the derived
/// target word, the retype field, saved notes, and the persistence handle.
///
/// Every mutation of the text or the notes is mirrored to the store in the
/// same step; when the store is unavailable the session keeps running in
/// memory and `storage_warning` is raised for the footer.
pub struct App {
    pub focus: Focus,
    pub text: TextArea,
    pub word_input: LineInput,
    pub min_input: LineInput,
    pub max_input: LineInput,
    pub title_input: LineInput,
    pub bounds: LengthBounds,
    pub target_word: String,
    pub feedback: Feedback,
    pub notebook: Notebook,
    pub active_note: Option<String>,
    pub edit_state: EditState,
    pub last_error: Option<String>,
    pub notes_selected: usize,
    pub store: Option<JsonStore>,
    pub storage_warning: bool,
    pub theme: &'static Theme,
    pub should_quit: bool,
    rng: SmallRng,
}

impl App {
    pub fn from_parts(config: Config, store: Option<JsonStore>) -> Self {
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));

        let (text, notes) = match store {
            Some(ref s) => (s.load_input_text(), s.load_notes()),
            None => (String::new(), Vec::new()),
        };
        let storage_warning = store.is_none();

        let bounds = LengthBounds::new(config.min_word_length, config.max_word_length);

        let mut app = Self {
            focus: Focus::Text,
            text: TextArea::new(&text),
            word_input: LineInput::default(),
            min_input: LineInput::new(&bounds.min().to_string()),
            max_input: LineInput::new(&bounds.max().to_string()),
            title_input: LineInput::default(),
            bounds,
            target_word: String::new(),
            feedback: Feedback::Neutral,
            notebook: Notebook::from_notes(notes),
            active_note: None,
            edit_state: EditState::Idle,
            last_error: None,
            notes_selected: 0,
            store,
            storage_warning,
            theme,
            should_quit: false,
            rng: SmallRng::from_entropy(),
        };
        app.redraw_target();
        app
    }

    /// Draw a fresh target from the current text and bounds. May repeat the
    /// previous word when it is the only eligible one.
    fn redraw_target(&mut self) {
        self.target_word = challenge::derive_target(self.text.value(), self.bounds, &mut self.rng);
    }

    fn persist_input_text(&mut self) {
        if let Some(ref store) = self.store
            && store.save_input_text(self.text.value()).is_err()
        {
            self.storage_warning = true;
        }
    }

    fn persist_notes(&mut self) {
        if let Some(ref store) = self.store
            && store.save_notes(self.notebook.notes()).is_err()
        {
            self.storage_warning = true;
        }
    }

    /// Called after any edit of the practice text: write-through, then
    /// recompute the derived target.
    pub fn text_edited(&mut self) {
        self.persist_input_text();
        self.redraw_target();
    }

    /// Called after any edit of the retype field. An exact match clears the
    /// field and draws the next target.
    pub fn word_edited(&mut self) {
        if self.word_input.value() == self.target_word {
            self.word_input.clear();
            self.redraw_target();
            self.feedback = Feedback::Match;
        } else {
            self.feedback = Feedback::Miss;
        }
    }

    /// Called after any edit of the min-length field. Rejected values keep
    /// the bound; either way the field snaps to the canonical value, the
    /// way a controlled numeric input re-renders from state.
    pub fn min_field_edited(&mut self) {
        let accepted = match parse_bound(self.min_input.value()) {
            Some(value) => self.bounds.set_min(value),
            None => false,
        };
        self.min_input.set_text(&self.bounds.min().to_string());
        if accepted {
            self.redraw_target();
        }
    }

    pub fn max_field_edited(&mut self) {
        let accepted = match parse_bound(self.max_input.value()) {
            Some(value) => self.bounds.set_max(value),
            None => false,
        };
        self.max_input.set_text(&self.bounds.max().to_string());
        if accepted {
            self.redraw_target();
        }
    }

    /// Redraw the target and clear the retype field. Text, bounds, and
    /// notes are untouched.
    pub fn reset(&mut self) {
        self.redraw_target();
        self.word_input.clear();
        self.feedback = Feedback::Neutral;
    }

    /// Save the practice text under the title field, or update the note
    /// under edit. On success both input fields clear and the prior error
    /// message is dropped.
    pub fn save_note(&mut self) {
        let title = self.title_input.value().to_string();
        let text = self.text.value().to_string();

        match self.notebook.save_or_update(&title, &text, &self.edit_state) {
            Ok(outcome) => {
                if outcome == SaveOutcome::Updated {
                    self.edit_state = EditState::Idle;
                    self.active_note = None;
                }
                self.persist_notes();
                self.title_input.clear();
                self.text.clear();
                self.text_edited();
                self.last_error = None;
                self.clamp_notes_selection();
            }
            Err(err) => {
                self.last_error = Some(err.to_string());
            }
        }
    }

    /// Toggle-load a note: selecting an inactive note pulls its text into
    /// the editor and enters edit mode; selecting the active one clears
    /// the editor and leaves edit mode. Unknown titles are ignored.
    pub fn load_note(&mut self, title: &str) {
        if self.active_note.as_deref() == Some(title) {
            self.active_note = None;
            self.edit_state = EditState::Idle;
            self.text.clear();
            self.title_input.clear();
            self.text_edited();
        } else if let Some(note) = self.notebook.get(title) {
            let body = note.text.clone();
            self.text.set_text(&body);
            self.title_input.set_text(title);
            self.edit_state = EditState::Editing(title.to_string());
            self.active_note = Some(title.to_string());
            self.text_edited();
        }
    }

    /// Delete a note. If it was the one under edit, the editor and edit
    /// state are cleared with it.
    pub fn delete_note(&mut self, title: &str) {
        self.notebook.delete(title);
        self.persist_notes();

        if self.edit_state.is_editing(title) {
            self.text.clear();
            self.title_input.clear();
            self.edit_state = EditState::Idle;
            self.active_note = None;
            self.text_edited();
        }
        self.clamp_notes_selection();
    }

    pub fn selected_note_title(&self) -> Option<String> {
        self.notebook
            .notes()
            .get(self.notes_selected)
            .map(|n| n.title.clone())
    }

    pub fn notes_select_next(&mut self) {
        if !self.notebook.is_empty() {
            self.notes_selected = (self.notes_selected + 1).min(self.notebook.len() - 1);
        }
    }

    pub fn notes_select_prev(&mut self) {
        self.notes_selected = self.notes_selected.saturating_sub(1);
    }

    fn clamp_notes_selection(&mut self) {
        if self.notebook.is_empty() {
            self.notes_selected = 0;
        } else {
            self.notes_selected = self.notes_selected.min(self.notebook.len() - 1);
        }
    }
}

/// Bound fields mirror the original widget: an empty field reads as 0,
/// anything non-numeric is a rejected edit.
fn parse_bound(raw: &str) -> Option<usize> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(0);
    }
    raw.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_app() -> App {
        App::from_parts(Config::default(), None)
    }

    fn make_app_with_store() -> (TempDir, App) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        let app = App::from_parts(Config::default(), Some(store));
        (dir, app)
    }

    fn reopen_store(dir: &TempDir) -> JsonStore {
        JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap()
    }

    fn set_text(app: &mut App, text: &str) {
        app.text.set_text(text);
        app.text_edited();
    }

    #[test]
    fn test_target_follows_text_and_bounds() {
        let mut app = make_app();
        set_text(&mut app, "cat");
        assert_eq!(app.target_word, "cat");

        set_text(&mut app, "");
        assert_eq!(app.target_word, "");
    }

    #[test]
    fn test_bounds_change_recomputes_target() {
        let mut app = make_app();
        set_text(&mut app, "to elephant");

        app.min_input.set_text("8");
        app.min_field_edited();
        assert_eq!(app.bounds.min(), 8);
        assert_eq!(app.target_word, "elephant");

        // Nothing qualifies in [8, 8] after the text shrinks.
        set_text(&mut app, "to be");
        assert_eq!(app.target_word, "");
    }

    #[test]
    fn test_min_above_max_is_rejected_and_field_resyncs() {
        let mut app = make_app();
        app.min_input.set_text("99");
        app.min_field_edited();
        assert_eq!(app.bounds.min(), 1);
        assert_eq!(app.min_input.value(), "1");
        assert!(app.last_error.is_none(), "bound rejection is silent");
    }

    #[test]
    fn test_max_below_min_is_rejected() {
        let mut app = make_app();
        app.min_input.set_text("3");
        app.min_field_edited();
        app.max_input.set_text("2");
        app.max_field_edited();
        assert_eq!(app.bounds.max(), 10);
        assert_eq!(app.max_input.value(), "10");
    }

    #[test]
    fn test_empty_bound_field_reads_as_zero() {
        let mut app = make_app();
        app.min_input.set_text("");
        app.min_field_edited();
        assert_eq!(app.bounds.min(), 0);
        assert_eq!(app.min_input.value(), "0", "field re-renders the held value");
    }

    #[test]
    fn test_non_numeric_bound_edit_is_rejected() {
        let mut app = make_app();
        app.max_input.set_text("lots");
        app.max_field_edited();
        assert_eq!(app.bounds.max(), 10);
        assert_eq!(app.max_input.value(), "10");
    }

    #[test]
    fn test_matching_word_clears_field_and_redraws() {
        let mut app = make_app();
        set_text(&mut app, "cat");
        assert_eq!(app.target_word, "cat");

        app.word_input.set_text("cat");
        app.word_edited();
        assert_eq!(app.word_input.value(), "");
        assert_eq!(app.feedback, Feedback::Match);
        // Single eligible word: the redraw repeats it.
        assert_eq!(app.target_word, "cat");
    }

    #[test]
    fn test_mismatched_word_keeps_field() {
        let mut app = make_app();
        set_text(&mut app, "cat");

        app.word_input.set_text("ca");
        app.word_edited();
        assert_eq!(app.word_input.value(), "ca");
        assert_eq!(app.feedback, Feedback::Miss);
    }

    #[test]
    fn test_reset_touches_only_word_and_feedback() {
        let mut app = make_app();
        set_text(&mut app, "one two three");
        app.notebook
            .save_or_update("keep", "me", &EditState::Idle)
            .unwrap();
        app.word_input.set_text("partial");
        let bounds_before = app.bounds;

        app.reset();
        app.reset();

        assert_eq!(app.word_input.value(), "");
        assert_eq!(app.feedback, Feedback::Neutral);
        assert_eq!(app.text.value(), "one two three");
        assert_eq!(app.bounds, bounds_before);
        assert_eq!(app.notebook.len(), 1);
    }

    #[test]
    fn test_save_note_success_clears_fields_and_error() {
        let mut app = make_app();
        app.last_error = Some("stale".to_string());
        set_text(&mut app, "body text");
        app.title_input.set_text("A");

        app.save_note();

        assert_eq!(app.notebook.len(), 1);
        assert_eq!(app.notebook.get("A").unwrap().text, "body text");
        assert_eq!(app.title_input.value(), "");
        assert_eq!(app.text.value(), "");
        assert!(app.last_error.is_none());
    }

    #[test]
    fn test_save_without_title_surfaces_error_and_changes_nothing() {
        let mut app = make_app();
        set_text(&mut app, "body");

        app.save_note();

        assert!(app.notebook.is_empty());
        assert!(app.last_error.is_some());
        assert_eq!(app.text.value(), "body", "failed save leaves the text alone");
    }

    #[test]
    fn test_save_duplicate_title_surfaces_error() {
        let mut app = make_app();
        set_text(&mut app, "first");
        app.title_input.set_text("A");
        app.save_note();

        set_text(&mut app, "second");
        app.title_input.set_text("A");
        app.save_note();

        assert!(app.last_error.is_some());
        assert_eq!(app.notebook.get("A").unwrap().text, "first");
        assert_eq!(app.text.value(), "second");
    }

    #[test]
    fn test_load_toggle_cycle() {
        let mut app = make_app();
        set_text(&mut app, "note body");
        app.title_input.set_text("A");
        app.save_note();

        app.load_note("A");
        assert_eq!(app.text.value(), "note body");
        assert_eq!(app.title_input.value(), "A");
        assert_eq!(app.edit_state, EditState::Editing("A".to_string()));
        assert_eq!(app.active_note.as_deref(), Some("A"));

        // Second load of the active note deselects everything.
        app.load_note("A");
        assert_eq!(app.text.value(), "");
        assert_eq!(app.title_input.value(), "");
        assert_eq!(app.edit_state, EditState::Idle);
        assert!(app.active_note.is_none());
    }

    #[test]
    fn test_load_unknown_title_is_noop() {
        let mut app = make_app();
        set_text(&mut app, "keep me");
        app.load_note("ghost");
        assert_eq!(app.text.value(), "keep me");
        assert_eq!(app.edit_state, EditState::Idle);
    }

    #[test]
    fn test_update_via_edit_mode_exits_edit() {
        let mut app = make_app();
        set_text(&mut app, "v1");
        app.title_input.set_text("A");
        app.save_note();

        app.load_note("A");
        set_text(&mut app, "v2");
        app.save_note();

        assert_eq!(app.notebook.get("A").unwrap().text, "v2");
        assert_eq!(app.notebook.len(), 1);
        assert_eq!(app.edit_state, EditState::Idle);
        assert!(app.active_note.is_none());
    }

    #[test]
    fn test_delete_edited_note_clears_editor() {
        let mut app = make_app();
        set_text(&mut app, "body");
        app.title_input.set_text("A");
        app.save_note();
        app.load_note("A");

        app.delete_note("A");

        assert!(app.notebook.is_empty());
        assert_eq!(app.text.value(), "");
        assert_eq!(app.title_input.value(), "");
        assert_eq!(app.edit_state, EditState::Idle);
        assert!(app.active_note.is_none());
    }

    #[test]
    fn test_delete_other_note_leaves_editor_alone() {
        let mut app = make_app();
        set_text(&mut app, "a body");
        app.title_input.set_text("A");
        app.save_note();
        set_text(&mut app, "b body");
        app.title_input.set_text("B");
        app.save_note();

        app.load_note("A");
        app.delete_note("B");

        assert_eq!(app.notebook.len(), 1);
        assert_eq!(app.text.value(), "a body");
        assert_eq!(app.edit_state, EditState::Editing("A".to_string()));
    }

    #[test]
    fn test_delete_preserves_relative_order() {
        let mut app = make_app();
        for (title, body) in [("A", "1"), ("B", "2"), ("C", "3")] {
            set_text(&mut app, body);
            app.title_input.set_text(title);
            app.save_note();
        }

        app.delete_note("B");
        let titles: Vec<&str> = app.notebook.notes().iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "C"]);
    }

    #[test]
    fn test_text_edits_write_through_to_store() {
        let (dir, mut app) = make_app_with_store();
        set_text(&mut app, "persisted text");
        assert_eq!(reopen_store(&dir).load_input_text(), "persisted text");
    }

    #[test]
    fn test_note_saves_write_through_to_store() {
        let (dir, mut app) = make_app_with_store();
        set_text(&mut app, "body");
        app.title_input.set_text("A");
        app.save_note();

        let stored = reopen_store(&dir).load_notes();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].title, "A");

        app.delete_note("A");
        assert!(reopen_store(&dir).load_notes().is_empty());
    }

    #[test]
    fn test_session_restores_text_and_notes_from_store() {
        let (dir, mut app) = make_app_with_store();
        set_text(&mut app, "round trip");
        app.title_input.set_text("A");
        app.save_note();
        set_text(&mut app, "current text");

        let store = reopen_store(&dir);
        let app2 = App::from_parts(Config::default(), Some(store));
        assert_eq!(app2.text.value(), "current text");
        assert_eq!(app2.notebook.len(), 1);
        // Bounds are per-session state, never persisted.
        assert_eq!(app2.bounds, LengthBounds::new(1, 10));
    }

    #[test]
    fn test_missing_store_raises_warning_and_keeps_working() {
        let mut app = make_app();
        assert!(app.storage_warning);
        set_text(&mut app, "still works");
        assert_eq!(app.text.value(), "still works");
    }

    #[test]
    fn test_focus_cycle_round_trip() {
        let mut focus = Focus::Text;
        for _ in 0..Focus::ORDER.len() {
            focus = focus.next();
        }
        assert_eq!(focus, Focus::Text);
        assert_eq!(Focus::Text.prev(), Focus::Notes);
    }

    #[test]
    fn test_notes_selection_stays_in_range() {
        let mut app = make_app();
        app.notes_select_next();
        assert_eq!(app.notes_selected, 0);

        for (title, body) in [("A", "1"), ("B", "2")] {
            set_text(&mut app, body);
            app.title_input.set_text(title);
            app.save_note();
        }
        app.notes_select_next();
        app.notes_select_next();
        assert_eq!(app.notes_selected, 1);

        app.delete_note("B");
        assert_eq!(app.notes_selected, 0);
    }

    #[test]
    fn test_parse_bound() {
        assert_eq!(parse_bound(""), Some(0));
        assert_eq!(parse_bound("  "), Some(0));
        assert_eq!(parse_bound("7"), Some(7));
        assert_eq!(parse_bound("-1"), None);
        assert_eq!(parse_bound("abc"), None);
    }
}
