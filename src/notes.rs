use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A named snapshot of the practice text. The title is the primary key;
/// notes carry no other identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub title: String,
    pub text: String,
}

/// User-visible failures of the save operation. Both leave the notebook
/// untouched; the message is shown until the next successful save.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum NoteError {
    #[error("please provide a title and text for the note")]
    MissingFields,
    #[error("a note with this title already exists")]
    DuplicateTitle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Updated,
}

/// Whether a save should overwrite an existing note.
///
/// Entered by loading a note, left by toggling that note off, saving over
/// it, or deleting it. Saving under a different title creates a new note
/// and does not leave the state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Idle,
    Editing(String),
}

impl EditState {
    pub fn is_editing(&self, title: &str) -> bool {
        matches!(self, EditState::Editing(t) if t == title)
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            EditState::Idle => None,
            EditState::Editing(t) => Some(t.as_str()),
        }
    }
}

/// Ordered collection of notes with unique titles. Insertion order is
/// display order.
#[derive(Clone, Debug, Default)]
pub struct Notebook {
    notes: Vec<Note>,
}

impl Notebook {
    /// Rebuild from persisted data. Duplicate titles should not occur, but
    /// hand-edited files get first-occurrence-wins instead of an error.
    pub fn from_notes(notes: Vec<Note>) -> Self {
        let mut seen: Vec<&str> = Vec::new();
        let mut unique = Vec::with_capacity(notes.len());
        for note in &notes {
            if !seen.contains(&note.title.as_str()) {
                seen.push(&note.title);
                unique.push(note.clone());
            }
        }
        Self { notes: unique }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn get(&self, title: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.title == title)
    }

    /// Create a note, or replace the text of the note currently under edit.
    ///
    /// Saving over an existing title is only allowed while that exact title
    /// is being edited; otherwise it is a duplicate.
    pub fn save_or_update(
        &mut self,
        title: &str,
        text: &str,
        edit: &EditState,
    ) -> Result<SaveOutcome, NoteError> {
        if title.is_empty() || text.is_empty() {
            return Err(NoteError::MissingFields);
        }

        match self.notes.iter().position(|n| n.title == title) {
            Some(idx) if edit.is_editing(title) => {
                self.notes[idx].text = text.to_string();
                Ok(SaveOutcome::Updated)
            }
            Some(_) => Err(NoteError::DuplicateTitle),
            None => {
                self.notes.push(Note {
                    title: title.to_string(),
                    text: text.to_string(),
                });
                Ok(SaveOutcome::Created)
            }
        }
    }

    /// Remove the note with this title. Absent titles are a no-op.
    pub fn delete(&mut self, title: &str) -> bool {
        match self.notes.iter().position(|n| n.title == title) {
            Some(idx) => {
                self.notes.remove(idx);
                true
            }
            None => false,
        }
    }
}
