use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;

use crate::notes::Note;

const INPUT_TEXT_FILE: &str = "input_text.txt";
const NOTES_FILE: &str = "notes.json";

/// File-per-key store under the user data directory.
///
/// `input_text.txt` holds the practice text as a raw string; `notes.json`
/// holds the saved notes as a plain JSON array of `{title, text}` objects.
/// Loads never fail: absent or unreadable keys fall back to their empty
/// defaults, and a notes file that does not parse is treated as empty.
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("retyp");
        Self::with_base_dir(base_dir)
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    fn write_atomic(&self, name: &str, bytes: &[u8]) -> Result<()> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("tmp");

        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(bytes)?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    pub fn load_input_text(&self) -> String {
        fs::read_to_string(self.file_path(INPUT_TEXT_FILE)).unwrap_or_default()
    }

    pub fn save_input_text(&self, text: &str) -> Result<()> {
        self.write_atomic(INPUT_TEXT_FILE, text.as_bytes())
    }

    pub fn load_notes(&self) -> Vec<Note> {
        let path = self.file_path(NOTES_FILE);
        if !path.exists() {
            return Vec::new();
        }
        match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Vec::new(),
        }
    }

    pub fn save_notes(&self, notes: &[Note]) -> Result<()> {
        let json = serde_json::to_string_pretty(notes)?;
        self.write_atomic(NOTES_FILE, json.as_bytes())
    }
}
