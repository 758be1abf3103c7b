//! JSON-file dictionary store
//!
//! The dictionary is a JSON array of entries:
//!
//! ```json
//! [
//!     { "en": "river", "bn": ["নদী"], "def": ["A large natural stream"], "syn": [], "ant": [] }
//! ]
//! ```
//!
//! Existing entries are kept as raw JSON so fields this crate does not know about
//! survive a load/merge/save cycle untouched.

use crate::error::{StoreError, StoreResult};
use crate::known::KnownWords;
use crate::record::EnrichedRecord;
use serde_json::Value;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Default file name of the dictionary
pub const DEFAULT_DICT_PATH: &str = "dictionary.json";

/// Persisted mapping from English word to its record
#[derive(Debug)]
pub struct DictionaryStore {
    path: PathBuf,
    entries: Vec<Value>,
    known: KnownWords,
}

impl DictionaryStore {
    /// An empty dictionary that will be saved to `path`
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Vec::new(),
            known: KnownWords::new(),
        }
    }

    /// Load the dictionary at `path`
    ///
    /// # Errors
    /// - File cannot be read
    /// - Invalid JSON, or the root is not an array
    pub fn load(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let entries = read_entries(&path)?;
        let known = known_from_entries(&entries);
        tracing::info!(
            "Loaded dictionary '{}' with {} entries",
            path.display(),
            entries.len()
        );
        Ok(Self {
            path,
            entries,
            known,
        })
    }

    /// Load the dictionary, falling back to an empty one if it is missing or unreadable
    pub fn load_or_empty(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if !path.exists() {
            return Self::empty(path);
        }
        match Self::load(&path) {
            Ok(store) => store,
            Err(e) => {
                tracing::warn!("Could not read dictionary: {}. Starting with empty dictionary", e);
                Self::empty(path)
            }
        }
    }

    /// Replace the contents from raw JSON text, e.g. a downloaded copy
    pub fn replace_from_json(&mut self, json: &str) -> StoreResult<()> {
        let entries = parse_entries(json)?;
        self.known = known_from_entries(&entries);
        self.entries = entries;
        Ok(())
    }

    /// Re-read the file so that edits made by other processes are merged against
    ///
    /// The known set is updated in place, so clones handed out earlier see the
    /// reloaded words as well. Words are never removed from it.
    pub fn reload(&mut self) -> StoreResult<()> {
        if !self.path.exists() {
            return Ok(());
        }
        let entries = read_entries(&self.path)?;
        for word in entry_words(&entries) {
            self.known.insert(&word);
        }
        self.entries = entries;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Shared handle on the set of known words
    pub fn known_words(&self) -> KnownWords {
        self.known.clone()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.known.contains(word)
    }

    /// Append records whose word is not yet known
    ///
    /// Returns the words actually added, in input order.
    pub fn merge<I>(&mut self, records: I) -> Vec<String>
    where
        I: IntoIterator<Item = EnrichedRecord>,
    {
        let mut added = Vec::new();
        for record in records {
            if !self.known.insert(&record.key()) {
                continue;
            }
            match serde_json::to_value(&record) {
                Ok(value) => {
                    added.push(record.en);
                    self.entries.push(value);
                }
                Err(e) => tracing::warn!("Skipping unserializable record '{}': {}", record.en, e),
            }
        }
        added
    }

    /// Write the dictionary atomically as pretty JSON
    pub fn save(&self) -> StoreResult<()> {
        let parent = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;

        let temp = NamedTempFile::new_in(parent).map_err(|e| io_error(parent, e))?;
        {
            let mut writer = BufWriter::new(temp.as_file());
            serde_json::to_writer_pretty(&mut writer, &self.entries)?;
            writer.flush().map_err(|e| io_error(&self.path, e))?;
        }
        temp.persist(&self.path)
            .map_err(|e| io_error(&self.path, e.error))?;
        Ok(())
    }
}

fn read_entries(path: &Path) -> StoreResult<Vec<Value>> {
    let content = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    parse_entries(&content)
}

fn parse_entries(json: &str) -> StoreResult<Vec<Value>> {
    match serde_json::from_str::<Value>(json)? {
        Value::Array(entries) => Ok(entries),
        _ => Err(StoreError::Format("root must be an array".to_string())),
    }
}

fn entry_words(entries: &[Value]) -> impl Iterator<Item = String> + '_ {
    entries
        .iter()
        .filter_map(|entry| entry.as_object())
        .map(|obj| {
            obj.get("en")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_lowercase()
        })
        .filter(|word| !word.is_empty())
}

fn known_from_entries(entries: &[Value]) -> KnownWords {
    entry_words(entries).collect()
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.display().to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::WordDetails;

    fn record(en: &str) -> EnrichedRecord {
        let details = WordDetails::new(vec![format!("meaning of {en}")], vec![], vec![]).unwrap();
        EnrichedRecord::new(en, vec!["অর্থ".to_string()], details)
    }

    #[test]
    fn test_load_collects_known_words() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dictionary.json");
        fs::write(
            &path,
            r#"[{"en": "River", "bn": ["নদী"], "extra": 1}, "junk", {"bn": []}]"#,
        )
        .unwrap();

        let store = DictionaryStore::load(&path).unwrap();
        assert_eq!(store.len(), 3);
        assert!(store.contains("river"));
        assert!(!store.contains("junk"));
    }

    #[test]
    fn test_load_rejects_non_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dictionary.json");
        fs::write(&path, r#"{"en": "river"}"#).unwrap();
        assert!(matches!(
            DictionaryStore::load(&path),
            Err(StoreError::Format(_))
        ));
    }

    #[test]
    fn test_load_or_empty_on_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dictionary.json");
        fs::write(&path, "not json").unwrap();
        let store = DictionaryStore::load_or_empty(&path);
        assert!(store.is_empty());
    }

    #[test]
    fn test_merge_skips_known_and_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = DictionaryStore::empty(dir.path().join("dictionary.json"));
        store.known_words().insert("river");

        let added = store.merge(vec![record("river"), record("study"), record("Study")]);
        assert_eq!(added, vec!["study"]);
        assert_eq!(store.len(), 1);
        assert!(store.contains("study"));
    }

    #[test]
    fn test_save_and_reload_preserves_unknown_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("dictionary.json");
        let mut store = DictionaryStore::empty(&path);
        store
            .replace_from_json(r#"[{"en": "river", "audio": "river.mp3"}]"#)
            .unwrap();
        store.merge(vec![record("study")]);
        store.save().unwrap();

        let loaded = DictionaryStore::load(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert!(loaded.contains("river"));
        assert!(loaded.contains("study"));

        let raw: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw[0]["audio"], "river.mp3");
        assert_eq!(raw[1]["def"][0], "meaning of study");
    }

    #[test]
    fn test_reload_grows_shared_known_set() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dictionary.json");
        let mut store = DictionaryStore::empty(&path);
        let known = store.known_words();

        fs::write(&path, r#"[{"en": "mountain"}]"#).unwrap();
        store.reload().unwrap();
        assert!(known.contains("mountain"));
        assert_eq!(store.len(), 1);
    }
}
