use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use super::form::CareerFormData;

/// What gets written under the draft key
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub form_data: CareerFormData,
    pub step: u8,
}

/// Key-value storage for unfinished wizard drafts
pub trait DraftStore: Send + Sync {
    fn load(&self, key: &str) -> io::Result<Option<String>>;
    fn save(&self, key: &str, value: &str) -> io::Result<()>;
    fn remove(&self, key: &str) -> io::Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryDraftStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> io::Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| io::Error::other("draft store lock poisoned"))
    }
}

impl DraftStore for MemoryDraftStore {
    fn load(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> io::Result<()> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        self.entries()?.remove(key);
        Ok(())
    }
}

/// One JSON file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileDraftStore {
    dir: PathBuf,
}

impl FileDraftStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path(&self, key: &str) -> PathBuf {
        let file: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", file))
    }
}

impl DraftStore for FileDraftStore {
    fn load(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.path(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn save(&self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(key), value)
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        match fs::remove_file(self.path(key)) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("career-drafts-{}-{}", name, uuid::Uuid::new_v4()))
    }

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryDraftStore::new();
        assert_eq!(store.load("k").unwrap(), None);

        store.save("k", "{}").unwrap();
        assert_eq!(store.load("k").unwrap().as_deref(), Some("{}"));

        store.remove("k").unwrap();
        assert_eq!(store.load("k").unwrap(), None);
    }

    #[test]
    fn file_store_round_trip() {
        let dir = temp_dir("roundtrip");
        let store = FileDraftStore::new(&dir);
        assert_eq!(store.load("career_form_draft").unwrap(), None);

        store.save("career_form_draft", r#"{"step":2}"#).unwrap();
        assert!(dir.join("career_form_draft.json").exists());
        assert_eq!(
            store.load("career_form_draft").unwrap().as_deref(),
            Some(r#"{"step":2}"#)
        );

        store.remove("career_form_draft").unwrap();
        store.remove("career_form_draft").unwrap();
        assert_eq!(store.load("career_form_draft").unwrap(), None);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn file_store_keeps_keys_inside_its_directory() {
        let store = FileDraftStore::new("/tmp/drafts");
        assert_eq!(store.path("../etc/passwd"), PathBuf::from("/tmp/drafts/___etc_passwd.json"));
    }

    #[test]
    fn draft_uses_camel_case_keys() {
        let draft = Draft {
            form_data: CareerFormData::default(),
            step: 3,
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["step"], 3);
        assert_eq!(value["formData"]["employmentType"], "Full-Time");
    }
}
