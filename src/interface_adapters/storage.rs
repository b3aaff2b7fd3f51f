use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::domain::ports::SessionStorage;

// In-memory session storage for ephemeral runs and tests.
#[derive(Clone, Default)]
pub struct InMemorySessionStorage {
    pub values: Arc<Mutex<HashMap<String, String>>>,
}

impl SessionStorage for InMemorySessionStorage {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        let values = self.values.lock().map_err(|err| err.to_string())?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let mut values = self.values.lock().map_err(|err| err.to_string())?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        let mut values = self.values.lock().map_err(|err| err.to_string())?;
        values.remove(key);
        Ok(())
    }
}

/// Session storage kept in a small TOML file so a restart keeps the user
/// logged in.
///
/// The file is a flat table of string keys to string values. A file that
/// cannot be parsed fails reads, and is replaced on the next write.
#[derive(Clone, Debug)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, String> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => toml::from_str(&contents)
                .map_err(|err| format!("unreadable session file {}: {err}", self.path.display())),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(format!("failed to read {}: {err}", self.path.display())),
        }
    }

    // Writes start from the current table, or from scratch if it is unreadable.
    fn load_for_write(&self) -> BTreeMap<String, String> {
        self.load().unwrap_or_else(|err| {
            warn!(error = %err, "replacing unreadable session file");
            BTreeMap::new()
        })
    }

    fn store(&self, values: &BTreeMap<String, String>) -> Result<(), String> {
        if values.is_empty() {
            return match fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
                Err(err) => Err(format!("failed to remove {}: {err}", self.path.display())),
            };
        }

        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|err| format!("failed to create {}: {err}", parent.display()))?;
        }
        let contents = toml::to_string(values).map_err(|err| err.to_string())?;
        fs::write(&self.path, contents)
            .map_err(|err| format!("failed to write {}: {err}", self.path.display()))
    }
}

impl SessionStorage for FileSessionStorage {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        Ok(self.load()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let mut values = self.load_for_write();
        values.insert(key.to_string(), value.to_string());
        self.store(&values)
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        let mut values = self.load_for_write();
        if values.remove(key).is_none() && !self.path.exists() {
            return Ok(());
        }
        self.store(&values)
    }
}
