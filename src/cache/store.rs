//! Document storage behind the tiered cache.
//!
//! The cache only needs read, atomic overwrite, and an age check, so the
//! storage medium stays an implementation detail behind `DocumentStore`.

use super::key::CacheKey;
use log::warn;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

pub trait DocumentStore {
    /// Last stored document for the key, if any ever succeeded.
    fn load(&self, key: &CacheKey) -> Option<String>;

    /// Whole-document replacement; also resets the entry's age.
    fn store(&self, key: &CacheKey, document: &str) -> std::io::Result<()>;

    /// Time since the entry was last written. `None` when the entry is cold.
    fn age(&self, key: &CacheKey) -> Option<Duration>;
}

/// One JSON file per key; the file's mtime is the entry timestamp.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &CacheKey) -> PathBuf {
        self.dir.join(key.file_name())
    }
}

impl DocumentStore for FileStore {
    fn load(&self, key: &CacheKey) -> Option<String> {
        fs::read_to_string(self.path(key)).ok()
    }

    fn store(&self, key: &CacheKey, document: &str) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        // Write-then-rename so a concurrent reader never sees a torn entry.
        let path = self.path(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, document)?;
        fs::rename(&tmp, &path)
    }

    fn age(&self, key: &CacheKey) -> Option<Duration> {
        let modified = fs::metadata(self.path(key)).and_then(|m| m.modified()).ok()?;
        match SystemTime::now().duration_since(modified) {
            Ok(age) => Some(age),
            Err(e) => {
                warn!("cache entry {key} has a future mtime: {e}");
                Some(Duration::ZERO)
            }
        }
    }
}

/// In-memory store with controllable entry ages, for tests.
#[cfg(test)]
pub struct MemoryStore {
    entries: std::sync::Mutex<std::collections::HashMap<String, (String, Duration)>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: std::sync::Mutex::new(std::collections::HashMap::new()),
        }
    }

    /// Seed an entry that reads as `age` old.
    pub fn put_aged(&self, key: &CacheKey, document: &str, age: Duration) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.file_name(), (document.to_owned(), age));
    }
}

#[cfg(test)]
impl DocumentStore for MemoryStore {
    fn load(&self, key: &CacheKey) -> Option<String> {
        self.entries
            .lock()
            .unwrap()
            .get(&key.file_name())
            .map(|(doc, _)| doc.clone())
    }

    fn store(&self, key: &CacheKey, document: &str) -> std::io::Result<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.file_name(), (document.to_owned(), Duration::ZERO));
        Ok(())
    }

    fn age(&self, key: &CacheKey) -> Option<Duration> {
        self.entries
            .lock()
            .unwrap()
            .get(&key.file_name())
            .map(|(_, age)| *age)
    }
}
