//! Remote repository records
//!
//! A remote is a name mapped to the filesystem path of another repository's
//! root directory (its `.gitlet`). Records are plain files under
//! `.gitlet/remotes`, one per remote, holding the path as text.

use anyhow::Context;
use derive_new::new;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

/// Remote record store rooted at the repository directory
#[derive(Debug, new)]
pub struct Remotes {
    /// Path to the repository root (typically `.gitlet`)
    path: Box<Path>,
}

impl Remotes {
    pub fn remotes_path(&self) -> PathBuf {
        self.path.join("remotes")
    }

    fn record_path(&self, name: &str) -> PathBuf {
        self.remotes_path().join(name)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.record_path(name).is_file()
    }

    /// Record a remote, normalizing separators to the host convention
    pub fn add(&self, name: &str, directory: &str) -> anyhow::Result<()> {
        let separator = MAIN_SEPARATOR.to_string();
        let directory = directory
            .replace('/', &separator)
            .replace('\\', &separator);

        let record_path = self.record_path(name);
        std::fs::write(&record_path, directory)
            .with_context(|| format!("Unable to write remote record {}", record_path.display()))
    }

    pub fn remove(&self, name: &str) -> anyhow::Result<()> {
        let record_path = self.record_path(name);
        std::fs::remove_file(&record_path)
            .with_context(|| format!("Unable to delete remote record {}", record_path.display()))
    }

    /// Read the recorded repository path of a remote
    pub fn read(&self, name: &str) -> anyhow::Result<PathBuf> {
        let record_path = self.record_path(name);
        let content = std::fs::read_to_string(&record_path)
            .with_context(|| format!("Unable to read remote record {}", record_path.display()))?;
        Ok(PathBuf::from(content.trim()))
    }
}
