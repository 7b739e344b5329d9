//! Working directory adapter
//!
//! The working tree is flat: tracked files are plain files directly in the
//! user's directory, and the repository directory itself is the only entry
//! excluded from enumeration.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::path::Path;
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 1] = [".gitlet"];

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// List the plain files in the working directory, in name order
    pub fn list_files(&self) -> anyhow::Result<Vec<String>> {
        let mut files = WalkDir::new(&self.path)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().to_string();
                if IGNORED_PATHS.contains(&name.as_str()) {
                    None
                } else {
                    Some(name)
                }
            })
            .collect::<Vec<_>>();

        files.sort();
        Ok(files)
    }

    /// Map every working file to the blob ID of its current contents
    pub fn snapshot(&self) -> anyhow::Result<BTreeMap<String, ObjectId>> {
        let mut snapshot = BTreeMap::new();

        for name in self.list_files()? {
            let blob = Blob::new(self.read_file(&name)?);
            snapshot.insert(name, blob.object_id()?);
        }

        Ok(snapshot)
    }

    pub fn file_exists(&self, name: &str) -> bool {
        self.path.join(name).is_file()
    }

    pub fn read_file(&self, name: &str) -> anyhow::Result<Bytes> {
        let file_path = self.path.join(name);

        let content = std::fs::read(&file_path)
            .with_context(|| format!("Unable to read file {}", file_path.display()))?;

        Ok(Bytes::from(content))
    }

    pub fn write_file(&self, name: &str, content: &[u8]) -> anyhow::Result<()> {
        let file_path = self.path.join(name);

        std::fs::write(&file_path, content)
            .with_context(|| format!("Unable to write file {}", file_path.display()))
    }

    /// Delete a working file; already-absent files are not an error
    pub fn remove_file(&self, name: &str) -> anyhow::Result<()> {
        let file_path = self.path.join(name);

        if file_path.exists() {
            std::fs::remove_file(&file_path)
                .with_context(|| format!("Unable to delete file {}", file_path.display()))?;
        }

        Ok(())
    }
}
