//! Branch references and HEAD
//!
//! Branches are plain files under `.gitlet/refs`, one per branch, each
//! holding the 40-hex ID of the commit the branch points at. Remote-tracking
//! branches nest one level deeper, at `refs/<remote>/<branch>`.
//!
//! `HEAD` is a text file holding the path of the active branch's ref file;
//! moving the current branch always goes through that file.

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use std::path::{Path, PathBuf};

/// Name of the branch created by `init`
pub const DEFAULT_BRANCH: &str = "master";

/// Reference manager rooted at the repository directory
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the repository root (typically `.gitlet`)
    path: Box<Path>,
}

impl Refs {
    pub fn refs_path(&self) -> PathBuf {
        self.path.join("refs")
    }

    pub fn head_path(&self) -> PathBuf {
        self.path.join("HEAD")
    }

    /// Path of a branch's ref file; nested names map to nested directories
    pub fn branch_path(&self, name: &str) -> PathBuf {
        self.refs_path().join(name)
    }

    pub fn branch_exists(&self, name: &str) -> bool {
        self.branch_path(name).is_file()
    }

    /// Read the commit ID a branch points at
    pub fn read_branch(&self, name: &str) -> anyhow::Result<ObjectId> {
        self.read_ref_file(&self.branch_path(name))
    }

    /// Point a branch at a commit, creating the ref file if needed
    pub fn write_branch(&self, name: &str, oid: &ObjectId) -> anyhow::Result<()> {
        let branch_path = self.branch_path(name);

        // nested (remote-tracking) refs need their parent directory
        let parent = branch_path
            .parent()
            .with_context(|| format!("Invalid branch path {}", branch_path.display()))?;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Unable to create ref directory {}", parent.display()))?;

        std::fs::write(&branch_path, oid.as_ref())
            .with_context(|| format!("Unable to write ref file {}", branch_path.display()))
    }

    pub fn delete_branch(&self, name: &str) -> anyhow::Result<()> {
        let branch_path = self.branch_path(name);
        std::fs::remove_file(&branch_path)
            .with_context(|| format!("Unable to delete ref file {}", branch_path.display()))
    }

    /// List top-level branch names
    ///
    /// Remote-tracking branches live in subdirectories and are deliberately
    /// not listed; they remain valid checkout and merge targets.
    pub fn list_branches(&self) -> anyhow::Result<Vec<String>> {
        let refs_path = self.refs_path();
        let mut names = Vec::new();

        for entry in std::fs::read_dir(&refs_path)
            .with_context(|| format!("Unable to read refs directory {}", refs_path.display()))?
        {
            let entry = entry?;
            if entry.path().is_file() {
                names.push(entry.file_name().to_string_lossy().to_string());
            }
        }

        Ok(names)
    }

    /// Make `name` the active branch
    pub fn set_head(&self, name: &str) -> anyhow::Result<()> {
        let branch_path = self.branch_path(name);
        std::fs::write(self.head_path(), branch_path.display().to_string())
            .with_context(|| "Unable to write HEAD".to_string())
    }

    /// Path of the active branch's ref file
    pub fn head_branch_file(&self) -> anyhow::Result<PathBuf> {
        let content = std::fs::read_to_string(self.head_path())
            .with_context(|| "Unable to read HEAD".to_string())?;
        Ok(PathBuf::from(content.trim()))
    }

    /// Display name of the active branch (the ref file's name)
    pub fn head_branch_name(&self) -> anyhow::Result<String> {
        let branch_file = self.head_branch_file()?;
        let name = branch_file
            .file_name()
            .with_context(|| format!("Invalid HEAD target {}", branch_file.display()))?;
        Ok(name.to_string_lossy().to_string())
    }

    /// Check whether a branch name refers to the active branch
    pub fn is_current_branch(&self, name: &str) -> anyhow::Result<bool> {
        Ok(self.branch_path(name) == self.head_branch_file()?)
    }

    /// Read the commit ID the active branch points at
    pub fn read_head_oid(&self) -> anyhow::Result<ObjectId> {
        let branch_file = self.head_branch_file()?;
        self.read_ref_file(&branch_file)
    }

    /// Move the active branch to a commit
    pub fn update_head_commit(&self, oid: &ObjectId) -> anyhow::Result<()> {
        let branch_file = self.head_branch_file()?;
        std::fs::write(&branch_file, oid.as_ref())
            .with_context(|| format!("Unable to write ref file {}", branch_file.display()))
    }

    fn read_ref_file(&self, path: &Path) -> anyhow::Result<ObjectId> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Unable to read ref file {}", path.display()))?;
        ObjectId::try_parse(content.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oid(seed: u8) -> ObjectId {
        ObjectId::try_parse(format!("{:02x}", seed).repeat(20)).unwrap()
    }

    fn scratch_refs() -> (assert_fs::TempDir, Refs) {
        let dir = assert_fs::TempDir::new().expect("Failed to create temp dir");
        let refs = Refs::new(dir.path().to_path_buf().into_boxed_path());
        std::fs::create_dir_all(refs.refs_path()).unwrap();
        (dir, refs)
    }

    #[test]
    fn test_branch_write_and_read_round_trip() {
        let (_dir, refs) = scratch_refs();

        refs.write_branch("master", &oid(1)).unwrap();
        assert!(refs.branch_exists("master"));
        assert_eq!(refs.read_branch("master").unwrap(), oid(1));
    }

    #[test]
    fn test_nested_remote_tracking_branch_gets_its_directory() {
        let (_dir, refs) = scratch_refs();

        refs.write_branch("origin/master", &oid(2)).unwrap();
        assert!(refs.branch_exists("origin/master"));
        assert_eq!(refs.read_branch("origin/master").unwrap(), oid(2));
    }

    #[test]
    fn test_list_branches_skips_nested_refs() {
        let (_dir, refs) = scratch_refs();

        refs.write_branch("master", &oid(1)).unwrap();
        refs.write_branch("other", &oid(2)).unwrap();
        refs.write_branch("origin/master", &oid(3)).unwrap();

        let mut names = refs.list_branches().unwrap();
        names.sort();
        assert_eq!(names, vec!["master", "other"]);
    }

    #[test]
    fn test_head_tracks_the_active_branch() {
        let (_dir, refs) = scratch_refs();

        refs.write_branch("master", &oid(1)).unwrap();
        refs.set_head("master").unwrap();

        assert_eq!(refs.head_branch_name().unwrap(), "master");
        assert!(refs.is_current_branch("master").unwrap());
        assert_eq!(refs.read_head_oid().unwrap(), oid(1));

        refs.update_head_commit(&oid(9)).unwrap();
        assert_eq!(refs.read_branch("master").unwrap(), oid(9));
    }
}
