//! Staging area (index)
//!
//! The index tracks the changes queued for the next commit: an ordered map
//! of additions (path to blob ID) and a set of removals. A path is never in
//! both at once, and every successful commit clears the index.
//!
//! ## Index File Format
//!
//! One binary record at `.gitlet/index`:
//!
//! - Header: 4-byte signature, version, addition count, removal count
//! - Additions: length-prefixed path + 20-byte blob ID, in path order
//! - Removals: length-prefixed paths, in path order
//!
//! The record is rewritten wholesale through a temp file and a rename at the
//! end of each mutating operation.

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::{anyhow, Context};
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::collections::{BTreeMap, BTreeSet};
use std::io::{Cursor, Read, Write};
use std::path::Path;

/// Magic bytes identifying an index file
const SIGNATURE: &[u8; 4] = b"GLIX";

/// Current index format version
const VERSION: u32 = 1;

/// Staging area persisted as a single record
#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.gitlet/index`)
    path: Box<Path>,
    /// Paths staged for addition with their blob IDs
    additions: BTreeMap<String, ObjectId>,
    /// Paths staged for removal
    removals: BTreeSet<String>,
    /// Flag indicating unpersisted modifications
    changed: bool,
}

impl Index {
    /// Create a new empty index
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the index file (typically `.gitlet/index`)
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            additions: BTreeMap::new(),
            removals: BTreeSet::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the staging area from disk
    ///
    /// A missing or empty file hydrates to an empty staging area.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.additions.clear();
        self.removals.clear();
        self.changed = false;

        if !self.path.exists() {
            return Ok(());
        }

        let content = std::fs::read(&self.path)
            .with_context(|| format!("Unable to read index file {}", self.path.display()))?;
        if content.is_empty() {
            return Ok(());
        }

        let mut reader = Cursor::new(content);
        let (addition_count, removal_count) = self.parse_header(&mut reader)?;

        for _ in 0..addition_count {
            let path = read_path(&mut reader)?;
            let oid = ObjectId::read_h40_from(&mut reader)?;
            self.additions.insert(path, oid);
        }
        for _ in 0..removal_count {
            self.removals.insert(read_path(&mut reader)?);
        }

        Ok(())
    }

    /// Persist the staging area as one atomic record
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        if !self.changed {
            return Ok(());
        }

        let mut buffer = Vec::new();
        buffer.write_all(SIGNATURE)?;
        buffer.write_u32::<BigEndian>(VERSION)?;
        buffer.write_u32::<BigEndian>(self.additions.len() as u32)?;
        buffer.write_u32::<BigEndian>(self.removals.len() as u32)?;

        for (path, oid) in &self.additions {
            write_path(&mut buffer, path)?;
            oid.write_h40_to(&mut buffer)?;
        }
        for path in &self.removals {
            write_path(&mut buffer, path)?;
        }

        let index_dir = self
            .path
            .parent()
            .with_context(|| format!("Invalid index path {}", self.path.display()))?;
        let temp_path = index_dir.join(format!("tmp-index-{}", rand::random::<u32>()));

        std::fs::write(&temp_path, &buffer)
            .with_context(|| format!("Unable to write index file {}", temp_path.display()))?;
        std::fs::rename(&temp_path, &self.path)
            .with_context(|| format!("Unable to rename index file to {}", self.path.display()))?;

        self.changed = false;
        Ok(())
    }

    /// Write a fresh empty record, creating the index file
    pub fn initialize(&mut self) -> anyhow::Result<()> {
        self.additions.clear();
        self.removals.clear();
        self.changed = true;
        self.write_updates()
    }

    /// Stage a path for addition
    ///
    /// A path pending removal is merely revived: it leaves the removal set
    /// and no addition entry is created.
    pub fn stage_addition(&mut self, path: &str, oid: ObjectId) {
        if self.removals.remove(path) {
            self.changed = true;
            return;
        }

        self.additions.insert(path.to_string(), oid);
        self.changed = true;
    }

    /// Stage a path for removal, dropping any pending addition
    pub fn stage_removal(&mut self, path: &str) {
        self.additions.remove(path);
        self.removals.insert(path.to_string());
        self.changed = true;
    }

    /// Drop a pending addition
    pub fn unstage_addition(&mut self, path: &str) {
        if self.additions.remove(path).is_some() {
            self.changed = true;
        }
    }

    /// Drop a pending removal
    pub fn unstage_removal(&mut self, path: &str) {
        if self.removals.remove(path) {
            self.changed = true;
        }
    }

    /// Empty both stages
    pub fn clear(&mut self) {
        if !self.additions.is_empty() || !self.removals.is_empty() {
            self.changed = true;
        }
        self.additions.clear();
        self.removals.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }

    pub fn contains_addition(&self, path: &str) -> bool {
        self.additions.contains_key(path)
    }

    pub fn contains_removal(&self, path: &str) -> bool {
        self.removals.contains(path)
    }

    pub fn addition(&self, path: &str) -> Option<&ObjectId> {
        self.additions.get(path)
    }

    /// Pending additions in path order
    pub fn additions(&self) -> &BTreeMap<String, ObjectId> {
        &self.additions
    }

    /// Pending removals in path order
    pub fn removals(&self) -> &BTreeSet<String> {
        &self.removals
    }

    fn parse_header(&self, reader: &mut Cursor<Vec<u8>>) -> anyhow::Result<(u32, u32)> {
        let mut signature = [0u8; 4];
        reader.read_exact(&mut signature)?;
        if &signature != SIGNATURE {
            return Err(anyhow!("Invalid index file signature"));
        }

        let version = reader.read_u32::<BigEndian>()?;
        if version != VERSION {
            return Err(anyhow!("Unsupported index file version: {}", version));
        }

        let addition_count = reader.read_u32::<BigEndian>()?;
        let removal_count = reader.read_u32::<BigEndian>()?;
        Ok((addition_count, removal_count))
    }
}

fn write_path<W: Write>(writer: &mut W, path: &str) -> anyhow::Result<()> {
    writer.write_u32::<BigEndian>(path.len() as u32)?;
    writer.write_all(path.as_bytes())?;
    Ok(())
}

fn read_path<R: Read>(reader: &mut R) -> anyhow::Result<String> {
    let len = reader.read_u32::<BigEndian>()? as usize;
    let mut buffer = vec![0; len];
    reader.read_exact(&mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::proptest;

    fn oid(seed: u8) -> ObjectId {
        ObjectId::try_parse(format!("{:02x}", seed).repeat(20)).unwrap()
    }

    fn scratch_index() -> (assert_fs::TempDir, Index) {
        let dir = assert_fs::TempDir::new().expect("Failed to create temp dir");
        let index = Index::new(dir.path().join("index").into_boxed_path());
        (dir, index)
    }

    #[test]
    fn test_staging_area_round_trips_through_its_record() {
        let (_dir, mut index) = scratch_index();

        index.stage_addition("b.txt", oid(2));
        index.stage_addition("a.txt", oid(1));
        index.stage_removal("gone.txt");
        index.write_updates().unwrap();

        let mut reloaded = Index::new(index.path().to_path_buf().into_boxed_path());
        reloaded.rehydrate().unwrap();

        assert_eq!(reloaded.additions(), index.additions());
        assert_eq!(reloaded.removals(), index.removals());
    }

    #[test]
    fn test_staging_an_addition_revives_a_pending_removal() {
        let (_dir, mut index) = scratch_index();

        index.stage_removal("f.txt");
        index.stage_addition("f.txt", oid(1));

        // the removal is cancelled without creating an addition entry
        assert!(!index.contains_removal("f.txt"));
        assert!(!index.contains_addition("f.txt"));
        assert!(index.is_empty());
    }

    #[test]
    fn test_staging_a_removal_drops_the_pending_addition() {
        let (_dir, mut index) = scratch_index();

        index.stage_addition("f.txt", oid(1));
        index.stage_removal("f.txt");

        assert!(!index.contains_addition("f.txt"));
        assert!(index.contains_removal("f.txt"));
    }

    #[test]
    fn test_clear_empties_both_stages() {
        let (_dir, mut index) = scratch_index();

        index.stage_addition("a.txt", oid(1));
        index.stage_removal("b.txt");
        index.clear();

        assert!(index.is_empty());
    }

    #[test]
    fn test_missing_index_file_hydrates_to_an_empty_staging_area() {
        let (_dir, mut index) = scratch_index();

        index.rehydrate().unwrap();
        assert!(index.is_empty());
    }

    proptest! {
        #[test]
        fn test_no_path_is_ever_in_both_stages(operations in proptest::collection::vec(
            (proptest::bool::ANY, "[a-z]{1,8}"), 0..32,
        )) {
            let (_dir, mut index) = scratch_index();

            for (is_addition, path) in operations {
                if is_addition {
                    index.stage_addition(&path, oid(7));
                } else {
                    index.stage_removal(&path);
                }
            }

            for path in index.additions().keys() {
                assert!(!index.contains_removal(path));
            }
        }
    }
}
