//! Commit object
//!
//! Commits are immutable snapshots. They contain:
//! - A log message
//! - A formatted timestamp (the initial commit pins the Unix epoch)
//! - A tree mapping file paths to blob IDs, ordered by path
//! - Up to two parent commit IDs (two for merge commits)
//! - A uniqueness nonce, so re-creating a commit with identical metadata in
//!   the same second still yields a distinct ID
//!
//! The commit's ID is the SHA-1 of the binary encoding of
//! `(message, timestamp, nonce, tree, parent)`. The second parent is **not**
//! part of the hash source, but it does round-trip through serialization.

use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::{BufRead, Read, Write};

/// Ordered mapping from file path to blob ID
pub type FileTree = BTreeMap<String, ObjectId>;

/// Timestamp format: weekday, month, zero-padded day, time, year
const TIMESTAMP_FORMAT: &str = "%a %b %d %H:%M:%S %Y";

/// Timestamp of the initial commit
const EPOCH_TIMESTAMP: &str = "Thu Jan 01 00:00:00 1970";

/// Log message of the initial commit
pub const INITIAL_COMMIT_MESSAGE: &str = "initial commit";

/// Commit object
///
/// A snapshot of the working tree with metadata and history links.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Log message
    message: String,
    /// Formatted creation time
    timestamp: String,
    /// Uniqueness nonce, fixed at construction
    nonce: u32,
    /// Tracked files and their content blobs
    tree: FileTree,
    /// First parent (absent only for the initial commit)
    parent: Option<ObjectId>,
    /// Second parent (present iff this is a merge commit)
    second_parent: Option<ObjectId>,
}

impl Commit {
    /// Create a new commit stamped with the current wall-clock time
    ///
    /// # Arguments
    ///
    /// * `message` - Log message
    /// * `tree` - Snapshot of tracked files
    /// * `parent` - First parent commit ID
    /// * `second_parent` - Second parent for merge commits
    pub fn new(
        message: String,
        tree: FileTree,
        parent: Option<ObjectId>,
        second_parent: Option<ObjectId>,
    ) -> Self {
        let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();

        Commit {
            message,
            timestamp,
            nonce: rand::random::<u32>(),
            tree,
            parent,
            second_parent,
        }
    }

    /// Create the initial commit: empty tree, no parents, epoch timestamp
    pub fn initial() -> Self {
        Commit {
            message: INITIAL_COMMIT_MESSAGE.to_string(),
            timestamp: EPOCH_TIMESTAMP.to_string(),
            nonce: rand::random::<u32>(),
            tree: FileTree::new(),
            parent: None,
            second_parent: None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn tree(&self) -> &FileTree {
        &self.tree
    }

    /// Get the blob ID tracked for a path, if any
    pub fn blob(&self, path: &str) -> Option<&ObjectId> {
        self.tree.get(path)
    }

    /// Check whether the commit tracks the given path
    pub fn tracks(&self, path: &str) -> bool {
        self.tree.contains_key(path)
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn second_parent(&self) -> Option<&ObjectId> {
        self.second_parent.as_ref()
    }

    /// Both parents, first parent first
    pub fn parents(&self) -> Vec<&ObjectId> {
        self.parent
            .iter()
            .chain(self.second_parent.iter())
            .collect()
    }

    /// Encode the commit fields in their defined order
    ///
    /// The hash source stops before the second parent; the storage form
    /// carries it.
    fn encode(&self, include_second_parent: bool) -> anyhow::Result<Bytes> {
        let mut buffer = Vec::new();

        write_string(&mut buffer, &self.message)?;
        write_string(&mut buffer, &self.timestamp)?;
        buffer.write_u32::<BigEndian>(self.nonce)?;

        buffer.write_u32::<BigEndian>(self.tree.len() as u32)?;
        for (path, oid) in &self.tree {
            write_string(&mut buffer, path)?;
            oid.write_h40_to(&mut buffer)?;
        }

        write_optional_oid(&mut buffer, self.parent.as_ref())?;
        if include_second_parent {
            write_optional_oid(&mut buffer, self.second_parent.as_ref())?;
        }

        Ok(Bytes::from(buffer))
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        self.encode(true)
    }
}

impl Unpackable for Commit {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let message = read_string(&mut reader).context("Invalid commit record: message")?;
        let timestamp = read_string(&mut reader).context("Invalid commit record: timestamp")?;
        let nonce = reader
            .read_u32::<BigEndian>()
            .context("Invalid commit record: nonce")?;

        let entry_count = reader
            .read_u32::<BigEndian>()
            .context("Invalid commit record: tree size")?;
        let mut tree = FileTree::new();
        for _ in 0..entry_count {
            let path = read_string(&mut reader).context("Invalid commit record: tree path")?;
            let oid = ObjectId::read_h40_from(&mut reader)
                .context("Invalid commit record: tree blob id")?;
            tree.insert(path, oid);
        }

        let parent = read_optional_oid(&mut reader).context("Invalid commit record: parent")?;
        let second_parent =
            read_optional_oid(&mut reader).context("Invalid commit record: second parent")?;

        Ok(Commit {
            message,
            timestamp,
            nonce,
            tree,
            parent,
            second_parent,
        })
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn hash_source(&self) -> anyhow::Result<Bytes> {
        self.encode(false)
    }
}

fn write_string<W: Write>(writer: &mut W, value: &str) -> anyhow::Result<()> {
    writer.write_u32::<BigEndian>(value.len() as u32)?;
    writer.write_all(value.as_bytes())?;
    Ok(())
}

fn read_string<R: Read>(reader: &mut R) -> anyhow::Result<String> {
    let len = reader.read_u32::<BigEndian>()? as usize;
    let mut buffer = vec![0; len];
    reader.read_exact(&mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_optional_oid<W: Write>(writer: &mut W, oid: Option<&ObjectId>) -> anyhow::Result<()> {
    match oid {
        Some(oid) => {
            writer.write_u8(1)?;
            oid.write_h40_to(writer)
        }
        None => {
            writer.write_u8(0)?;
            Ok(())
        }
    }
}

fn read_optional_oid<R: Read>(reader: &mut R) -> anyhow::Result<Option<ObjectId>> {
    match reader.read_u8()? {
        0 => Ok(None),
        _ => Ok(Some(ObjectId::read_h40_from(reader)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn oid(seed: u8) -> ObjectId {
        ObjectId::try_parse(format!("{:02x}", seed).repeat(20)).unwrap()
    }

    #[test]
    fn test_initial_commit_has_epoch_timestamp_and_no_parents() {
        let commit = Commit::initial();

        assert_eq!(commit.message(), "initial commit");
        assert_eq!(commit.timestamp(), "Thu Jan 01 00:00:00 1970");
        assert!(commit.tree().is_empty());
        assert!(commit.parent().is_none());
        assert!(commit.second_parent().is_none());
    }

    #[test]
    fn test_commit_round_trips_through_serialization() {
        let mut tree = FileTree::new();
        tree.insert("a.txt".to_string(), oid(0xaa));
        tree.insert("b.txt".to_string(), oid(0xbb));

        let commit = Commit::new(
            "Merged other into master.".to_string(),
            tree,
            Some(oid(0x01)),
            Some(oid(0x02)),
        );

        let bytes = commit.serialize().unwrap();
        let restored = Commit::deserialize(std::io::Cursor::new(bytes)).unwrap();

        assert_eq!(restored, commit);
        assert_eq!(
            restored.object_id().unwrap(),
            commit.object_id().unwrap()
        );
    }

    #[test]
    fn test_identical_metadata_yields_distinct_ids() {
        let first = Commit::new("same".to_string(), FileTree::new(), Some(oid(0x01)), None);
        let second = Commit::new("same".to_string(), FileTree::new(), Some(oid(0x01)), None);

        // the nonce keeps re-creations apart even within one second
        assert_ne!(first.object_id().unwrap(), second.object_id().unwrap());
    }

    #[test]
    fn test_second_parent_is_not_part_of_the_hash_source() {
        let plain = Commit::new("m".to_string(), FileTree::new(), Some(oid(0x01)), None);

        let mut merged = plain.clone();
        merged.second_parent = Some(oid(0x02));

        assert_eq!(
            plain.object_id().unwrap(),
            merged.object_id().unwrap()
        );
        assert_ne!(plain, merged);
    }

    #[test]
    fn test_tree_order_does_not_affect_the_encoding() {
        let mut forward = FileTree::new();
        forward.insert("a.txt".to_string(), oid(0xaa));
        forward.insert("z.txt".to_string(), oid(0xcc));

        let mut backward = FileTree::new();
        backward.insert("z.txt".to_string(), oid(0xcc));
        backward.insert("a.txt".to_string(), oid(0xaa));

        let left = Commit::new("m".to_string(), forward, None, None);
        let mut right = left.clone();
        right.tree = backward;

        assert_eq!(
            left.serialize().unwrap(),
            right.serialize().unwrap()
        );
    }
}
