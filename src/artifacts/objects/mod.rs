//! Store objects and their serialization
//!
//! The object store holds two kinds of content-addressed objects:
//!
//! - `blob`: an uninterpreted byte sequence (file contents)
//! - `commit`: a snapshot with metadata, a path-to-blob tree, and parent links
//!
//! Both are named by the SHA-1 digest of a deterministic binary encoding.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a hex-encoded object ID
pub const OBJECT_ID_LENGTH: usize = 40;
