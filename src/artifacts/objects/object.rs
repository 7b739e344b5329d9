//! Core object traits
//!
//! This module defines the traits shared by both object kinds:
//! - `Packable`: serialization to the on-disk binary format
//! - `Unpackable`: deserialization from that format
//! - `Object`: common operations (ID computation, kind tag)
//!
//! The object ID is the SHA-1 digest of the object's *hash source*, which by
//! default is its serialized form. Commits override the hash source so that
//! the ID covers `(message, timestamp, nonce, tree, parent)` and nothing
//! else.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Result;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::BufRead;

/// Trait for serializing objects to the on-disk binary format
pub trait Packable {
    /// Serialize the object to bytes
    fn serialize(&self) -> Result<Bytes>;
}

/// Trait for deserializing objects from the on-disk binary format
pub trait Unpackable {
    /// Deserialize the object from a reader
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

/// Core store object trait
///
/// Implemented by both object kinds (Blob, Commit).
pub trait Object: Packable {
    /// Get the object's kind
    fn object_type(&self) -> ObjectType;

    /// The byte sequence the object ID is computed over
    ///
    /// Defaults to the serialized form.
    fn hash_source(&self) -> Result<Bytes> {
        self.serialize()
    }

    /// Compute the object ID (SHA-1 of the hash source)
    fn object_id(&self) -> Result<ObjectId> {
        let content = self.hash_source()?;
        let mut hasher = Sha1::new();
        hasher.update(&content);

        let oid = hasher.finalize();
        ObjectId::try_parse(format!("{oid:x}"))
    }
}
