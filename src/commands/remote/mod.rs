//! Remote synchronization commands
//!
//! Remotes are other repositories on the local filesystem with the same
//! layout. `push` and `fetch` open the remote's object store and refs
//! directly and copy objects between the two stores; `pull` is a fetch
//! followed by a merge of the tracking branch.

pub mod add_remote;
pub mod fetch;
pub mod pull;
pub mod push;
pub mod rm_remote;
