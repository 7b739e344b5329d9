//! Command implementations
//!
//! Each verb lives in its own file as an `impl Repository` block. Porcelain
//! commands cover the local workflow; remote commands synchronize with other
//! repositories reachable by filesystem path.

pub mod porcelain;
pub mod remote;
