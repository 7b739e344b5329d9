//! User-facing error taxonomy
//!
//! Every operation failure the CLI reports is one of these variants; the
//! `Display` form is the exact message printed to the user. The front-end
//! prints the message on stdout and still exits 0, so scripts observing the
//! documented diagnostics keep working.

use thiserror::Error;

/// Closed set of user-facing failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GitletError {
    #[error("A Gitlet version-control system already exists in the current directory.")]
    AlreadyInitialized,

    #[error("File does not exist.")]
    FileMissing,

    #[error("No reason to remove the file.")]
    NothingToRemove,

    #[error("Please enter a commit message.")]
    EmptyMessage,

    #[error("No changes added to the commit.")]
    NoChanges,

    #[error("No commit with that id exists.")]
    CommitNotFound,

    #[error("File does not exist in that commit.")]
    FileNotInCommit,

    /// `checkout <branch>` wording
    #[error("No such branch exists.")]
    BranchNotFound,

    /// `rm-branch` / `merge` wording
    #[error("A branch with that name does not exist.")]
    BranchMissing,

    #[error("A branch with that name already exists.")]
    BranchExists,

    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch,

    #[error("Cannot remove the current branch.")]
    CannotRemoveCurrent,

    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedOverwrite,

    #[error("Found no commit with that message.")]
    NoMatch,

    #[error("You have uncommitted changes.")]
    UncommittedChanges,

    #[error("Cannot merge a branch with itself.")]
    SelfMerge,

    #[error("A remote with that name already exists.")]
    RemoteExists,

    #[error("A remote with that name does not exist.")]
    RemoteMissing,

    #[error("Remote directory not found.")]
    RemoteUnreachable,

    #[error("That remote does not have that branch.")]
    RemoteBranchMissing,

    #[error("Please pull down remote changes before pushing.")]
    RemoteAhead,
}
