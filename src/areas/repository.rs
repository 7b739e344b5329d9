//! Repository abstraction and coordination
//!
//! The `Repository` type is the facade every command goes through. It wires
//! together the lower-level areas (database, index, workspace, refs,
//! remotes) over one repository root and owns the output writer the
//! commands print to.

use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::remotes::Remotes;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Repository directory name
pub const GITLET_DIR: &str = ".gitlet";

/// Index file name
const INDEX_FILE: &str = "index";

/// Gitlet repository
///
/// Coordinates all repository operations. One instance is constructed per
/// CLI invocation, rooted at the current working directory.
pub struct Repository {
    /// Working tree root
    path: Box<Path>,
    /// Output writer (stdout in production, a buffer in tests)
    writer: RefCell<Box<dyn std::io::Write>>,
    /// Staging area
    index: Arc<Mutex<Index>>,
    /// Object database
    database: Database,
    /// Working directory
    workspace: Workspace,
    /// Branch references and HEAD
    refs: Refs,
    /// Remote records
    remotes: Remotes,
}

impl Repository {
    pub fn new(path: PathBuf, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = path.canonicalize()?;
        let gitlet_path = path.join(GITLET_DIR);

        let index = Index::new(gitlet_path.join(INDEX_FILE).into_boxed_path());
        let database = Database::new(gitlet_path.clone().into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(gitlet_path.clone().into_boxed_path());
        let remotes = Remotes::new(gitlet_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index: Arc::new(Mutex::new(index)),
            database,
            workspace,
            refs,
            remotes,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn gitlet_path(&self) -> PathBuf {
        self.path.join(GITLET_DIR)
    }

    /// Check whether a repository has been initialized here
    pub fn is_initialized(&self) -> bool {
        self.gitlet_path().is_dir()
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&self) -> Arc<Mutex<Index>> {
        self.index.clone()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn remotes(&self) -> &Remotes {
        &self.remotes
    }

    /// Load the head commit of the active branch
    pub fn head_commit(&self) -> anyhow::Result<Commit> {
        let oid = self.refs.read_head_oid()?;
        self.database.load_commit(&oid)
    }

    /// The active branch's head commit ID
    pub fn head_oid(&self) -> anyhow::Result<ObjectId> {
        self.refs.read_head_oid()
    }
}
