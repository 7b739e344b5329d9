use crate::areas::refs::DEFAULT_BRANCH;
use crate::areas::repository::Repository;
use crate::artifacts::errors::GitletError;
use crate::artifacts::objects::commit::Commit;
use anyhow::Context;
use std::fs;

impl Repository {
    /// Initialize a repository in the working directory
    ///
    /// Creates the repository layout, writes the initial commit (empty tree,
    /// epoch timestamp), and points a fresh `master` branch at it.
    pub async fn init(&mut self) -> anyhow::Result<()> {
        let gitlet_path = self.gitlet_path();
        if gitlet_path.exists() {
            return Err(GitletError::AlreadyInitialized.into());
        }

        fs::create_dir_all(&gitlet_path)
            .context("Failed to create repository directory")?;
        fs::create_dir_all(self.refs().refs_path()).context("Failed to create refs directory")?;
        fs::create_dir_all(gitlet_path.join("commits"))
            .context("Failed to create commits directory")?;
        fs::create_dir_all(gitlet_path.join("blobs"))
            .context("Failed to create blobs directory")?;
        fs::create_dir_all(self.remotes().remotes_path())
            .context("Failed to create remotes directory")?;

        {
            let index = self.index();
            let mut index = index.lock().await;
            index.initialize()?;
        }

        // the commit lands in the store before any ref points at it
        let initial = Commit::initial();
        let initial_oid = self.database().store(&initial)?;

        self.refs().write_branch(DEFAULT_BRANCH, &initial_oid)?;
        self.refs().set_head(DEFAULT_BRANCH)?;

        Ok(())
    }
}
