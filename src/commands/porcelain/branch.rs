use crate::areas::repository::Repository;
use crate::artifacts::errors::GitletError;

impl Repository {
    /// Create a branch pointing at the current head
    pub async fn branch(&mut self, name: &str) -> anyhow::Result<()> {
        if self.refs().branch_exists(name) {
            return Err(GitletError::BranchExists.into());
        }

        let head_oid = self.head_oid()?;
        self.refs().write_branch(name, &head_oid)
    }

    /// Delete a branch; the active branch is protected
    pub async fn rm_branch(&mut self, name: &str) -> anyhow::Result<()> {
        if !self.refs().branch_exists(name) {
            return Err(GitletError::BranchMissing.into());
        }
        if self.refs().is_current_branch(name)? {
            return Err(GitletError::CannotRemoveCurrent.into());
        }

        self.refs().delete_branch(name)
    }
}
