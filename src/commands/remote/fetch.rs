use crate::areas::repository::Repository;
use crate::artifacts::errors::GitletError;

impl Repository {
    /// Copy a remote branch's history into the local store
    ///
    /// Brings over the branch head, its ancestors, and every blob they
    /// reference, then creates or moves the local tracking branch
    /// `<remote>/<branch>`.
    pub async fn fetch(&mut self, remote_name: &str, branch: &str) -> anyhow::Result<()> {
        let (remote_database, remote_refs) = self.open_remote(remote_name)?;

        if !remote_refs.branch_exists(branch) {
            return Err(GitletError::RemoteBranchMissing.into());
        }

        let remote_oid = remote_refs.read_branch(branch)?;
        remote_database.copy_ancestry_into(self.database(), &remote_oid)?;

        self.refs()
            .write_branch(&format!("{}/{}", remote_name, branch), &remote_oid)
    }
}
