use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::areas::repository::Repository;
use crate::artifacts::errors::GitletError;

impl Repository {
    /// Append the current head to a remote branch
    ///
    /// A missing remote branch is created outright and receives the full
    /// ancestry of the local head. Otherwise the remote's commit must sit in
    /// the local first-parent history; everything above it (with the blobs
    /// those commits reference) is copied over before the remote ref moves.
    pub async fn push(&mut self, remote_name: &str, branch: &str) -> anyhow::Result<()> {
        let (remote_database, remote_refs) = self.open_remote(remote_name)?;

        let head_oid = self.head_oid()?;

        if !remote_refs.branch_exists(branch) {
            self.database()
                .copy_ancestry_into(&remote_database, &head_oid)?;
            return remote_refs.write_branch(branch, &head_oid);
        }

        let remote_oid = remote_refs.read_branch(branch)?;

        let mut missing = Vec::new();
        let mut cursor = Some(head_oid.clone());
        let mut found = false;
        while let Some(oid) = cursor {
            if oid == remote_oid {
                found = true;
                break;
            }
            cursor = self.database().load_commit(&oid)?.parent().cloned();
            missing.push(oid);
        }

        if !found {
            return Err(GitletError::RemoteAhead.into());
        }

        // oldest first, so the remote store never references an absent parent
        for oid in missing.iter().rev() {
            self.database().copy_commit_into(&remote_database, oid)?;
        }

        remote_refs.write_branch(branch, &head_oid)
    }

    /// Open a recorded remote's object store and refs
    ///
    /// The record must exist and its path must still be a directory.
    pub(crate) fn open_remote(&self, name: &str) -> anyhow::Result<(Database, Refs)> {
        if !self.remotes().exists(name) {
            return Err(GitletError::RemoteUnreachable.into());
        }

        let remote_root = self.remotes().read(name)?;
        if !remote_root.is_dir() {
            return Err(GitletError::RemoteUnreachable.into());
        }

        let database = Database::new(remote_root.clone().into_boxed_path());
        let refs = Refs::new(remote_root.into_boxed_path());
        Ok((database, refs))
    }
}
