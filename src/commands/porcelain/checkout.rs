use crate::areas::database::PrefixLookup;
use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::errors::GitletError;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    /// `checkout -- <path>`: restore a file from the head commit
    pub async fn checkout_file(&mut self, path: &str) -> anyhow::Result<()> {
        let head = self.head_commit()?;
        self.restore_file_from(&head, path)
    }

    /// `checkout <commit> -- <path>`: restore a file from a named commit
    ///
    /// The commit may be abbreviated to any unique prefix.
    pub async fn checkout_file_at(
        &mut self,
        commit_prefix: &str,
        path: &str,
    ) -> anyhow::Result<()> {
        let (_, commit) = self.resolve_commit(commit_prefix)?;
        self.restore_file_from(&commit, path)
    }

    /// `checkout <branch>`: make another branch current
    ///
    /// The untracked-file scan completes before anything is written; only
    /// then is the working directory replaced with the target's tree, the
    /// staging area cleared, and HEAD repointed.
    pub async fn checkout_branch(&mut self, name: &str) -> anyhow::Result<()> {
        if !self.refs().branch_exists(name) {
            return Err(GitletError::BranchNotFound.into());
        }
        if self.refs().is_current_branch(name)? {
            return Err(GitletError::AlreadyOnBranch.into());
        }

        let target_oid = self.refs().read_branch(name)?;
        let target = self.database().load_commit(&target_oid)?;

        let index = self.index();
        let mut index = index.lock().await;

        index.rehydrate()?;

        self.ensure_no_untracked_overwrite(&index)?;
        self.replace_working_tree(&target, &mut index)?;
        index.write_updates()?;

        self.refs().set_head(name)?;

        Ok(())
    }

    /// Fail when any working file is invisible to both the head commit and
    /// the staging area
    pub(crate) fn ensure_no_untracked_overwrite(&self, index: &Index) -> anyhow::Result<()> {
        let head = self.head_commit()?;

        for name in self.workspace().list_files()? {
            if !head.tracks(&name) && !index.contains_addition(&name) {
                return Err(GitletError::UntrackedOverwrite.into());
            }
        }

        Ok(())
    }

    /// Make the working directory exactly match a commit's tree
    pub(crate) fn replace_working_tree(
        &self,
        target: &Commit,
        index: &mut Index,
    ) -> anyhow::Result<()> {
        for (path, blob_oid) in target.tree() {
            let blob = self.database().load_blob(blob_oid)?;
            self.workspace().write_file(path, blob.content())?;
        }

        for name in self.workspace().list_files()? {
            if !target.tracks(&name) {
                self.workspace().remove_file(&name)?;
            }
        }

        index.clear();

        Ok(())
    }

    /// Resolve a possibly-abbreviated commit ID
    ///
    /// Collisions surface the same way as misses.
    pub(crate) fn resolve_commit(&self, prefix: &str) -> anyhow::Result<(ObjectId, Commit)> {
        match self.database().resolve_commit_prefix(prefix)? {
            PrefixLookup::Found(oid) => {
                let commit = self.database().load_commit(&oid)?;
                Ok((oid, commit))
            }
            PrefixLookup::NotFound | PrefixLookup::Ambiguous => {
                Err(GitletError::CommitNotFound.into())
            }
        }
    }

    fn restore_file_from(&self, commit: &Commit, path: &str) -> anyhow::Result<()> {
        let blob_oid = commit
            .blob(path)
            .ok_or(GitletError::FileNotInCommit)?;
        let blob = self.database().load_blob(blob_oid)?;

        self.workspace().write_file(path, blob.content())
    }
}
