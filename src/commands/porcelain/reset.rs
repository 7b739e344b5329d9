use crate::areas::repository::Repository;

impl Repository {
    /// Move the current branch to an arbitrary commit and check it out
    ///
    /// Same safety rule as a branch checkout: no untracked working file may
    /// be in the way.
    pub async fn reset(&mut self, commit_prefix: &str) -> anyhow::Result<()> {
        let (target_oid, target) = self.resolve_commit(commit_prefix)?;

        let index = self.index();
        let mut index = index.lock().await;

        index.rehydrate()?;

        self.ensure_no_untracked_overwrite(&index)?;
        self.replace_working_tree(&target, &mut index)?;
        index.write_updates()?;

        self.refs().update_head_commit(&target_oid)?;

        Ok(())
    }
}
