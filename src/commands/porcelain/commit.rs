use crate::areas::repository::Repository;
use crate::artifacts::errors::GitletError;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    /// Record the staged changes as a new commit on the current branch
    pub async fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        self.write_commit(message, None).await
    }

    /// Shared commit write path, also used by merge
    ///
    /// The new tree is the head tree with additions layered on top and
    /// removals taken out. The commit is stored before the branch moves,
    /// and the staging area is cleared afterwards.
    pub(crate) async fn write_commit(
        &mut self,
        message: &str,
        second_parent: Option<ObjectId>,
    ) -> anyhow::Result<()> {
        if message.is_empty() {
            return Err(GitletError::EmptyMessage.into());
        }

        let head_oid = self.head_oid()?;
        let head = self.database().load_commit(&head_oid)?;

        let index = self.index();
        let mut index = index.lock().await;

        index.rehydrate()?;

        if index.is_empty() {
            return Err(GitletError::NoChanges.into());
        }

        let mut tree = head.tree().clone();
        for (path, blob_oid) in index.additions() {
            tree.insert(path.clone(), blob_oid.clone());
        }
        for path in index.removals() {
            tree.remove(path);
        }

        let commit = Commit::new(message.to_string(), tree, Some(head_oid), second_parent);
        let commit_oid = self.database().store(&commit)?;

        self.refs().update_head_commit(&commit_oid)?;

        index.clear();
        index.write_updates()?;

        Ok(())
    }
}
