use crate::areas::repository::Repository;
use crate::artifacts::errors::GitletError;

impl Repository {
    /// Unstage a file and, if the head commit tracks it, stage its removal
    /// and delete it from the working directory
    pub async fn rm(&mut self, path: &str) -> anyhow::Result<()> {
        let head = self.head_commit()?;

        let index = self.index();
        let mut index = index.lock().await;

        index.rehydrate()?;

        if !index.contains_addition(path) && !head.tracks(path) {
            return Err(GitletError::NothingToRemove.into());
        }

        index.unstage_addition(path);

        if head.tracks(path) {
            index.stage_removal(path);
            // deleting an already-absent file is fine
            self.workspace().remove_file(path)?;
        }

        index.write_updates()?;

        Ok(())
    }
}
