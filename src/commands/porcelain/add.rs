use crate::areas::repository::Repository;
use crate::artifacts::errors::GitletError;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;

impl Repository {
    /// Stage a file for the next commit
    ///
    /// A file pending removal is merely revived. A file whose contents match
    /// the head commit's blob is never staged; a stale addition entry for it
    /// is dropped instead.
    pub async fn add(&mut self, path: &str) -> anyhow::Result<()> {
        let index = self.index();
        let mut index = index.lock().await;

        index.rehydrate()?;

        if index.contains_removal(path) {
            index.unstage_removal(path);
            index.write_updates()?;
            return Ok(());
        }

        if !self.workspace().file_exists(path) {
            return Err(GitletError::FileMissing.into());
        }

        let blob = Blob::new(self.workspace().read_file(path)?);
        let blob_oid = blob.object_id()?;

        let head = self.head_commit()?;
        if head.blob(path) == Some(&blob_oid) {
            // unmodified since the head commit; nothing to stage
            index.unstage_addition(path);
            index.write_updates()?;
            return Ok(());
        }

        self.database().store(&blob)?;
        index.stage_addition(path, blob_oid);
        index.write_updates()?;

        Ok(())
    }
}
