use crate::areas::repository::Repository;
use crate::artifacts::errors::GitletError;

impl Repository {
    /// Forget a recorded remote
    pub async fn rm_remote(&mut self, name: &str) -> anyhow::Result<()> {
        if !self.remotes().exists(name) {
            return Err(GitletError::RemoteMissing.into());
        }

        self.remotes().remove(name)
    }
}
