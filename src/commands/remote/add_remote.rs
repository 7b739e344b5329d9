use crate::areas::repository::Repository;
use crate::artifacts::errors::GitletError;

impl Repository {
    /// Record a remote repository under a name
    ///
    /// The path points at the other repository's root directory and is
    /// stored with separators normalized to the host convention.
    pub async fn add_remote(&mut self, name: &str, directory: &str) -> anyhow::Result<()> {
        if self.remotes().exists(name) {
            return Err(GitletError::RemoteExists.into());
        }

        self.remotes().add(name, directory)
    }
}
