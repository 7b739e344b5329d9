use crate::areas::repository::Repository;
use crate::artifacts::errors::GitletError;
use std::io::Write;

impl Repository {
    /// Print the IDs of every commit whose message matches exactly
    pub async fn find(&mut self, message: &str) -> anyhow::Result<()> {
        let mut found = false;

        for (oid, commit) in self.database().iter_commits()? {
            if commit.message() == message {
                writeln!(self.writer(), "{}", oid)?;
                found = true;
            }
        }

        if !found {
            return Err(GitletError::NoMatch.into());
        }

        Ok(())
    }
}
