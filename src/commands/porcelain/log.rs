use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// Print the first-parent history of the current head, newest first
    ///
    /// Second parents are listed on the `Merge:` line of merge commits but
    /// are not followed.
    pub async fn log(&mut self) -> anyhow::Result<()> {
        let mut current = Some(self.head_oid()?);

        while let Some(oid) = current {
            let commit = self.database().load_commit(&oid)?;
            self.print_commit_block(&oid, &commit)?;

            current = commit.parent().cloned();
        }

        Ok(())
    }

    /// Print every commit in the store, in no particular order
    pub async fn global_log(&mut self) -> anyhow::Result<()> {
        for (oid, commit) in self.database().iter_commits()? {
            self.print_commit_block(&oid, &commit)?;
        }

        Ok(())
    }

    /// One commit in the fixed log block format
    pub(crate) fn print_commit_block(&self, oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "===")?;
        writeln!(writer, "commit {}", oid)?;
        if let (Some(first), Some(second)) = (commit.parent(), commit.second_parent()) {
            writeln!(
                writer,
                "Merge: {} {}",
                first.to_short_oid(),
                second.to_short_oid()
            )?;
        }
        writeln!(writer, "Date: {} -0800", commit.timestamp())?;
        writeln!(writer, "{}", commit.message())?;
        writeln!(writer)?;

        Ok(())
    }
}
