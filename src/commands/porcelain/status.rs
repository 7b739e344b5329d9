use crate::areas::repository::Repository;
use crate::artifacts::status::{StatusInputs, StatusReport};

impl Repository {
    /// Print the five-section working tree status
    pub async fn status(&mut self) -> anyhow::Result<()> {
        let index = self.index();
        let mut index = index.lock().await;

        index.rehydrate()?;

        let head = self.head_commit()?;
        let working_files = self.workspace().snapshot()?;

        let report = StatusReport::build(StatusInputs {
            branches: self.refs().list_branches()?,
            current_branch: self.refs().head_branch_name()?,
            additions: index.additions(),
            removals: index.removals(),
            head_tree: head.tree(),
            working_files: &working_files,
        });

        let mut writer = self.writer();
        report.render(writer.as_mut())?;

        Ok(())
    }
}
