use crate::areas::repository::Repository;

impl Repository {
    /// Fetch a remote branch, then merge its tracking branch
    pub async fn pull(&mut self, remote_name: &str, branch: &str) -> anyhow::Result<()> {
        self.fetch(remote_name, branch).await?;
        self.merge(&format!("{}/{}", remote_name, branch)).await
    }
}
