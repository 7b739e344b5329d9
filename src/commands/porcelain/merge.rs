use crate::areas::repository::Repository;
use crate::artifacts::errors::GitletError;
use crate::artifacts::merge::resolution::{classify, conflict_payload, MergeAction};
use crate::artifacts::merge::split_point::SplitPointFinder;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use std::io::Write;

impl Repository {
    /// Merge another branch into the current one
    ///
    /// Pre-checks run in a fixed order: clean staging area, branch
    /// existence, distinct heads, then the untracked-file scan. The split
    /// point decides between the trivial outcomes (already up to date,
    /// fast-forward) and a real three-way merge, which ends in a merge
    /// commit whose second parent is the given branch's head.
    pub async fn merge(&mut self, branch: &str) -> anyhow::Result<()> {
        let index_handle = self.index();
        let mut index = index_handle.lock().await;

        index.rehydrate()?;

        if !index.is_empty() {
            return Err(GitletError::UncommittedChanges.into());
        }
        if !self.refs().branch_exists(branch) {
            return Err(GitletError::BranchMissing.into());
        }

        let head_oid = self.head_oid()?;
        let given_oid = self.refs().read_branch(branch)?;
        if head_oid == given_oid {
            return Err(GitletError::SelfMerge.into());
        }

        let head = self.database().load_commit(&head_oid)?;

        // staging is clean here, so untracked means invisible to the head
        for name in self.workspace().list_files()? {
            if !head.tracks(&name) {
                return Err(GitletError::UntrackedOverwrite.into());
            }
        }

        let split_oid = {
            let database = self.database();
            let finder = SplitPointFinder::new(|oid: &ObjectId| {
                Ok(database
                    .load_commit(oid)?
                    .parents()
                    .into_iter()
                    .cloned()
                    .collect())
            });
            // disjoint histories degrade to the given head, which surfaces
            // the ancestor diagnostic below
            finder
                .find(&head_oid, &given_oid)?
                .unwrap_or_else(|| given_oid.clone())
        };

        if split_oid == given_oid {
            writeln!(
                self.writer(),
                "Given branch is an ancestor of the current branch."
            )?;
            return Ok(());
        }
        if split_oid == head_oid {
            drop(index);
            self.checkout_branch(branch).await?;
            writeln!(self.writer(), "Current branch fast-forwarded.")?;
            return Ok(());
        }

        let split = self.database().load_commit(&split_oid)?;
        let given = self.database().load_commit(&given_oid)?;

        let actions = classify(split.tree(), head.tree(), given.tree());
        let mut conflict_reported = false;

        for action in actions {
            match action {
                MergeAction::TakeGiven { path } => {
                    let blob_oid = given
                        .blob(&path)
                        .context("classification produced a path missing from the given tree")?;
                    let blob = self.database().load_blob(blob_oid)?;

                    self.workspace().write_file(&path, blob.content())?;
                    index.stage_addition(&path, blob_oid.clone());
                }
                MergeAction::Remove { path } => {
                    index.stage_removal(&path);
                    self.workspace().remove_file(&path)?;
                }
                MergeAction::Conflict { path } => {
                    if !conflict_reported {
                        writeln!(self.writer(), "Encountered a merge conflict.")?;
                        conflict_reported = true;
                    }

                    let payload = conflict_payload(
                        self.load_side_contents(&head, &path)?.as_ref(),
                        self.load_side_contents(&given, &path)?.as_ref(),
                    );
                    let blob = Blob::new(payload.clone());
                    let blob_oid = self.database().store(&blob)?;

                    self.workspace().write_file(&path, &payload)?;
                    index.stage_addition(&path, blob_oid);
                }
            }
        }

        index.write_updates()?;
        drop(index);

        let current = self.refs().head_branch_name()?;
        let message = format!("Merged {} into {}.", branch, current);
        self.write_commit(&message, Some(given_oid)).await
    }

    fn load_side_contents(&self, commit: &Commit, path: &str) -> anyhow::Result<Option<Bytes>> {
        match commit.blob(path) {
            Some(blob_oid) => Ok(Some(self.database().load_blob(blob_oid)?.content().clone())),
            None => Ok(None),
        }
    }
}
