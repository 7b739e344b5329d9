//! Working-tree status report
//!
//! Builds the five status sections from snapshots of the repository state:
//! branch list, staged additions, staged removals, unstaged modifications,
//! and untracked files. Every section is ordered case-insensitively.
//!
//! The builder works on plain maps (path to blob ID) rather than repository
//! handles, so the classification rules are unit-testable in isolation; the
//! status command assembles the snapshots and renders the report.

use crate::artifacts::objects::commit::FileTree;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

/// Snapshot inputs for the status report
#[derive(Debug)]
pub struct StatusInputs<'s> {
    /// Branch names (top-level refs only)
    pub branches: Vec<String>,
    /// Name of the branch HEAD points at
    pub current_branch: String,
    /// Staged additions (path to blob ID)
    pub additions: &'s BTreeMap<String, ObjectId>,
    /// Staged removals
    pub removals: &'s BTreeSet<String>,
    /// Head commit's tree
    pub head_tree: &'s FileTree,
    /// Working-directory files and the blob IDs of their current contents
    pub working_files: &'s BTreeMap<String, ObjectId>,
}

/// The five rendered sections
#[derive(Debug, PartialEq, Eq)]
pub struct StatusReport {
    pub branches: Vec<String>,
    pub staged: Vec<String>,
    pub removed: Vec<String>,
    pub modifications: Vec<String>,
    pub untracked: Vec<String>,
}

impl StatusReport {
    /// Classify the snapshots into report sections
    pub fn build(inputs: StatusInputs<'_>) -> Self {
        let mut branches = Vec::new();
        for name in sort_case_insensitive(inputs.branches) {
            if name == inputs.current_branch {
                branches.push(format!("*{}", name));
            } else {
                branches.push(name);
            }
        }

        let staged = sort_case_insensitive(inputs.additions.keys().cloned().collect());
        let removed = sort_case_insensitive(inputs.removals.iter().cloned().collect());

        let mut modifications = Vec::new();
        for (path, staged_blob) in inputs.additions {
            match inputs.working_files.get(path) {
                None => modifications.push(format!("{} (deleted)", path)),
                Some(working_blob) if working_blob != staged_blob => {
                    modifications.push(format!("{} (modified)", path))
                }
                Some(_) => {}
            }
        }
        for (path, head_blob) in inputs.head_tree {
            match inputs.working_files.get(path) {
                None if !inputs.removals.contains(path) => {
                    modifications.push(format!("{} (deleted)", path))
                }
                Some(working_blob)
                    if !inputs.additions.contains_key(path) && working_blob != head_blob =>
                {
                    modifications.push(format!("{} (modified)", path))
                }
                _ => {}
            }
        }
        let mut modifications = sort_case_insensitive(modifications);
        modifications.dedup();

        let untracked = sort_case_insensitive(
            inputs
                .working_files
                .keys()
                .filter(|path| {
                    !inputs.head_tree.contains_key(*path)
                        && !inputs.additions.contains_key(*path)
                })
                .cloned()
                .collect(),
        );

        StatusReport {
            branches,
            staged,
            removed,
            modifications,
            untracked,
        }
    }

    /// Print the report in its fixed five-section format
    pub fn render(&self, writer: &mut dyn Write) -> anyhow::Result<()> {
        let sections: [(&str, &Vec<String>); 5] = [
            ("=== Branches ===", &self.branches),
            ("=== Staged Files ===", &self.staged),
            ("=== Removed Files ===", &self.removed),
            (
                "=== Modifications Not Staged For Commit ===",
                &self.modifications,
            ),
            ("=== Untracked Files ===", &self.untracked),
        ];

        for (position, (header, entries)) in sections.iter().enumerate() {
            if position > 0 {
                writeln!(writer)?;
            }
            writeln!(writer, "{}", header)?;
            for entry in entries.iter() {
                writeln!(writer, "{}", entry)?;
            }
        }

        Ok(())
    }
}

/// Sort names lexicographically, ignoring case
pub fn sort_case_insensitive(mut names: Vec<String>) -> Vec<String> {
    names.sort_by(|left, right| {
        left.to_lowercase()
            .cmp(&right.to_lowercase())
            .then_with(|| left.cmp(right))
    });
    names
}
