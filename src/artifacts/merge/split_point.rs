//! Split-point search over the commit DAG
//!
//! The split point of two branch heads H and G is their latest common
//! ancestor under this definition:
//!
//! - every ancestor of H (following both parents of merge commits) is
//!   assigned its minimum distance from H;
//! - the ancestors of G are then walked depth-first, first parent before
//!   second, and the shared ancestor with the smallest distance wins.
//!
//! Ties on distance go to the ancestor encountered first during the G-side
//! traversal; that order is observable and must not change. Both traversals
//! memoize visited commits, so the search stays linear in the number of
//! reachable commits even on diamond-heavy histories.
//!
//! The finder takes a parent-loader closure instead of a database handle, so
//! the algorithm can be exercised against in-memory commit graphs.

use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{HashMap, HashSet, VecDeque};

/// Finds the split point between two commits
///
/// # Type Parameters
///
/// * `ParentsFn` - Loads the parent IDs of a commit, first parent first.
///   Must return an empty vector for the initial commit.
pub struct SplitPointFinder<ParentsFn>
where
    ParentsFn: Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    load_parents: ParentsFn,
}

impl<ParentsFn> SplitPointFinder<ParentsFn>
where
    ParentsFn: Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    pub fn new(load_parents: ParentsFn) -> Self {
        Self { load_parents }
    }

    /// Find the latest common ancestor of `head` and `given`
    ///
    /// # Returns
    ///
    /// `Some(oid)` of the split point, or `None` when the two commits share
    /// no history (cannot happen inside a single repository, where the
    /// initial commit is the unique root).
    pub fn find(&self, head: &ObjectId, given: &ObjectId) -> anyhow::Result<Option<ObjectId>> {
        let distances = self.distances_from(head)?;

        let mut best: Option<(ObjectId, u32)> = None;
        let mut visited = HashSet::new();
        let mut stack = vec![given.clone()];

        while let Some(commit_id) = stack.pop() {
            if !visited.insert(commit_id.clone()) {
                continue;
            }

            if let Some(&distance) = distances.get(&commit_id) {
                let closer = match &best {
                    None => true,
                    // strict comparison keeps the first commit encountered on ties
                    Some((_, best_distance)) => distance < *best_distance,
                };
                if closer {
                    best = Some((commit_id.clone(), distance));
                }
            }

            // pushed in reverse so the first parent's subtree is fully
            // explored before the second parent's
            for parent in (self.load_parents)(&commit_id)?.into_iter().rev() {
                stack.push(parent);
            }
        }

        Ok(best.map(|(oid, _)| oid))
    }

    /// Map every ancestor of `start` to its minimum distance from it
    fn distances_from(&self, start: &ObjectId) -> anyhow::Result<HashMap<ObjectId, u32>> {
        let mut distances = HashMap::from([(start.clone(), 0u32)]);
        let mut queue = VecDeque::from([start.clone()]);

        while let Some(commit_id) = queue.pop_front() {
            let next_distance = distances[&commit_id] + 1;

            for parent in (self.load_parents)(&commit_id)? {
                match distances.get(&parent) {
                    Some(&known) if known <= next_distance => {}
                    _ => {
                        distances.insert(parent.clone(), next_distance);
                        queue.push_back(parent);
                    }
                }
            }
        }

        Ok(distances)
    }
}
