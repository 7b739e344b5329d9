//! Three-way file classification
//!
//! Given the trees of the split point S, the current head H, and the given
//! branch head G, every path appearing in any of the three is classified
//! into one of three actions:
//!
//! - `TakeGiven`: the given side changed the file and the head side did not;
//!   the working file is overwritten with G's blob and staged.
//! - `Remove`: the given side deleted a file the head side left untouched;
//!   the file is removed and staged for removal.
//! - `Conflict`: both sides changed the file in different ways; the working
//!   file is replaced with a conflict-marker block and staged.
//!
//! Paths equal on both sides, or changed only on the head side, need no
//! action: the head's version already sits in the working tree.

use crate::artifacts::objects::commit::FileTree;
use bytes::Bytes;

/// One merge decision for a single path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeAction {
    /// Overwrite the working file with the given side's blob and stage it
    TakeGiven { path: String },
    /// Remove the working file and stage the removal
    Remove { path: String },
    /// Replace the working file with conflict markers and stage it
    Conflict { path: String },
}

/// Classify every path across the three trees
///
/// Paths are examined in lexicographic order: first everything present in
/// the given tree, then the head-only deletions. The returned actions are
/// applied in that order.
pub fn classify(split: &FileTree, head: &FileTree, given: &FileTree) -> Vec<MergeAction> {
    let mut actions = Vec::new();

    for (path, given_blob) in given {
        match split.get(path) {
            None => match head.get(path) {
                // born on the given side only
                None => actions.push(MergeAction::TakeGiven { path: path.clone() }),
                // born on both sides with different contents
                Some(head_blob) if head_blob != given_blob => {
                    actions.push(MergeAction::Conflict { path: path.clone() })
                }
                Some(_) => {}
            },
            Some(split_blob) if split_blob != given_blob => match head.get(path) {
                // unchanged on the head side: the given side's edit wins
                Some(head_blob) if head_blob == split_blob => {
                    actions.push(MergeAction::TakeGiven { path: path.clone() })
                }
                // deleted here, edited there
                None => actions.push(MergeAction::Conflict { path: path.clone() }),
                // edited on both sides to different contents
                Some(head_blob) if head_blob != given_blob => {
                    actions.push(MergeAction::Conflict { path: path.clone() })
                }
                Some(_) => {}
            },
            // the given side left the file alone; keep whatever the head has
            Some(_) => {}
        }
    }

    for (path, head_blob) in head {
        if let Some(split_blob) = split.get(path) {
            if !given.contains_key(path) {
                if split_blob == head_blob {
                    // deleted on the given side, untouched here
                    actions.push(MergeAction::Remove { path: path.clone() });
                } else {
                    // deleted there, edited here
                    actions.push(MergeAction::Conflict { path: path.clone() });
                }
            }
        }
    }

    actions
}

/// Build the conflict-marker payload for a path
///
/// Either side may be absent (deleted), in which case its section is empty.
pub fn conflict_payload(head_contents: Option<&Bytes>, given_contents: Option<&Bytes>) -> Bytes {
    let mut payload = Vec::new();

    payload.extend_from_slice(b"<<<<<<< HEAD\n");
    if let Some(contents) = head_contents {
        payload.extend_from_slice(contents);
    }
    payload.extend_from_slice(b"=======\n");
    if let Some(contents) = given_contents {
        payload.extend_from_slice(contents);
    }
    payload.extend_from_slice(b">>>>>>>\n");

    Bytes::from(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::object_id::ObjectId;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn oid(seed: u8) -> ObjectId {
        ObjectId::try_parse(format!("{:02x}", seed).repeat(20)).unwrap()
    }

    fn tree(entries: &[(&str, u8)]) -> FileTree {
        entries
            .iter()
            .map(|(path, seed)| (path.to_string(), oid(*seed)))
            .collect()
    }

    #[rstest]
    // born only on the given side: adopted
    #[case(tree(&[]), tree(&[]), tree(&[("f", 1)]),
           vec![MergeAction::TakeGiven { path: "f".into() }])]
    // born on both sides with the same contents: nothing to do
    #[case(tree(&[]), tree(&[("f", 1)]), tree(&[("f", 1)]), vec![])]
    // born on both sides with different contents: conflict
    #[case(tree(&[]), tree(&[("f", 1)]), tree(&[("f", 2)]),
           vec![MergeAction::Conflict { path: "f".into() }])]
    // edited only on the given side: adopted
    #[case(tree(&[("f", 1)]), tree(&[("f", 1)]), tree(&[("f", 2)]),
           vec![MergeAction::TakeGiven { path: "f".into() }])]
    // edited only on the head side: kept as-is
    #[case(tree(&[("f", 1)]), tree(&[("f", 2)]), tree(&[("f", 1)]), vec![])]
    // deleted here, edited there: conflict
    #[case(tree(&[("f", 1)]), tree(&[]), tree(&[("f", 2)]),
           vec![MergeAction::Conflict { path: "f".into() }])]
    // edited here, deleted there: conflict
    #[case(tree(&[("f", 1)]), tree(&[("f", 2)]), tree(&[]),
           vec![MergeAction::Conflict { path: "f".into() }])]
    // untouched here, deleted there: removed
    #[case(tree(&[("f", 1)]), tree(&[("f", 1)]), tree(&[]),
           vec![MergeAction::Remove { path: "f".into() }])]
    // edited to different contents on both sides: conflict
    #[case(tree(&[("f", 1)]), tree(&[("f", 2)]), tree(&[("f", 3)]),
           vec![MergeAction::Conflict { path: "f".into() }])]
    // edited to the same contents on both sides: nothing to do
    #[case(tree(&[("f", 1)]), tree(&[("f", 2)]), tree(&[("f", 2)]), vec![])]
    // deleted on both sides: nothing to do
    #[case(tree(&[("f", 1)]), tree(&[]), tree(&[]), vec![])]
    fn test_three_way_classification(
        #[case] split: FileTree,
        #[case] head: FileTree,
        #[case] given: FileTree,
        #[case] expected: Vec<MergeAction>,
    ) {
        assert_eq!(classify(&split, &head, &given), expected);
    }

    #[test]
    fn test_actions_come_out_in_path_order() {
        let split = tree(&[("kept", 1), ("removed", 2)]);
        let head = tree(&[("kept", 1), ("removed", 2)]);
        let given = tree(&[("added", 3), ("kept", 4)]);

        let actions = classify(&split, &head, &given);
        assert_eq!(
            actions,
            vec![
                MergeAction::TakeGiven { path: "added".into() },
                MergeAction::TakeGiven { path: "kept".into() },
                MergeAction::Remove { path: "removed".into() },
            ]
        );
    }

    #[test]
    fn test_conflict_payload_with_both_sides() {
        let head = Bytes::from_static(b"B\n");
        let given = Bytes::from_static(b"C\n");

        assert_eq!(
            conflict_payload(Some(&head), Some(&given)),
            Bytes::from_static(b"<<<<<<< HEAD\nB\n=======\nC\n>>>>>>>\n")
        );
    }

    #[test]
    fn test_conflict_payload_with_an_absent_side() {
        let given = Bytes::from_static(b"C\n");

        assert_eq!(
            conflict_payload(None, Some(&given)),
            Bytes::from_static(b"<<<<<<< HEAD\n=======\nC\n>>>>>>>\n")
        );
    }
}
