use assert_fs::TempDir;
use predicates::prelude::{predicate, PredicateBooleanExt};
use rstest::rstest;

mod common;

use common::command::{head_commit_id, init_repository_dir, run_gitlet_command};
use common::file::{write_file, FileSpec};

#[rstest]
fn log_blocks_follow_the_fixed_format(init_repository_dir: TempDir) {
    let head = head_commit_id(init_repository_dir.path());

    run_gitlet_command(init_repository_dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(format!(
            "^===\ncommit {}\nDate: \\w{{3}} \\w{{3}} \\d{{2}} \\d{{2}}:\\d{{2}}:\\d{{2}} \\d{{4}} -0800\nfirst\n\n===\n",
            head
        )).unwrap());
}

#[rstest]
fn log_ignores_second_parents(init_repository_dir: TempDir) {
    // build a side branch and merge it, then check the side commit is
    // absent from the first-parent walk
    run_gitlet_command(init_repository_dir.path(), &["branch", "side"])
        .assert()
        .success();
    run_gitlet_command(init_repository_dir.path(), &["checkout", "side"])
        .assert()
        .success();
    write_file(FileSpec::new(
        init_repository_dir.path().join("side.txt"),
        "side\n".to_string(),
    ));
    run_gitlet_command(init_repository_dir.path(), &["add", "side.txt"])
        .assert()
        .success();
    run_gitlet_command(init_repository_dir.path(), &["commit", "side work"])
        .assert()
        .success();
    let side_tip = head_commit_id(init_repository_dir.path());

    run_gitlet_command(init_repository_dir.path(), &["checkout", "master"])
        .assert()
        .success();
    write_file(FileSpec::new(
        init_repository_dir.path().join("main.txt"),
        "main\n".to_string(),
    ));
    run_gitlet_command(init_repository_dir.path(), &["add", "main.txt"])
        .assert()
        .success();
    run_gitlet_command(init_repository_dir.path(), &["commit", "main work"])
        .assert()
        .success();

    run_gitlet_command(init_repository_dir.path(), &["merge", "side"])
        .assert()
        .success();

    run_gitlet_command(init_repository_dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Merged side into master."))
        .stdout(predicate::str::contains(format!("commit {}", side_tip)).not());
}

#[rstest]
fn merge_commits_show_both_short_parents(init_repository_dir: TempDir) {
    run_gitlet_command(init_repository_dir.path(), &["branch", "side"])
        .assert()
        .success();

    write_file(FileSpec::new(
        init_repository_dir.path().join("main.txt"),
        "main\n".to_string(),
    ));
    run_gitlet_command(init_repository_dir.path(), &["add", "main.txt"])
        .assert()
        .success();
    run_gitlet_command(init_repository_dir.path(), &["commit", "main work"])
        .assert()
        .success();
    let first_parent = head_commit_id(init_repository_dir.path());

    run_gitlet_command(init_repository_dir.path(), &["checkout", "side"])
        .assert()
        .success();
    write_file(FileSpec::new(
        init_repository_dir.path().join("side.txt"),
        "side\n".to_string(),
    ));
    run_gitlet_command(init_repository_dir.path(), &["add", "side.txt"])
        .assert()
        .success();
    run_gitlet_command(init_repository_dir.path(), &["commit", "side work"])
        .assert()
        .success();
    let second_parent = head_commit_id(init_repository_dir.path());

    run_gitlet_command(init_repository_dir.path(), &["checkout", "master"])
        .assert()
        .success();
    run_gitlet_command(init_repository_dir.path(), &["merge", "side"])
        .assert()
        .success();

    run_gitlet_command(init_repository_dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Merge: {} {}",
            &first_parent[..7],
            &second_parent[..7]
        )));
}

#[rstest]
fn global_log_lists_every_commit(init_repository_dir: TempDir) {
    let first = head_commit_id(init_repository_dir.path());

    run_gitlet_command(init_repository_dir.path(), &["branch", "side"])
        .assert()
        .success();
    run_gitlet_command(init_repository_dir.path(), &["checkout", "side"])
        .assert()
        .success();
    write_file(FileSpec::new(
        init_repository_dir.path().join("side.txt"),
        "side\n".to_string(),
    ));
    run_gitlet_command(init_repository_dir.path(), &["add", "side.txt"])
        .assert()
        .success();
    run_gitlet_command(init_repository_dir.path(), &["commit", "side work"])
        .assert()
        .success();
    let side = head_commit_id(init_repository_dir.path());

    run_gitlet_command(init_repository_dir.path(), &["global-log"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("commit {}", first)))
        .stdout(predicate::str::contains(format!("commit {}", side)))
        .stdout(predicate::str::contains("initial commit"));
}

#[rstest]
fn find_prints_matching_commit_ids(init_repository_dir: TempDir) {
    let head = head_commit_id(init_repository_dir.path());

    run_gitlet_command(init_repository_dir.path(), &["find", "first"])
        .assert()
        .success()
        .stdout(predicate::str::contains(&head));

    run_gitlet_command(init_repository_dir.path(), &["find", "no such message"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found no commit with that message."));
}
