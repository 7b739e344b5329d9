use crate::common::file::{write_file, FileSpec};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// A fresh repository with one committed file, `hello.txt`
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_gitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("hello.txt"),
        "hi\n".to_string(),
    ));

    run_gitlet_command(repository_dir.path(), &["add", "hello.txt"])
        .assert()
        .success();
    run_gitlet_command(repository_dir.path(), &["commit", "first"])
        .assert()
        .success();

    repository_dir
}

pub fn run_gitlet_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("gitlet").expect("Failed to find gitlet binary");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

/// The 40-hex commit ID the active branch points at
pub fn head_commit_id(dir: &Path) -> String {
    let head = std::fs::read_to_string(dir.join(".gitlet").join("HEAD"))
        .expect("Failed to read HEAD");
    let oid = std::fs::read_to_string(head.trim()).expect("Failed to read branch ref");
    oid.trim().to_string()
}

/// The commit ID a branch ref points at
pub fn branch_commit_id(dir: &Path, branch: &str) -> String {
    let ref_path = dir.join(".gitlet").join("refs").join(branch);
    std::fs::read_to_string(ref_path)
        .expect("Failed to read branch ref")
        .trim()
        .to_string()
}
