mod common;

use assert_fs::TempDir;
use common::command::{repository_dir, run_jot_command};
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn init_creates_the_metadata_layout(repository_dir: TempDir) {
    run_jot_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized empty jot repository"));

    let meta = repository_dir.path().join(common::META_DIR);
    assert!(meta.join("objects").is_dir());
    assert!(meta.join("references").is_dir());
    assert!(meta.join("index").is_file());
    assert_eq!(common::read_head(repository_dir.path()), "ref: master");
}

#[rstest]
fn init_with_a_path_argument_creates_the_directory(repository_dir: TempDir) {
    let target = repository_dir.path().join("nested/project");

    run_jot_command(repository_dir.path(), &["init", target.to_str().unwrap()])
        .assert()
        .success();

    assert!(target.join(common::META_DIR).join("objects").is_dir());
}

#[rstest]
fn reinit_preserves_existing_state(repository_dir: TempDir) {
    run_jot_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    let marker = repository_dir
        .path()
        .join(common::META_DIR)
        .join("objects")
        .join("marker");
    std::fs::write(&marker, b"keep me").unwrap();

    run_jot_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    assert!(marker.exists());
}

#[rstest]
fn commands_outside_a_repository_fail(repository_dir: TempDir) {
    run_jot_command(repository_dir.path(), &["log"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a jot repository"));
}
