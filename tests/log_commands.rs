mod common;

use assert_fs::TempDir;
use common::command::{repository_dir, repository_with_multiple_commits, run_jot_command};
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn log_shows_history_newest_first(repository_with_multiple_commits: TempDir) {
    let dir = repository_with_multiple_commits;

    let output = run_jot_command(dir.path(), &["log"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Commit 1")
                .and(predicate::str::contains("Commit 2"))
                .and(predicate::str::contains("Commit 3"))
                .and(predicate::str::contains("Author: fake_user <fake_email@email.com>")),
        )
        .get_output()
        .clone();

    let stdout = String::from_utf8(output.stdout).unwrap();
    let third = stdout.find("Commit 3").unwrap();
    let second = stdout.find("Commit 2").unwrap();
    let first = stdout.find("Commit 1").unwrap();
    assert!(third < second);
    assert!(second < first);
}

#[rstest]
fn log_prints_full_digests_and_dates(repository_with_multiple_commits: TempDir) {
    let dir = repository_with_multiple_commits;
    let digest = common::read_branch_digest(dir.path(), "master");

    run_jot_command(dir.path(), &["log"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains(format!("commit {}", digest))
                .and(predicate::str::contains("Date:   ")),
        );
}

#[rstest]
fn log_before_any_commit_prints_nothing(repository_dir: TempDir) {
    run_jot_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_jot_command(repository_dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
