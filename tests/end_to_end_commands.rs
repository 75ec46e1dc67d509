mod common;

use assert_fs::TempDir;
use common::command::{repository_dir, run_jot_command};
use common::file::{FileSpec, write_file};
use predicates::prelude::*;
use rstest::rstest;

fn commit_as_u(dir: &std::path::Path, message: &str, date: &str) {
    let mut cmd = run_jot_command(dir, &["commit", "-m", message]);
    cmd.envs(vec![("JOT_AUTHOR_NAME", "u"), ("JOT_AUTHOR_DATE", date)]);
    cmd.assert().success();
}

#[rstest]
fn init_add_commit_log_shows_one_entry(repository_dir: TempDir) {
    let dir = repository_dir;
    run_jot_command(dir.path(), &["init"]).assert().success();
    write_file(FileSpec::new(dir.path().join("a.txt"), "hello".to_string()));
    run_jot_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();

    commit_as_u(dir.path(), "msg", "2023-01-01 10:00:00 +0000");

    let output = run_jot_command(dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("msg").and(predicate::str::contains("Author: u")))
        .get_output()
        .clone();

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.matches("commit ").count(), 1);
}

#[rstest]
fn commits_on_a_feature_branch_leave_master_untouched(repository_dir: TempDir) {
    let dir = repository_dir;
    run_jot_command(dir.path(), &["init"]).assert().success();
    write_file(FileSpec::new(dir.path().join("a.txt"), "hello".to_string()));
    run_jot_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    commit_as_u(dir.path(), "msg", "2023-01-01 10:00:00 +0000");
    let master_digest = common::read_branch_digest(dir.path(), "master");

    run_jot_command(dir.path(), &["checkout", "-b", "feature"])
        .assert()
        .success();
    write_file(FileSpec::new(
        dir.path().join("a.txt"),
        "edited on feature".to_string(),
    ));
    run_jot_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    commit_as_u(dir.path(), "feature work", "2023-01-01 11:00:00 +0000");

    // master still resolves to the original commit
    assert_eq!(
        common::read_branch_digest(dir.path(), "master"),
        master_digest
    );

    // and switching back restores the original content exactly
    run_jot_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();
    assert_eq!(
        std::fs::read_to_string(dir.path().join("a.txt")).unwrap(),
        "hello"
    );
}
