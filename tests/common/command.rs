use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_jot_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    let file1 = FileSpec::new(repository_dir.path().join("1.txt"), "one".to_string());
    write_file(file1);

    let file2 = FileSpec::new(
        repository_dir.path().join("a").join("2.txt"),
        "two".to_string(),
    );
    write_file(file2);

    let file3 = FileSpec::new(
        repository_dir.path().join("a").join("b").join("3.txt"),
        "three".to_string(),
    );
    write_file(file3);

    run_jot_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    jot_commit(repository_dir.path(), "Initial commit")
        .assert()
        .success();

    repository_dir
}

#[fixture]
pub fn repository_with_multiple_commits(repository_dir: TempDir) -> TempDir {
    run_jot_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    for (n, hour) in [("1", 10), ("2", 11), ("3", 12)] {
        let file = FileSpec::new(
            repository_dir.path().join(format!("file{}.txt", n)),
            format!("content {}", n),
        );
        write_file(file);
        run_jot_command(repository_dir.path(), &["add", "."])
            .assert()
            .success();
        jot_commit_at(
            repository_dir.path(),
            &format!("Commit {}", n),
            &format!("2023-01-01 {:02}:00:00 +0000", hour),
        )
        .assert()
        .success();
    }

    repository_dir
}

pub fn run_jot_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("jot").expect("Failed to find jot binary");
    cmd.envs(vec![("NO_PAGER", "1")]);
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn jot_commit(dir: &Path, message: &str) -> Command {
    jot_commit_at(dir, message, "2023-01-01 12:00:00 +0000")
}

pub fn jot_commit_at(dir: &Path, message: &str, date: &str) -> Command {
    let mut cmd = run_jot_command(dir, &["commit", "-m", message]);
    cmd.envs(vec![
        ("JOT_AUTHOR_NAME", "fake_user"),
        ("JOT_AUTHOR_EMAIL", "fake_email@email.com"),
        ("JOT_AUTHOR_DATE", date), // %Y-%m-%d %H:%M:%S %z
    ]);
    cmd
}
