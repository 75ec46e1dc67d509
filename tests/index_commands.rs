mod common;

use assert_fs::TempDir;
use common::command::{repository_dir, run_jot_command};
use common::file::{FileSpec, write_file};
use rstest::rstest;

fn read_index(dir: &std::path::Path) -> String {
    std::fs::read_to_string(dir.join(common::META_DIR).join("index")).unwrap()
}

#[rstest]
fn add_stages_a_single_file(repository_dir: TempDir) {
    run_jot_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    write_file(FileSpec::new(
        repository_dir.path().join("a.txt"),
        "hello".to_string(),
    ));

    run_jot_command(repository_dir.path(), &["add", "a.txt"])
        .assert()
        .success();

    let index = read_index(repository_dir.path());
    assert!(index.contains("a.txt"));
}

#[rstest]
fn add_expands_directories_to_files(repository_dir: TempDir) {
    run_jot_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    write_file(FileSpec::new(
        repository_dir.path().join("dir/x.txt"),
        "x".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("dir/sub/y.txt"),
        "y".to_string(),
    ));

    run_jot_command(repository_dir.path(), &["add", "dir"])
        .assert()
        .success();

    let index = read_index(repository_dir.path());
    assert!(index.contains("dir/x.txt"));
    assert!(index.contains("dir/sub/y.txt"));
}

#[rstest]
fn add_of_a_missing_path_fails(repository_dir: TempDir) {
    run_jot_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_jot_command(repository_dir.path(), &["add", "nope.txt"])
        .assert()
        .failure();
}

#[rstest]
fn restaging_replaces_the_previous_digest(repository_dir: TempDir) {
    run_jot_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    let file = repository_dir.path().join("a.txt");

    write_file(FileSpec::new(file.clone(), "first".to_string()));
    run_jot_command(repository_dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    let before = read_index(repository_dir.path());

    write_file(FileSpec::new(file, "second".to_string()));
    run_jot_command(repository_dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    let after = read_index(repository_dir.path());

    assert_ne!(before, after);
    assert_eq!(after.lines().count(), 1);
}

#[rstest]
fn remove_unstages_without_touching_the_workspace(repository_dir: TempDir) {
    run_jot_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    write_file(FileSpec::new(
        repository_dir.path().join("a.txt"),
        "hello".to_string(),
    ));
    run_jot_command(repository_dir.path(), &["add", "a.txt"])
        .assert()
        .success();

    run_jot_command(repository_dir.path(), &["remove", "a.txt"])
        .assert()
        .success();

    assert!(!read_index(repository_dir.path()).contains("a.txt"));
    assert!(repository_dir.path().join("a.txt").exists());
}

#[rstest]
fn remove_of_an_unstaged_path_succeeds(repository_dir: TempDir) {
    run_jot_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_jot_command(repository_dir.path(), &["remove", "never-staged.txt"])
        .assert()
        .success();
}
