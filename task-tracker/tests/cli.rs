use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;

fn task_cli(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("task-cli").unwrap();
    cmd.current_dir(dir.path());
    cmd
}

#[test]
fn add_prints_the_assigned_id() {
    let dir = TempDir::new().unwrap();

    task_cli(&dir)
        .args(["add", "Buy milk"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task added successfully (ID: 1)"));

    dir.child("tasks.json").assert(predicate::path::exists());
}

#[test]
fn ids_keep_growing_after_a_delete() {
    let dir = TempDir::new().unwrap();
    task_cli(&dir).args(["add", "A"]).assert().success();
    task_cli(&dir).args(["add", "B"]).assert().success();
    task_cli(&dir).args(["delete", "1"]).assert().success();

    task_cli(&dir)
        .args(["add", "C"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task added successfully (ID: 3)"));
}

#[test]
fn full_task_lifecycle_through_the_binary() {
    let dir = TempDir::new().unwrap();

    task_cli(&dir).args(["add", "Buy milk"]).assert().success();

    task_cli(&dir)
        .args(["mark-in-progress", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Task marked as in-progress (ID: 1)",
        ));

    task_cli(&dir)
        .args(["update", "1", "Buy milk and bread"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Task updated successfully (ID: 1)",
        ));

    task_cli(&dir)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All Tasks (1):"))
        .stdout(predicate::str::contains(
            "[1] Buy milk and bread - Status: in-progress",
        ));

    task_cli(&dir)
        .args(["delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Task deleted successfully (ID: 1)",
        ));

    task_cli(&dir)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks found."));
}

#[test]
fn unknown_ids_are_reported_but_exit_cleanly() {
    let dir = TempDir::new().unwrap();

    for args in [
        vec!["update", "42", "nope"],
        vec!["delete", "42"],
        vec!["mark-done", "42"],
    ] {
        task_cli(&dir)
            .args(&args)
            .assert()
            .success()
            .stdout(predicate::str::contains("Task not found (ID: 42)"));
    }
}

#[test]
fn non_numeric_ids_are_rejected_before_any_io() {
    let dir = TempDir::new().unwrap();

    task_cli(&dir)
        .args(["delete", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));

    dir.child("tasks.json")
        .assert(predicate::path::exists().not());
}

#[test]
fn missing_arguments_print_usage() {
    let dir = TempDir::new().unwrap();

    task_cli(&dir)
        .arg("add")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn list_filters_by_status() {
    let dir = TempDir::new().unwrap();
    task_cli(&dir).args(["add", "A"]).assert().success();
    task_cli(&dir).args(["add", "B"]).assert().success();
    task_cli(&dir).args(["mark-done", "1"]).assert().success();

    task_cli(&dir)
        .args(["list", "done"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Done Tasks (1):"))
        .stdout(predicate::str::contains("[1] A - Status: done"))
        .stdout(predicate::str::contains("[2]").not());

    task_cli(&dir)
        .args(["list", "in-progress"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No in-progress tasks found."));
}

#[test]
fn list_rejects_unknown_status_names() {
    let dir = TempDir::new().unwrap();

    task_cli(&dir)
        .args(["list", "cancelled"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn the_file_flag_relocates_the_store() {
    let dir = TempDir::new().unwrap();

    task_cli(&dir)
        .args(["--file", "work.json", "add", "A"])
        .assert()
        .success();

    dir.child("work.json").assert(predicate::path::exists());
    dir.child("tasks.json")
        .assert(predicate::path::exists().not());
}

#[test]
fn malformed_file_warns_and_starts_empty_by_default() {
    let dir = TempDir::new().unwrap();
    dir.child("tasks.json").write_str("{ not json").unwrap();

    task_cli(&dir)
        .args(["add", "Fresh start"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task added successfully (ID: 1)"));
}

#[test]
fn strict_flag_fails_on_a_malformed_file() {
    let dir = TempDir::new().unwrap();
    dir.child("tasks.json").write_str("{ not json").unwrap();

    task_cli(&dir)
        .args(["--strict", "add", "Fresh start"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid JSON"));
}
