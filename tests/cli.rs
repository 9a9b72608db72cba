#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn cli(roster: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("planning-bar-cli").unwrap();
    cmd.arg("--roster").arg(roster);
    cmd
}

#[test]
fn add_generate_and_show() {
    let dir = tempdir().unwrap();
    let roster = dir.path().join("roster.json");

    cli(&roster)
        .args(["add-station", "--name", "Bar", "--required", "1"])
        .assert()
        .success();
    cli(&roster)
        .args(["add-staff", "--name", "Alice", "--stations", "Bar"])
        .assert()
        .success();
    cli(&roster)
        .args(["add-staff", "--name", "Bob", "--stations", "Bar"])
        .assert()
        .success();

    cli(&roster)
        .args(["generate", "--slots", "18:00,19:00"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("18:00 | Alice"))
        .stdout(predicate::str::contains("19:00 | Bob"));

    cli(&roster)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice: 1 slot(s)"));

    cli(&roster)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: no conflicts"));
}

#[test]
fn understaffing_exits_with_warning_code() {
    let dir = tempdir().unwrap();
    let roster = dir.path().join("roster.json");

    cli(&roster)
        .args(["add-station", "--name", "Bar", "--required", "2"])
        .assert()
        .success();
    cli(&roster)
        .args(["add-staff", "--name", "Alice", "--stations", "Bar"])
        .assert()
        .success();

    cli(&roster)
        .args(["generate", "--preset", "friday"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "not enough qualified staff for station Bar",
        ));

    let out = dir.path().join("notices.txt");
    cli(&roster)
        .args(["notices", "--out"])
        .arg(&out)
        .assert()
        .success();
    let content = fs::read_to_string(&out).unwrap();
    assert!(content.starts_with("19:00: not enough qualified staff for station Bar"));
    assert!(content.contains("Bar: short in 9 slot(s), 9 seat(s) total"));
}

#[test]
fn removing_staff_discards_schedule() {
    let dir = tempdir().unwrap();
    let roster = dir.path().join("roster.json");

    cli(&roster)
        .args(["add-station", "--name", "Bar"])
        .assert()
        .success();
    cli(&roster)
        .args(["add-staff", "--name", "Alice", "--stations", "Bar"])
        .assert()
        .success();
    cli(&roster)
        .args(["generate", "--slots", "18:00"])
        .assert()
        .success();
    cli(&roster)
        .args(["remove-staff", "--name", "Alice"])
        .assert()
        .success();

    cli(&roster)
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no schedule"));
}

#[test]
fn generate_refuses_empty_roster() {
    let dir = tempdir().unwrap();
    let roster = dir.path().join("roster.json");

    cli(&roster)
        .args(["generate", "--slots", "18:00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("roster is empty"));
}
