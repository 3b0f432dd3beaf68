//! Integration tests for the command-line interface

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path.display().to_string()
}

/// Registrations in two classes plus last round's winners.
fn fixtures(dir: &TempDir) -> (String, String) {
    let registrations = write(
        dir.path(),
        "registrations.csv",
        "name,class,phone\n\
         Ana,Morning,1\n\
         Ben,Morning,2\n\
         Cy,Morning,3\n\
         Dee,Evening,4\n\
         Eli,Evening,5\n\
         Fay,Evening,6\n\
         ,Evening,7\n\
         Ana,Evening,8\n",
    );
    let previous = write(dir.path(), "previous.csv", "name\nBen\nDee\n");
    (registrations, previous)
}

fn fair_draw() -> Command {
    let mut cmd = Command::cargo_bin("fair-draw").unwrap();
    cmd.env("CLICOLOR", "0").env_remove("RUST_LOG");
    cmd
}

fn read_output(path: &Path) -> String {
    let bytes = fs::read(path).unwrap();
    assert!(bytes.starts_with(b"\xEF\xBB\xBF"), "missing UTF-8 BOM");
    String::from_utf8(bytes[3..].to_vec()).unwrap()
}

#[test]
fn test_cli_help() {
    fair_draw()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("draw"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_draw_prefers_registrants_who_did_not_win() {
    let dir = TempDir::new().unwrap();
    let (registrations, previous) = fixtures(&dir);
    let output = dir.path().join("winners.csv");

    fair_draw()
        .args(["draw", registrations.as_str(), previous.as_str(), "--quota", "4", "--seed", "7"])
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Drew 4 winners."));

    let csv = read_output(&output);
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("name,class,phone"));
    let winners: Vec<&str> = lines.map(|l| l.split(',').next().unwrap()).collect();
    assert_eq!(winners.len(), 4);
    assert!(!winners.contains(&"Ben"));
    assert!(!winners.contains(&"Dee"));
}

#[test]
fn test_draw_with_same_seed_is_reproducible() {
    let dir = TempDir::new().unwrap();
    let (registrations, previous) = fixtures(&dir);
    let first = dir.path().join("first.csv");
    let second = dir.path().join("second.csv");

    for output in [&first, &second] {
        fair_draw()
            .args(["draw", registrations.as_str(), previous.as_str(), "-q", "3", "--seed", "99"])
            .arg("--output")
            .arg(output)
            .assert()
            .success();
    }

    assert_eq!(read_output(&first), read_output(&second));
}

#[test]
fn test_draw_shortfall_is_a_warning() {
    let dir = TempDir::new().unwrap();
    let (registrations, previous) = fixtures(&dir);
    let output = dir.path().join("winners.csv");

    fair_draw()
        .args(["draw", registrations.as_str(), previous.as_str(), "--quota", "10"])
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("topped up 2"))
        .stdout(predicate::str::contains("Only 6 registrants for a quota of 10"));

    assert_eq!(read_output(&output).lines().count(), 7);
}

#[test]
fn test_unknown_pinned_name_fails() {
    let dir = TempDir::new().unwrap();
    let (registrations, previous) = fixtures(&dir);
    let output = dir.path().join("winners.csv");

    fair_draw()
        .args(["draw", registrations.as_str(), previous.as_str(), "--quota", "2"])
        .args(["--pin", "Zed", "--pin", "Ana"])
        .arg("--output")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not registered for this draw: Zed"));

    assert!(!output.exists());
}

#[test]
fn test_missing_name_column_fails() {
    let dir = TempDir::new().unwrap();
    let (registrations, previous) = fixtures(&dir);

    fair_draw()
        .args(["check", registrations.as_str(), previous.as_str(), "--quota", "2"])
        .args(["--name-column", "Player"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "column 'Player' was not found in the registration table",
        ));
}

#[test]
fn test_missing_quota_fails() {
    let dir = TempDir::new().unwrap();
    let (registrations, previous) = fixtures(&dir);

    fair_draw()
        .args(["draw", registrations.as_str(), previous.as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("A quota is required"));
}

#[test]
fn test_grouped_draw_with_config_and_report() {
    let dir = TempDir::new().unwrap();
    let (registrations, previous) = fixtures(&dir);
    let config = write(
        dir.path(),
        "draw.json",
        r#"{ "groupColumn": "class", "quota": 2, "seed": 1 }"#,
    );
    let pinned = write(dir.path(), "pinned.txt", "Cy\n\n  \n");
    let output = dir.path().join("winners.csv");
    let report = dir.path().join("audit").join("report.json");

    fair_draw()
        .args(["draw", registrations.as_str(), previous.as_str(), "--config", config.as_str()])
        .args(["--pinned-file", pinned.as_str()])
        .arg("--output")
        .arg(&output)
        .arg("--report")
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("[Morning]"))
        .stdout(predicate::str::contains("Drew 4 winners across 2 groups."));

    let csv = read_output(&output);
    let rows: Vec<Vec<&str>> = csv.lines().skip(1).map(|l| l.split(',').collect()).collect();
    assert_eq!(rows.iter().filter(|r| r[1] == "Morning").count(), 2);
    assert_eq!(rows.iter().filter(|r| r[1] == "Evening").count(), 2);
    assert!(rows.iter().any(|r| r[0] == "Cy"));

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(report["seed"], 1);
    assert_eq!(report["groupColumn"], "class");
    assert_eq!(report["pinned"], serde_json::json!(["Cy"]));
    assert_eq!(report["groups"].as_array().unwrap().len(), 2);
    assert_eq!(report["registrations"]["sha1"].as_str().unwrap().len(), 40);
}

#[test]
fn test_check_describes_pools() {
    let dir = TempDir::new().unwrap();
    let (registrations, previous) = fixtures(&dir);

    fair_draw()
        .args(["check", registrations.as_str(), previous.as_str(), "--quota", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 blank, 1 duplicate rows dropped"))
        .stdout(predicate::str::contains("4 eligible, 2 backup"))
        .stdout(predicate::str::contains("Inputs are ready to draw."));
}

#[test]
fn test_check_leaves_pinned_names_out_of_pools() {
    let dir = TempDir::new().unwrap();
    let (registrations, previous) = fixtures(&dir);

    fair_draw()
        .args(["check", registrations.as_str(), previous.as_str(), "--quota", "3"])
        .args(["--pin", "Ana", "--pin", "Ben"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 eligible, 1 backup"));
}

#[test]
fn test_unsupported_input_format() {
    let dir = TempDir::new().unwrap();
    let registrations = write(dir.path(), "registrations.txt", "name\nAna\n");
    let previous = write(dir.path(), "previous.csv", "name\n");

    fair_draw()
        .args(["check", registrations.as_str(), previous.as_str(), "--quota", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file type 'txt'"));
}
