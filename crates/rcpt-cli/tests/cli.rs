use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const COSTCO: &str = "2655 El Camino Real\n03/01/2020\nTOTAL 45.67\n";

fn rcpt(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("rcpt").unwrap();
    cmd.env("HOME", home).env("XDG_CONFIG_HOME", home.join(".config"));
    cmd
}

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

#[test]
fn batch_reports_field_accuracy() {
    let home = TempDir::new().unwrap();
    let receipts = TempDir::new().unwrap();
    let dir = receipts.path();

    write(dir, "2020-03-01-costco-$45.67.txt", COSTCO);
    write(dir, "2020-03-02-costco-$45.67.txt", COSTCO);
    write(dir, "2019-12-24-safeway-$10.0.txt", "645 San Antonio Rd\n12/24/19\nTOTAL 10.00\n");
    write(dir, "2020-01-05-target-$20.0.txt", "TARGET\n01/05/2020\nTOTAL 19.99\n");
    write(dir, "ignored.pdf", "not a receipt");

    rcpt(home.path())
        .args(["batch", dir.to_str().unwrap(), "--extension", "txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 4 files"))
        .stdout(predicate::str::contains("-> 2020-01-05-target-$19.99.txt"))
        .stdout(predicate::str::contains("date: 3/4: 75.0 %"))
        .stdout(predicate::str::contains("name: 4/4: 100.0 %"))
        .stdout(predicate::str::contains("price: 3/4: 75.0 %"));
}

#[test]
fn batch_with_no_files_reports_no_data() {
    let home = TempDir::new().unwrap();
    let receipts = TempDir::new().unwrap();

    rcpt(home.path())
        .args(["batch", receipts.path().to_str().unwrap(), "--extension", "txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no data: no comparable input files"));
}

#[test]
fn batch_skips_unconventional_names_from_scoring() {
    let home = TempDir::new().unwrap();
    let receipts = TempDir::new().unwrap();
    write(receipts.path(), "scan0001.txt", COSTCO);

    rcpt(home.path())
        .args(["batch", receipts.path().to_str().unwrap(), "-e", "txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not scored"))
        .stdout(predicate::str::contains("no data"));
}

#[test]
fn batch_writes_summary_csv() {
    let home = TempDir::new().unwrap();
    let receipts = TempDir::new().unwrap();
    write(receipts.path(), "2020-03-01-costco-$45.67.txt", COSTCO);
    let summary = receipts.path().join("summary.csv");

    rcpt(home.path())
        .args(["batch", receipts.path().to_str().unwrap(), "-e", "txt", "--summary"])
        .arg(&summary)
        .assert()
        .success();

    let csv = fs::read_to_string(&summary).unwrap();
    assert!(csv.starts_with("source,status,filename"));
    assert!(csv.contains("2020-03-01-costco-$45.67.txt,success,2020-03-01-costco-$45.67.txt,costco,2020-03-01,45.67,true,true,true,"));
}

#[test]
fn batch_apply_renames_files() {
    let home = TempDir::new().unwrap();
    let receipts = TempDir::new().unwrap();
    write(receipts.path(), "scan0001.txt", COSTCO);

    rcpt(home.path())
        .args(["batch", receipts.path().to_str().unwrap(), "-e", "txt", "--apply", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Renamed 1 files"));

    assert!(!receipts.path().join("scan0001.txt").exists());
    assert!(receipts.path().join("2020-03-01-costco-$45.67.txt").exists());
}

#[test]
fn batch_apply_sanitizes_first_line_names() {
    let home = TempDir::new().unwrap();
    let receipts = TempDir::new().unwrap();
    write(receipts.path(), "scan0001.txt", "A/B Market\n03/01/2020\nTOTAL 5.00\n");
    let config = home.path().join("rcpt.json");
    fs::write(&config, r#"{"extraction": {"first_line_fallback": true}}"#).unwrap();

    rcpt(home.path())
        .arg("-c")
        .arg(&config)
        .args(["batch", receipts.path().to_str().unwrap(), "-e", "txt", "--apply", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Renamed 1 files"));

    assert!(receipts.path().join("2020-03-01-a b market-$5.0.txt").exists());
}

#[test]
fn batch_apply_skips_names_with_separators_and_continues() {
    let home = TempDir::new().unwrap();
    let receipts = TempDir::new().unwrap();
    write(receipts.path(), "scan0001.txt", "Corner Shop\n03/01/2020\nTOTAL 5.00\n");
    write(receipts.path(), "scan0002.txt", COSTCO);
    let config = home.path().join("rcpt.json");
    fs::write(
        &config,
        r#"{"extraction": {"rules": [
            {"location_pattern": "corner", "canonical_name": "a/b"},
            {"location_pattern": "2655 el camino real", "canonical_name": "costco"}
        ]}}"#,
    )
    .unwrap();

    rcpt(home.path())
        .arg("-c")
        .arg(&config)
        .args(["batch", receipts.path().to_str().unwrap(), "-e", "txt", "--apply", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Renamed 1 files"))
        .stdout(predicate::str::contains("Skipped 1 files"));

    assert!(receipts.path().join("scan0001.txt").exists());
    assert!(receipts.path().join("2020-03-01-costco-$45.67.txt").exists());
}

#[test]
fn batch_without_apply_leaves_files_alone() {
    let home = TempDir::new().unwrap();
    let receipts = TempDir::new().unwrap();
    write(receipts.path(), "scan0001.txt", COSTCO);

    rcpt(home.path())
        .args(["batch", receipts.path().to_str().unwrap(), "-e", "txt"])
        .assert()
        .success();

    assert!(receipts.path().join("scan0001.txt").exists());
}

#[test]
fn process_prints_synthesized_name() {
    let home = TempDir::new().unwrap();
    let receipts = TempDir::new().unwrap();
    write(receipts.path(), "receipt.txt", "random store\nno date here\n9.99\n");

    rcpt(home.path())
        .arg("process")
        .arg(receipts.path().join("receipt.txt"))
        .args(["--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"filename\": \"1970-01-01-unknown biz-$9.99.txt\""))
        .stdout(predicate::str::contains("\"business_name\": \"unknown biz\""));
}

#[test]
fn process_missing_file_fails() {
    let home = TempDir::new().unwrap();

    rcpt(home.path())
        .args(["process", "/nonexistent/receipt.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn process_uses_configured_date_window() {
    let home = TempDir::new().unwrap();
    let receipts = TempDir::new().unwrap();
    write(receipts.path(), "receipt.txt", "2655 El Camino Real\n03/01/2023\nTOTAL 45.67\n");
    let config = receipts.path().join("config.json");
    fs::write(
        &config,
        r#"{"extraction": {"date_window": {"min_year": 2023, "max_year": 2024}}}"#,
    )
    .unwrap();

    rcpt(home.path())
        .arg("-c")
        .arg(&config)
        .arg("process")
        .arg(receipts.path().join("receipt.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("2023-03-01-costco-$45.67.txt"));
}

#[test]
fn compare_flags_each_field() {
    let home = TempDir::new().unwrap();

    rcpt(home.path())
        .args(["compare", "2020-03-01-costco-$45.67.pdf", "2020-03-01-costco-$45.60.pdf", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"date_equal\": true"))
        .stdout(predicate::str::contains("\"price_equal\": false"));
}

#[test]
fn compare_rejects_malformed_names() {
    let home = TempDir::new().unwrap();

    rcpt(home.path())
        .args(["compare", "scan.pdf", "2020-03-01-costco-$45.67.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("date-name-price convention"));
}

#[test]
fn config_init_set_get() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("rcpt.json");
    let config = config.to_str().unwrap();

    rcpt(home.path())
        .args(["-c", config, "config", "init"])
        .assert()
        .success();

    rcpt(home.path())
        .args(["-c", config, "config", "set", "extraction.date_window.max_year", "2025"])
        .assert()
        .success();

    rcpt(home.path())
        .args(["-c", config, "config", "get", "extraction.date_window.max_year"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2025"));

    rcpt(home.path())
        .args(["-c", config, "config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn config_rules_lists_precedence() {
    let home = TempDir::new().unwrap();

    rcpt(home.path())
        .args(["config", "rules"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. costco"))
        .stdout(predicate::str::contains("2655 el camino real"));
}

#[test]
fn config_rules_with_empty_table() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("rcpt.json");
    fs::write(&config, r#"{"extraction": {"rules": []}}"#).unwrap();

    rcpt(home.path())
        .arg("-c")
        .arg(&config)
        .args(["config", "rules"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No business rules configured"));
}
