use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn run_cmd(db_path: &Path, args: &[&str]) -> String {
    let output = cargo_bin_cmd!("vetbase")
        .args(["--db-path", db_path.to_str().expect("db path")])
        .args(args)
        .output()
        .expect("run command");
    assert!(output.status.success(), "command failed: {:?}", output);
    String::from_utf8(output.stdout).expect("utf8")
}

fn run_cmd_json(db_path: &Path, args: &[&str]) -> Value {
    let output = cargo_bin_cmd!("vetbase")
        .args(["--db-path", db_path.to_str().expect("db path"), "--json"])
        .args(args)
        .output()
        .expect("run command");
    assert!(output.status.success(), "command failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("parse json")
}

fn add_owner(db_path: &Path, name: &str, phone: &str) -> String {
    let owner = run_cmd_json(
        db_path,
        &["add-owner", "--name", name, "--phone", phone],
    );
    owner["id"].as_str().expect("id").to_string()
}

#[test]
fn owner_crud_flow() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("vetbase.sqlite3");

    let id = add_owner(&db_path, "Ivanova A.", "80291234567");

    let list = run_cmd_json(&db_path, &["list"]);
    let items = list.as_array().expect("array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Ivanova A.");

    run_cmd(&db_path, &["edit-owner", &id, "--phone", "375291234567"]);
    let shown = run_cmd_json(&db_path, &["show", &id]);
    assert_eq!(shown["phone"], "375291234567");

    run_cmd(&db_path, &["delete", &id]);
    let list = run_cmd_json(&db_path, &["list"]);
    assert!(list.as_array().expect("array").is_empty());
}

#[test]
fn normalize_reports_both_piles() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("vetbase.sqlite3");

    let result = run_cmd_json(&db_path, &["normalize", "80291234567, 12345"]);
    assert_eq!(result["valid"], serde_json::json!(["375291234567"]));
    assert_eq!(result["invalid"], serde_json::json!(["12345"]));
}

#[test]
fn fix_phones_dry_run_then_persist() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("vetbase.sqlite3");

    let id = add_owner(&db_path, "Ivanova A.", "8(029)123-45-67");
    add_owner(&db_path, "Petrov B.", "abc");

    let dry = run_cmd_json(&db_path, &["fix-phones", "--dry-run"]);
    assert_eq!(dry["changed"], 1);
    assert_eq!(dry["dry_run"], true);
    assert_eq!(dry["entries"][0]["normalized"], "375291234567");

    // Dry run leaves the stored value alone.
    let shown = run_cmd_json(&db_path, &["show", &id]);
    assert_eq!(shown["phone"], "8(029)123-45-67");

    let fixed = run_cmd_json(&db_path, &["fix-phones"]);
    assert_eq!(fixed["changed"], 1);

    let shown = run_cmd_json(&db_path, &["show", &id]);
    assert_eq!(shown["phone"], "375291234567");

    // Second pass finds nothing left to change.
    let again = run_cmd_json(&db_path, &["fix-phones"]);
    assert_eq!(again["changed"], 0);
}

#[test]
fn phone_report_writes_sorted_deduplicated_files() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("vetbase.sqlite3");
    let out_dir = temp.path().join("report");

    let first = add_owner(&db_path, "Ivanova A.", "80291234567");
    let second = add_owner(&db_path, "Petrov B.", "291119922, 12345");
    let outside = add_owner(&db_path, "Sidorov C.", "80293334455");

    for (id, date) in [(first.as_str(), "2024-06-10"), (second.as_str(), "2024-06-20")] {
        run_cmd(
            &db_path,
            &["record-vaccination", id, "--vaccine", "rabies", "--on", date],
        );
    }
    run_cmd(
        &db_path,
        &[
            "record-vaccination",
            &outside,
            "--vaccine",
            "rabies",
            "--on",
            "2024-08-01",
        ],
    );

    let summary = run_cmd_json(
        &db_path,
        &[
            "phone-report",
            "--from",
            "2024-06-01",
            "--to",
            "2024-06-30",
            "--out-dir",
            out_dir.to_str().expect("out dir"),
        ],
    );
    assert_eq!(summary["owners"], 2);
    assert_eq!(summary["valid"], 2);
    assert_eq!(summary["invalid"], 1);

    let valid = fs::read_to_string(out_dir.join("correct_phones.txt")).expect("valid file");
    assert_eq!(valid, "375291119922\n375291234567\n");
    let invalid = fs::read_to_string(out_dir.join("incorrect_phones.txt")).expect("invalid file");
    assert_eq!(invalid, "12345\n");
}

#[test]
fn backup_produces_a_file() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("vetbase.sqlite3");
    let backup_path = temp.path().join("backup.sqlite3");

    add_owner(&db_path, "Ivanova A.", "80291234567");
    let report = run_cmd_json(
        &db_path,
        &["backup", "--out", backup_path.to_str().expect("path")],
    );
    assert!(report["size_bytes"].as_u64().expect("size") > 0);
    assert!(backup_path.exists());
}

#[test]
fn invalid_owner_id_maps_to_invalid_input_exit_code() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("vetbase.sqlite3");

    let output = cargo_bin_cmd!("vetbase")
        .args(["--db-path", db_path.to_str().expect("db path")])
        .args(["show", "not-a-uuid"])
        .output()
        .expect("run command");
    assert_eq!(output.status.code(), Some(3));
}
