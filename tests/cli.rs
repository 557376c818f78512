use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A data directory with an empty template set, so tests start from nothing
fn setup() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("config.json"),
        r#"{"year": 2026, "control_day": 29, "currency_symbol": "€", "defaults": {}}"#,
    )
    .unwrap();
    dir
}

fn paycontrol(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("paycontrol").unwrap();
    cmd.env("PAYCONTROL_DATA_DIR", dir.path())
        .env_remove("RUST_LOG");
    cmd
}

fn run(dir: &TempDir, args: &[&str]) {
    paycontrol(dir).args(args).assert().success();
}

/// Joint account with the scenario from the household's January
fn scenario(dir: &TempDir) {
    run(dir, &["account", "create", "Joint", "--id", "A1", "--balance", "1000"]);
    run(dir, &["fixed", "add", "Insurance", "50", "--account", "A1", "--due-day", "5", "--id", "f1"]);
    run(
        dir,
        &["expense", "add", "Plumber", "20", "--account", "Joint", "--date", "2026-01-15", "--id", "e1"],
    );
}

#[test]
fn test_no_command_prints_usage_hint() {
    let dir = TempDir::new().unwrap();
    paycontrol(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("paycontrol init"));
}

#[test]
fn test_init_creates_ledger() {
    let dir = setup();
    paycontrol(&dir)
        .args(["init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete"));

    assert!(dir.path().join("data").join("ledger-2026.json").exists());

    paycontrol(&dir)
        .args(["init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn test_init_seeds_default_accounts() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["--year", "2026", "init"]);

    paycontrol(&dir)
        .args(["--year", "2026", "account", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Joint Account"));
}

#[test]
fn test_config_lists_years() {
    let dir = setup();
    run(&dir, &["init"]);
    run(&dir, &["--year", "2027", "init"]);

    paycontrol(&dir)
        .args(["config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ledgers: 2026, 2027"));
}

#[test]
fn test_account_create_and_list() {
    let dir = setup();
    paycontrol(&dir)
        .args(["account", "create", "Joint", "--id", "A1", "--balance", "1000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created account: Joint"))
        .stdout(predicate::str::contains("€1000.00"));

    paycontrol(&dir)
        .args(["account", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Joint"));
}

#[test]
fn test_duplicate_account_id_fails() {
    let dir = setup();
    run(&dir, &["account", "create", "Joint", "--id", "A1"]);

    paycontrol(&dir)
        .args(["account", "create", "Other", "--id", "A1"])
        .assert()
        .failure();
}

#[test]
fn test_summary_scenario() {
    let dir = setup();
    scenario(&dir);

    paycontrol(&dir)
        .args(["summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Account summary 2026"))
        .stdout(predicate::str::contains("€70.00"))
        .stdout(predicate::str::contains("€1000.00"));
}

#[test]
fn test_pay_and_unpay() {
    let dir = setup();
    scenario(&dir);

    paycontrol(&dir)
        .args(["pay", "f1", "2026-01", "--on", "2026-01-05"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded payment of f1 for 2026-01"));

    // Paying the same month twice is rejected
    paycontrol(&dir)
        .args(["pay", "f1", "2026-01"])
        .assert()
        .failure();

    // Only the plumber is left pending; the balance drops by the insurance
    paycontrol(&dir)
        .args(["summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("€20.00"))
        .stdout(predicate::str::contains("€950.00"));

    paycontrol(&dir)
        .args(["unpay", "f1", "2026-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared payment"));

    paycontrol(&dir)
        .args(["unpay", "f1", "2026-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("had no payment recorded"));
}

#[test]
fn test_month_view() {
    let dir = setup();
    scenario(&dir);

    paycontrol(&dir)
        .args(["month", "2026-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Month 2026-01"))
        .stdout(predicate::str::contains("Control date: 2026-01-29"))
        .stdout(predicate::str::contains("Insurance"))
        .stdout(predicate::str::contains("Plumber"));

    paycontrol(&dir)
        .args(["month", "2026-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Insurance"))
        .stdout(predicate::str::contains("Plumber").not());
}

#[test]
fn test_month_outside_year_fails() {
    let dir = setup();
    scenario(&dir);

    paycontrol(&dir).args(["month", "2025-12"]).assert().failure();
    paycontrol(&dir).args(["month", "2026-13"]).assert().failure();
}

#[test]
fn test_expense_paid_flag() {
    let dir = setup();
    scenario(&dir);

    run(&dir, &["expense", "paid", "e1"]);
    paycontrol(&dir)
        .args(["expense", "list", "--unpaid"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plumber").not());

    run(&dir, &["expense", "unpaid", "e1"]);
    paycontrol(&dir)
        .args(["expense", "list", "--unpaid"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plumber"));
}

#[test]
fn test_expense_date_outside_year_fails() {
    let dir = setup();
    scenario(&dir);

    paycontrol(&dir)
        .args(["expense", "add", "Gift", "10", "--account", "A1", "--date", "2027-01-02"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("outside the 2026 ledger"));
}

#[test]
fn test_remove_account_with_dependents_fails() {
    let dir = setup();
    scenario(&dir);

    paycontrol(&dir)
        .args(["account", "remove", "A1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot remove"));
}

#[test]
fn test_locked_fixed_expense() {
    let dir = setup();
    scenario(&dir);
    run(&dir, &["pay", "f1", "2026-01"]);

    paycontrol(&dir)
        .args(["fixed", "edit", "f1", "--amount", "60"])
        .assert()
        .failure();
    paycontrol(&dir)
        .args(["fixed", "remove", "f1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot remove"));
}

#[test]
fn test_negative_amount_fails() {
    let dir = setup();
    run(&dir, &["account", "create", "Joint", "--id", "A1"]);

    paycontrol(&dir)
        .args(["fixed", "add", "--account", "A1", "--", "Rent", "-5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation"));
}

#[test]
fn test_oversized_amount_fails() {
    let dir = setup();
    run(&dir, &["account", "create", "Joint", "--id", "A1"]);

    paycontrol(&dir)
        .args(["expense", "add", "Roof", "99999999999999999", "--account", "A1", "--date", "2026-01-02"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid amount"));
    paycontrol(&dir)
        .args(["fixed", "add", "Roof", "100000000000.01", "--account", "A1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds the maximum"));
}

#[test]
fn test_subscription_window() {
    let dir = setup();
    run(&dir, &["account", "create", "Joint", "--id", "A1"]);
    run(
        &dir,
        &[
            "sub", "add", "Streaming", "9.99", "--account", "A1", "--start", "2026-03-01", "--end",
            "2026-05-31", "--id", "s1",
        ],
    );

    paycontrol(&dir)
        .args(["month", "2026-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Streaming").not());
    paycontrol(&dir)
        .args(["month", "2026-05"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Streaming"));
    paycontrol(&dir)
        .args(["pay", "s1", "2026-06"])
        .assert()
        .failure();
}

#[test]
fn test_export_pending() {
    let dir = setup();
    scenario(&dir);
    let out = TempDir::new().unwrap();

    paycontrol(&dir)
        .args(["export", "pending", "2026-01", "--output"])
        .arg(out.path())
        .assert()
        .success();

    let text = fs::read_to_string(out.path().join("pending_2026-01.txt")).unwrap();
    assert!(text.starts_with("Pending 2026-01"));
    assert!(text.contains("Insurance"));
    assert!(text.contains("Plumber"));
    assert!(text.contains("TOTAL: €70.00"));
}

#[test]
fn test_export_json_and_import() {
    let dir = setup();
    scenario(&dir);
    run(&dir, &["pay", "f1", "2026-01"]);
    let out = TempDir::new().unwrap();
    let file = out.path().join("ledger.json");

    paycontrol(&dir)
        .args(["export", "json", "--pretty"])
        .arg(&file)
        .assert()
        .success();
    let exported = fs::read_to_string(&file).unwrap();
    assert!(exported.contains("\"schema_version\""));

    // Import into a fresh data directory
    let other = setup();
    paycontrol(&other)
        .arg("import")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Payments:       1"));

    paycontrol(&other)
        .args(["summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("€950.00"));
}

#[test]
fn test_import_wrong_year_fails() {
    let dir = setup();
    scenario(&dir);
    let out = TempDir::new().unwrap();
    let file = out.path().join("ledger.yaml");

    paycontrol(&dir)
        .args(["export", "yaml"])
        .arg(&file)
        .assert()
        .success();

    paycontrol(&dir)
        .args(["--year", "2027", "import"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--year 2026"));
}

#[test]
fn test_export_csv() {
    let dir = setup();
    scenario(&dir);
    let out = TempDir::new().unwrap();
    let file = out.path().join("jan.csv");

    paycontrol(&dir)
        .args(["export", "csv", "--month", "2026-01"])
        .arg(&file)
        .assert()
        .success();

    let csv = fs::read_to_string(&file).unwrap();
    assert!(csv.starts_with("Due Date,ID,Account,Label,Kind,Amount,Paid"));
    assert_eq!(csv.lines().count(), 3);
}

#[test]
fn test_corrupt_ledger_is_reported() {
    let dir = setup();
    run(&dir, &["init"]);
    fs::write(dir.path().join("data").join("ledger-2026.json"), "{ not json").unwrap();

    paycontrol(&dir)
        .args(["summary"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Corrupt ledger data"));
}
