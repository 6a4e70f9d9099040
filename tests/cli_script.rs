mod common;

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use common::temp_home;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

const DEPOSITS: &str = r#"[
    {"_id": "a", "amount": 100, "date": "2024-01-10T10:00:00", "description": "Aporte Enero"},
    {"_id": "b", "amount": "250.5", "date": "2024-02-05T09:30:00", "description": "Cuota"},
    {"_id": "c", "amount": 40, "createdAt": "2024-02-20T18:00:00", "description": "aporte extra"}
]"#;

fn write_deposits(home: &Path) -> PathBuf {
    let path = home.join("deposits.json");
    std::fs::write(&path, DEPOSITS).unwrap();
    path
}

fn shell(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("savings_core_cli").unwrap();
    cmd.env("SAVINGS_CORE_CLI_SCRIPT", "1")
        .env("SAVINGS_CORE_HOME", home)
        .env("SAVINGS_CORE_TODAY", "2024-02-15")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn script_mode_loads_and_lists() {
    let home = temp_home();
    let path = write_deposits(&home);
    let input = format!("load {}\nfilter text aporte\nlist\nexit\n", path.display());

    shell(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Loaded 3 deposits"))
        .stdout(contains("Aporte Enero"))
        .stdout(contains("Showing 2 of 3 deposits, total Bs. 140.00."))
        .stdout(contains("Cuota ").not());
}

#[test]
fn calendar_shows_month_of_today() {
    let home = temp_home();
    let path = write_deposits(&home);
    let input = format!("load {}\ncalendar\n", path.display());

    shell(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("=== February 2024 ==="))
        .stdout(contains(" Su   Mo   Tu   We   Th   Fr   Sa"))
        .stdout(contains(">15"))
        .stdout(contains("Deposits: 2  Total: Bs. 290.50  Average: Bs. 145.25"));
}

#[test]
fn navigation_changes_displayed_month() {
    let home = temp_home();
    let path = write_deposits(&home);
    let input = format!("load {}\nprev\n", path.display());

    shell(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Now showing January 2024 (2024-01)."))
        .stdout(contains("Deposits: 1  Total: Bs. 100.00"));
}

#[test]
fn report_follows_filters() {
    let home = temp_home();
    let path = write_deposits(&home);
    let input = format!(
        "load {}\nfilter min 50\nfilter to 2024-01-31\nreport\n",
        path.display()
    );

    shell(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Deposits   : 1"))
        .stdout(contains("Total      : Bs. 100.00"))
        .stdout(contains("Export name: Depositos_2024-02-15.pdf"));
}

#[test]
fn unknown_command_suggests_closest() {
    let home = temp_home();
    shell(&home)
        .write_stdin("calendr\nexit\n")
        .assert()
        .success()
        .stdout(contains("Unknown command `calendr`"))
        .stdout(contains("Suggestion: `calendar`?"));
}

#[test]
fn commands_without_deposits_report_errors() {
    let home = temp_home();
    shell(&home)
        .write_stdin("list\n")
        .assert()
        .success()
        .stderr(contains("No deposits loaded"));
}

#[test]
fn loaded_file_is_remembered_between_runs() {
    let home = temp_home();
    let path = write_deposits(&home);
    shell(&home)
        .write_stdin(format!("load {}\n", path.display()))
        .assert()
        .success();

    shell(&home)
        .write_stdin("goal\n")
        .assert()
        .success()
        .stdout(contains("Saved    : Bs. 390.50 of Bs. 500.00 (78%)"));
}
