//! CLI integration tests for the contact book
//!
//! These tests drive the `contacts` binary end to end: one-shot
//! subcommands, persistence between runs and the interactive shell.

use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A temp dir holding the book and an (absent) config file
struct Env {
    dir: TempDir,
}

impl Env {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn book(&self) -> PathBuf {
        self.dir.path().join("contacts.jsonl")
    }

    fn config(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    /// Get a command instance for the contacts binary bound to this env
    fn cmd(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("contacts"));
        cmd.env_remove("RUST_LOG")
            .arg("--book")
            .arg(self.book())
            .arg("--config")
            .arg(self.config());
        cmd
    }

    fn run(&self, args: &[&str]) {
        self.cmd().args(args).assert().success();
    }
}

// =============================================================================
// Contacts
// =============================================================================

#[test]
fn test_add_creates_contact_and_snapshot() {
    let env = Env::new();

    env.cmd()
        .args(["add", "Ann", "0991234567"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Contact added."));

    let content = fs::read_to_string(env.book()).unwrap();
    assert_eq!(content.lines().count(), 1);
    assert!(content.contains("\"name\":\"Ann\""));
    assert!(content.contains("0991234567"));
}

#[test]
fn test_add_existing_contact_appends_phone() {
    let env = Env::new();
    env.run(&["add", "Ann", "0991234567"]);

    env.cmd()
        .args(["add", "Ann", "0501112233"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Contact updated."));

    env.cmd()
        .args(["phone", "Ann"])
        .assert()
        .success()
        .stdout("0991234567\n0501112233\n");
}

#[test]
fn test_padded_name_reaches_existing_contact() {
    let env = Env::new();
    env.run(&["add", "Ann", "0991234567"]);

    env.cmd()
        .args(["add", " Ann", "0501112233"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Contact updated."));
    env.run(&["add-birthday", " Ann ", "03.01.1990"]);

    env.cmd()
        .arg("all")
        .assert()
        .success()
        .stdout("Ann: 0991234567, 0501112233\n");
    env.cmd()
        .args(["show-birthday", "Ann"])
        .assert()
        .success()
        .stdout("03.01.1990\n");
}

#[test]
fn test_add_invalid_phone_fails() {
    let env = Env::new();

    env.cmd()
        .args(["add", "Ann", "12"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid phone number '12'"));

    assert!(!env.book().exists());
}

#[test]
fn test_change_phone() {
    let env = Env::new();
    env.run(&["add", "Ann", "0991234567"]);

    env.cmd()
        .args(["change", "Ann", "0991234567", "0997654321"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Contact updated."));

    env.cmd()
        .args(["phone", "Ann"])
        .assert()
        .success()
        .stdout("0997654321\n");
}

#[test]
fn test_change_missing_phone_fails() {
    let env = Env::new();
    env.run(&["add", "Ann", "1111111111"]);

    env.cmd()
        .args(["change", "Ann", "0991234567", "0997654321"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Phone \"0991234567\" does not exist."));
}

#[test]
fn test_phone_unknown_contact_fails() {
    let env = Env::new();

    env.cmd()
        .args(["phone", "Ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Contact \"Ghost\" does not exist."));
}

#[test]
fn test_all_lists_contacts() {
    let env = Env::new();

    env.cmd()
        .arg("all")
        .assert()
        .success()
        .stdout(predicate::str::contains("The address book is empty."));

    env.run(&["add", "Bo", "0501112233"]);
    env.run(&["add", "Ann", "0991234567"]);

    env.cmd()
        .arg("all")
        .assert()
        .success()
        .stdout("Bo: 0501112233\nAnn: 0991234567\n");
}

#[test]
fn test_all_json() {
    let env = Env::new();
    env.run(&["add", "Ann", "0991234567"]);
    env.run(&["add-birthday", "Ann", "03.01.1990"]);

    let output = env.cmd().args(["all", "--format", "json"]).assert().success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json[0]["name"], "Ann");
    assert_eq!(json[0]["phones"][0], "0991234567");
    assert_eq!(json[0]["birthday"], "03.01.1990");
}

#[test]
fn test_delete_and_remove_phone() {
    let env = Env::new();
    env.run(&["add", "Ann", "0991234567"]);
    env.run(&["add", "Ann", "0501112233"]);

    env.cmd()
        .args(["remove-phone", "Ann", "0991234567"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Phone removed."));

    env.cmd()
        .args(["delete", "Ann"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Contact deleted."));

    env.cmd()
        .args(["delete", "Ann"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

// =============================================================================
// Birthdays
// =============================================================================

#[test]
fn test_birthday_round_trip() {
    let env = Env::new();
    env.run(&["add", "Ann"]);

    env.cmd()
        .args(["show-birthday", "Ann"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Contact date of birth is not specified."));

    env.cmd()
        .args(["add-birthday", "Ann", "03.01.1990"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Contact birthday added."));

    env.cmd()
        .args(["show-birthday", "Ann"])
        .assert()
        .success()
        .stdout("03.01.1990\n");
}

#[test]
fn test_invalid_birthday_fails() {
    let env = Env::new();
    env.run(&["add", "Ann"]);

    env.cmd()
        .args(["add-birthday", "Ann", "31.04.1990"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid birthday"));
}

#[test]
fn test_birthdays_shift_weekend_to_monday() {
    let env = Env::new();
    env.run(&["add", "Ann"]);
    env.run(&["add-birthday", "Ann", "03.01.1985"]);
    env.run(&["add", "Bo"]);
    env.run(&["add-birthday", "Bo", "06.01.1990"]);
    env.run(&["add", "Cy"]);
    env.run(&["add-birthday", "Cy", "08.01.1990"]);

    env.cmd()
        .args(["birthdays", "--today", "01.01.2024"])
        .assert()
        .success()
        .stdout("Ann: 03.01.2024\nBo: 08.01.2024\n");
}

#[test]
fn test_birthdays_custom_window_and_json() {
    let env = Env::new();
    env.run(&["add", "Ann"]);
    env.run(&["add-birthday", "Ann", "20.01.1990"]);

    env.cmd()
        .args(["birthdays", "--today", "01.01.2024"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No upcoming birthdays."));

    let output = env
        .cmd()
        .args(["birthdays", "--today", "01.01.2024", "--days", "30", "-f", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json[0]["name"], "Ann");
    assert_eq!(json[0]["birthday"], "20.01.2024");
    assert_eq!(json[0]["greeting_date"], "22.01.2024");
}

#[test]
fn test_birthdays_window_from_config() {
    let env = Env::new();
    fs::write(env.config(), "birthday_window_days = 30\n").unwrap();
    env.run(&["add", "Ann"]);
    env.run(&["add-birthday", "Ann", "16.01.1990"]);

    env.cmd()
        .args(["birthdays", "--today", "01.01.2024"])
        .assert()
        .success()
        .stdout("Ann: 16.01.2024\n");
}

#[test]
fn test_birthdays_rejects_bad_today() {
    let env = Env::new();

    env.cmd()
        .args(["birthdays", "--today", "2024-01-01"])
        .assert()
        .failure();
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_invalid_config_fails() {
    let env = Env::new();
    fs::write(env.config(), "birthday_window_days = 0\n").unwrap();

    env.cmd()
        .arg("all")
        .assert()
        .failure()
        .stderr(predicate::str::contains("birthday_window_days"));
}

#[test]
fn test_config_init_and_show() {
    let env = Env::new();

    env.cmd()
        .args(["config", "--init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default config"));
    assert!(env.config().is_file());

    env.cmd()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("birthday window days: 7"))
        .stdout(predicate::str::contains("contacts.jsonl"));
}

#[test]
fn test_config_show_json() {
    let env = Env::new();
    fs::write(env.config(), "birthday_window_days = 14\n").unwrap();

    let out = env
        .cmd()
        .args(["--format", "json", "config"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["birthday_window_days"], 14);
    assert_eq!(value["default_format"], "text");
    assert!(value["book_path"].as_str().unwrap().ends_with("contacts.jsonl"));
    assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
}

#[test]
fn test_corrupt_snapshot_fails() {
    let env = Env::new();
    fs::write(env.book(), "not json\n").unwrap();

    env.cmd()
        .arg("all")
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 1"));
}

// =============================================================================
// Interactive shell
// =============================================================================

#[test]
fn test_shell_session_persists_on_exit() {
    let env = Env::new();

    env.cmd()
        .write_stdin("hello\nadd Ann 0991234567\nadd-birthday Ann 03.01.1990\nfly\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome to the assistant bot!"))
        .stdout(predicate::str::contains("How can I help you?"))
        .stdout(predicate::str::contains("Contact added."))
        .stdout(predicate::str::contains("Invalid command."))
        .stdout(predicate::str::contains("Good bye!"));

    env.cmd()
        .args(["show-birthday", "Ann"])
        .assert()
        .success()
        .stdout("03.01.1990\n");
}

#[test]
fn test_shell_saves_at_end_of_input() {
    let env = Env::new();

    env.cmd()
        .arg("shell")
        .write_stdin("add Bo 0501112233\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Good bye!"));

    env.cmd()
        .args(["phone", "Bo"])
        .assert()
        .success()
        .stdout("0501112233\n");
}
