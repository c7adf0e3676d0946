//! Binary smoke tests

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn opdeck(tmp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("opdeck").expect("binary exists");
    cmd.env("OPDECK_STORE_DB", tmp.path().join("opdeck.db"));
    cmd
}

#[test]
fn help_lists_the_views() {
    let tmp = TempDir::new().expect("tempdir");
    opdeck(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("chat"))
        .stdout(predicate::str::contains("admin"))
        .stdout(predicate::str::contains("models"))
        .stdout(predicate::str::contains("register"));
}

#[test]
fn whoami_without_session_reports_logged_out() {
    let tmp = TempDir::new().expect("tempdir");
    opdeck(&tmp)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in."));
}

#[test]
fn login_with_unknown_account_reports_failure() {
    let tmp = TempDir::new().expect("tempdir");
    opdeck(&tmp)
        .args(["login", "nobody", "--password", "wrong-password"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Authentication error"));
}

#[test]
fn protected_commands_require_a_session() {
    let tmp = TempDir::new().expect("tempdir");
    opdeck(&tmp)
        .args(["models", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn admin_commands_require_the_admin_role() {
    let tmp = TempDir::new().expect("tempdir");
    opdeck(&tmp)
        .args(["admin", "dashboard"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn logout_without_session_is_a_no_op() {
    let tmp = TempDir::new().expect("tempdir");
    opdeck(&tmp)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out."));
}
