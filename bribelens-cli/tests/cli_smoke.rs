use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn list_prints_all_five_labels() {
    let mut cmd = Command::cargo_bin("bribelens").unwrap();
    cmd.arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bribe distribution"))
        .stdout(predicate::str::contains("State wise Bribe data"))
        .stdout(predicate::str::contains("Top 15 Departments"))
        .stdout(predicate::str::contains("Top 20 Districts"))
        .stdout(predicate::str::contains("Bribes over time"));
}

#[test]
fn render_requires_a_database_url() {
    let mut cmd = Command::cargo_bin("bribelens").unwrap();
    cmd.args(["render", "distribution"])
        .env_remove("DATABASE_URL")
        .assert()
        .failure()
        .stderr(predicate::str::contains("DATABASE_URL"));
}

#[test]
fn unknown_chart_is_rejected() {
    let mut cmd = Command::cargo_bin("bribelens").unwrap();
    cmd.args(["render", "moon-phase"])
        .env_remove("DATABASE_URL")
        .assert()
        .failure();
}
