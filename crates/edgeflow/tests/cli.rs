use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_subcommands() {
    Command::cargo_bin("edgeflow")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("deploy"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn deploy_help_lists_provisioning_flags() {
    Command::cargo_bin("edgeflow")
        .unwrap()
        .args(["deploy", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--namespace"))
        .stdout(predicate::str::contains("--base-url"))
        .stdout(predicate::str::contains("--token-expires-in"))
        .stdout(predicate::str::contains("--seed-file"));
}

#[test]
fn unknown_subcommand_fails() {
    Command::cargo_bin("edgeflow")
        .unwrap()
        .arg("teleport")
        .assert()
        .failure();
}
