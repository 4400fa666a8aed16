use std::fs;

use assert_cmd::Command;
use predicates::str::contains;
use tempfile::tempdir;

fn solfront_cmd() -> Command {
    Command::cargo_bin("solfront").expect("solfront binary")
}

#[test]
fn smoke_help_version_and_license() {
    solfront_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("Usage: solfront"));

    solfront_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(contains("solfront"));

    solfront_cmd()
        .arg("--license")
        .assert()
        .success()
        .stdout(contains("GNU General Public License"));
}

#[test]
fn smoke_unknown_option_fails_with_diagnostic() {
    solfront_cmd()
        .arg("--frobnicate")
        .assert()
        .failure()
        .stderr(contains("unrecognised option"));
}

#[test]
fn smoke_conflicting_modes_fail() {
    solfront_cmd()
        .args(["--standard-json", "--link"])
        .assert()
        .failure()
        .stderr(contains("mutually exclusive"));
}

#[test]
fn smoke_library_file_is_read() {
    let tempdir = tempdir().expect("tempdir");
    let libraries = tempdir.path().join("libraries.txt");
    fs::write(
        &libraries,
        "Math=0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
    )
    .expect("write libraries file");

    solfront_cmd()
        .args(["--link", "--libraries", libraries.to_str().expect("utf8 path")])
        .assert()
        .success();
}

#[test]
fn smoke_bad_checksum_reports_the_corrected_address() {
    solfront_cmd()
        .args([
            "--libraries",
            "Math=0x5AAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
        ])
        .assert()
        .failure()
        .stderr(contains("The correct checksum is"));
}
