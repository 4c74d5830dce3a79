//! End-to-end assertions against the real binary. None of these tests
//! reach a live object store; they exercise the error paths and exit
//! codes the operator sees.

use std::fs;
use std::path::Path;
use std::time::Duration;

use assert_cmd::Command;
use predicates::prelude::*;

const REQUIRED: [&str; 4] = [
    "AWS_ACCESS_KEY_ID",
    "AWS_SECRET_ACCESS_KEY",
    "AWS_BUCKET",
    "AWS_REGION",
];

/// Command scoped to a temp working directory with a scrubbed AWS
/// environment, so the ambient shell cannot leak credentials in.
fn rover_cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("rover").expect("binary exists");
    cmd.current_dir(dir);
    for name in REQUIRED {
        cmd.env_remove(name);
    }
    cmd.env_remove("AWS_PREFIX");
    cmd.env_remove("AWS_SESSION_TOKEN");
    cmd.env_remove("AWS_ENDPOINT");
    cmd
}

fn with_dummy_credentials(cmd: &mut Command) {
    cmd.env("AWS_ACCESS_KEY_ID", "AKIAEXAMPLE")
        .env("AWS_SECRET_ACCESS_KEY", "wJalrXUtnFEMI")
        .env("AWS_BUCKET", "retention")
        .env("AWS_REGION", "eu-west-1");
}

#[test]
fn upload_without_credentials_names_every_missing_variable() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = rover_cmd(dir.path());
    cmd.arg("upload");

    cmd.assert().failure().code(1).stderr(
        predicate::str::contains("AWS_ACCESS_KEY_ID")
            .and(predicate::str::contains("AWS_SECRET_ACCESS_KEY"))
            .and(predicate::str::contains("AWS_BUCKET"))
            .and(predicate::str::contains("AWS_REGION")),
    );
}

#[test]
fn only_the_missing_variable_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = rover_cmd(dir.path());
    cmd.env("AWS_ACCESS_KEY_ID", "AKIAEXAMPLE")
        .env("AWS_SECRET_ACCESS_KEY", "wJalrXUtnFEMI")
        .env("AWS_BUCKET", "retention")
        .arg("upload");

    cmd.assert().failure().code(1).stderr(
        predicate::str::contains("AWS_REGION")
            .and(predicate::str::contains("AWS_BUCKET").not())
            .and(predicate::str::contains("AWS_ACCESS_KEY_ID").not()),
    );
}

#[test]
fn missing_archive_file_exits_nonzero_before_any_upload() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = rover_cmd(dir.path());
    with_dummy_credentials(&mut cmd);
    cmd.arg("upload").arg("--file").arg("absent.zip");

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("absent.zip"));
}

#[test]
fn unreachable_service_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let mut archive = b"PK\x03\x04".to_vec();
    archive.extend_from_slice(&[0u8; 64]);
    fs::write(dir.path().join("rover.zip"), &archive).unwrap();

    let mut cmd = rover_cmd(dir.path());
    with_dummy_credentials(&mut cmd);
    // Nothing listens here; the single PUT attempt fails at transport.
    cmd.env("AWS_ENDPOINT", "http://127.0.0.1:1")
        .timeout(Duration::from_secs(60))
        .arg("upload");

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Upload failed"));
}

#[test]
fn run_log_is_written_under_the_host_directory() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = rover_cmd(dir.path());
    cmd.arg("upload");
    cmd.assert().failure();

    let host = gethostname::gethostname().to_string_lossy().into_owned();
    let log_path = dir.path().join(host).join("log").join("rover.log");
    let log = fs::read_to_string(log_path).expect("log file exists");
    assert!(log.contains("upload starting"));
}
