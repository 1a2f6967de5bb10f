use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_config_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("tasklist-{nanos}-{file_name}"))
}

#[test]
fn cli_smoke_help() {
    let exe = env!("CARGO_BIN_EXE_tasklist");
    let output = Command::new(exe)
        .arg("--help")
        .env("TASKLIST_CONFIG_PATH", temp_config_path("smoke-config.json"))
        .output()
        .expect("failed to run tasklist --help");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.trim().is_empty());
}

#[test]
fn whoami_reports_signed_out_by_default() {
    let exe = env!("CARGO_BIN_EXE_tasklist");
    let output = Command::new(exe)
        .arg("whoami")
        .env("TASKLIST_CONFIG_PATH", temp_config_path("whoami-config.json"))
        .env_remove("TASKLIST_USER")
        .output()
        .expect("failed to run whoami command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("signed out"));
}

#[test]
fn whoami_reads_the_user_env_var() {
    let exe = env!("CARGO_BIN_EXE_tasklist");
    let output = Command::new(exe)
        .arg("whoami")
        .env("TASKLIST_CONFIG_PATH", temp_config_path("whoami-env-config.json"))
        .env("TASKLIST_USER", "alice")
        .output()
        .expect("failed to run whoami command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("alice"));
}
