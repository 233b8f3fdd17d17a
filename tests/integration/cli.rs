//! Integration tests for the keyforge binary

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

use crate::integration::test_utils::{failing_keygen, fake_keygen, scripts};

fn run_keyforge(temp: &Path, config_file: &Path, args: &[&str]) -> Output {
    let home = temp.join("home");
    let config_home = temp.join("config");
    std::fs::create_dir_all(&home).unwrap();
    std::fs::create_dir_all(&config_home).unwrap();
    scripts();

    Command::new(env!("CARGO_BIN_EXE_keyforge"))
        .env("HOME", home.as_os_str())
        .env("XDG_CONFIG_HOME", config_home.as_os_str())
        .env_remove("KEYFORGE_VERBOSE")
        .env_remove("VERBOSE")
        .arg("--config")
        .arg(config_file)
        .args(args)
        .output()
        .unwrap()
}

fn empty_config(temp: &Path) -> std::path::PathBuf {
    let path = temp.join("keyforge.toml");
    std::fs::write(&path, "").unwrap();
    path
}

#[test]
fn test_generate_json_with_destroy() {
    let temp = TempDir::new().unwrap();
    let binary = fake_keygen();
    let config = empty_config(temp.path());
    let location = temp.path().join("cli_id_rsa");

    let output = run_keyforge(
        temp.path(),
        &config,
        &[
            "generate",
            "--ssh-keygen-path",
            binary.to_str().unwrap(),
            "--location",
            location.to_str().unwrap(),
            "--comment",
            "cli@test",
            "--destroy",
            "--json",
        ],
    );

    assert!(
        output.status.success(),
        "generate should succeed: stderr={:?}",
        String::from_utf8_lossy(&output.stderr)
    );
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["keys"]["publicKey"], "ssh-rsa AAAAFAKEKEY cli@test");
    assert_eq!(value["destroyed"], true);
    assert!(!location.exists());
}

#[test]
fn test_config_file_supplies_defaults() {
    let temp = TempDir::new().unwrap();
    let binary = fake_keygen();
    let location = temp.path().join("configured_id");
    let config = temp.path().join("keyforge.toml");
    std::fs::write(
        &config,
        format!(
            "[defaults]\nexecutable_path = {:?}\nlocation = {:?}\nkey_type = \"ed25519\"\nread = false\n",
            binary.to_str().unwrap(),
            location.to_str().unwrap()
        ),
    )
    .unwrap();

    let output = run_keyforge(temp.path(), &config, &["generate"]);

    assert!(
        output.status.success(),
        "generate should succeed: stderr={:?}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Key pair written to"));
    assert!(std::fs::read_to_string(&location)
        .unwrap()
        .contains("ed25519-2048"));
}

#[test]
fn test_generator_stderr_becomes_exit_failure() {
    let temp = TempDir::new().unwrap();
    let binary = failing_keygen();
    let config = empty_config(temp.path());

    let output = run_keyforge(
        temp.path(),
        &config,
        &[
            "generate",
            "--ssh-keygen-path",
            binary.to_str().unwrap(),
            "--location",
            temp.path().join("id_rsa").to_str().unwrap(),
        ],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ssh-keygen failed: bad bit size"), "stderr={}", stderr);
}

#[test]
fn test_resolve_reports_missing_binary() {
    let temp = TempDir::new().unwrap();
    let config = empty_config(temp.path());

    let output = run_keyforge(
        temp.path(),
        &config,
        &["resolve", "--path", "/nonexistent/ssh-keygen"],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("/nonexistent/ssh-keygen"), "stderr={}", stderr);
}

#[test]
fn test_resolve_prints_found_binary() {
    let temp = TempDir::new().unwrap();
    let binary = fake_keygen();
    let config = empty_config(temp.path());

    let output = run_keyforge(
        temp.path(),
        &config,
        &["resolve", "--path", binary.to_str().unwrap()],
    );

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        binary.display().to_string()
    );
}
