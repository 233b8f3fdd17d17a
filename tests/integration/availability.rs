//! Overwrite policy for pre-existing key files

use keyforge::{generate, KeygenError, KeygenOptions};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::integration::test_utils::fake_keygen;

fn pub_path(location: &Path) -> PathBuf {
    let mut raw = location.as_os_str().to_owned();
    raw.push(".pub");
    PathBuf::from(raw)
}

fn no_force(binary: &Path, location: &Path) -> KeygenOptions {
    KeygenOptions {
        location: Some(location.to_path_buf()),
        executable_path: Some(binary.to_path_buf()),
        force: Some(false),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_existing_private_key_blocks_without_force() {
    let temp = TempDir::new().unwrap();
    let binary = fake_keygen();
    let location = temp.path().join("id_rsa");
    std::fs::write(&location, "keep me").unwrap();
    std::fs::write(pub_path(&location), "keep me too").unwrap();

    let err = generate(no_force(&binary, &location)).await.unwrap_err();

    match err {
        KeygenError::AlreadyExists { path } => assert_eq!(path, location),
        other => panic!("expected AlreadyExists, got {:?}", other),
    }
    assert_eq!(std::fs::read_to_string(&location).unwrap(), "keep me");
    assert_eq!(
        std::fs::read_to_string(pub_path(&location)).unwrap(),
        "keep me too"
    );
}

#[tokio::test]
async fn test_existing_public_key_alone_blocks_without_force() {
    let temp = TempDir::new().unwrap();
    let binary = fake_keygen();
    let location = temp.path().join("id_rsa");
    std::fs::write(pub_path(&location), "orphan").unwrap();

    let err = generate(no_force(&binary, &location)).await.unwrap_err();

    assert!(matches!(err, KeygenError::AlreadyExists { ref path } if *path == pub_path(&location)));
    assert!(!location.exists());
}

#[tokio::test]
async fn test_force_replaces_stale_files() {
    let temp = TempDir::new().unwrap();
    let binary = fake_keygen();
    let location = temp.path().join("id_rsa");
    std::fs::write(&location, "stale").unwrap();
    std::fs::write(pub_path(&location), "stale").unwrap();

    let keys = generate(KeygenOptions {
        force: Some(true),
        ..no_force(&binary, &location)
    })
    .await
    .unwrap()
    .unwrap();

    assert_ne!(keys.private_key, "stale");
    assert!(keys.public_key.starts_with("ssh-rsa"));
}

#[tokio::test]
async fn test_absent_files_pass_without_force() {
    let temp = TempDir::new().unwrap();
    let binary = fake_keygen();
    let location = temp.path().join("fresh_id_rsa");

    let result = generate(no_force(&binary, &location)).await.unwrap();

    assert!(result.is_some());
    assert!(location.exists());
}
