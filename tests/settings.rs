// tests/settings.rs
use std::fs;

use tavern_ledger::{CredentialStore, LedgerError, RepositoryConfig, Settings};
use tempfile::tempdir;

#[test]
fn test_settings_round_trip_through_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.json");
    let settings = Settings {
        github_token: Some("ghp_example".to_string()),
        repository: RepositoryConfig {
            branch: Some("main".to_string()),
            ..RepositoryConfig::default()
        },
        debug_mode: true,
    };

    settings.save_to_file(&path).unwrap();
    let loaded = Settings::load_settings_from_file(&path).unwrap();
    assert_eq!(loaded, settings);
}

#[test]
fn test_missing_fields_take_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{ "repository": { "owner": "guild" } }"#).unwrap();

    let settings = Settings::load_settings_from_file(&path).unwrap();
    assert_eq!(settings.github_token, None);
    assert_eq!(settings.repository.owner, "guild");
    assert_eq!(settings.repository.repo, "DNDSYS");
    assert_eq!(settings.repository.path, "players.json");
    assert_eq!(
        settings.repository.commit_message,
        "Update player data via DnD Dashboard"
    );
}

#[test]
fn test_credential_store_without_file_has_no_token() {
    let dir = tempdir().unwrap();
    let store = CredentialStore::open(dir.path().join("settings.json"));
    assert_eq!(store.token(), None);
    assert_eq!(store.settings(), &Settings::default());
}

#[test]
fn test_blank_token_counts_as_absent() {
    let dir = tempdir().unwrap();
    let settings = Settings {
        github_token: Some("   ".to_string()),
        ..Settings::default()
    };
    let store = CredentialStore::with_settings(settings, dir.path().join("settings.json"));
    assert_eq!(store.token(), None);
}

#[test]
fn test_supplied_token_is_persisted() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");

    let mut store = CredentialStore::open(&path);
    let token = store.supply("  ghp_secret \n").unwrap();
    assert_eq!(token, "ghp_secret");

    let reopened = CredentialStore::open(&path);
    assert_eq!(reopened.token().as_deref(), Some("ghp_secret"));
}

#[test]
fn test_reset_forgets_the_token() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");

    let mut store = CredentialStore::open(&path);
    store.supply("ghp_secret").unwrap();
    store.reset().unwrap();

    assert_eq!(store.token(), None);
    assert_eq!(CredentialStore::open(&path).token(), None);
}

#[test]
fn test_load_reports_a_missing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    assert!(matches!(CredentialStore::load(&path), Err(LedgerError::Io(_))));

    Settings::default().save_to_file(&path).unwrap();
    let store = CredentialStore::load(&path).unwrap();
    assert_eq!(store.settings(), &Settings::default());
    assert_eq!(store.path(), &path);
}
