//! Integration tests for Settings config loading with layered precedence.
//!
//! Layers (lowest to highest): defaults, global file, local file, DOCNAV_* env.
//! Tests touching the environment run serially.

use std::fs;
use std::path::PathBuf;

use serial_test::serial;
use tempfile::TempDir;

use docnav::application::ApplicationError;
use docnav::config::{local_config_path, Settings, DEFAULT_BASE_URL, DEFAULT_TOPIC};

fn write_config(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write config");
    path
}

#[test]
#[serial]
fn given_no_config_files_when_loading_then_uses_defaults() {
    let settings = Settings::load_from(None, None).expect("load defaults");
    assert_eq!(settings.base_url, DEFAULT_BASE_URL);
    assert_eq!(settings.default_topic, DEFAULT_TOPIC);
}

#[test]
#[serial]
fn given_global_config_when_loading_then_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let global = write_config(&dir, "docnav.toml", "base_url = \"https://docs.example.org/\"\n");

    let settings = Settings::load_from(Some(&global), None).unwrap();

    assert_eq!(settings.base_url, "https://docs.example.org/");
    assert_eq!(settings.default_topic, DEFAULT_TOPIC);
}

#[test]
#[serial]
fn given_local_config_when_loading_then_wins_over_global() {
    let dir = TempDir::new().unwrap();
    let global = write_config(
        &dir,
        "docnav.toml",
        "base_url = \"https://global.example.org/\"\ndefault_topic = \"overview.md\"\n",
    );
    let local = write_config(&dir, ".docnav.toml", "base_url = \"https://local.example.org/\"\n");

    let settings = Settings::load_from(Some(&global), Some(&local)).unwrap();

    assert_eq!(settings.base_url, "https://local.example.org/");
    assert_eq!(settings.default_topic, "overview.md");
}

#[test]
#[serial]
fn given_env_var_when_loading_then_wins_over_files() {
    let dir = TempDir::new().unwrap();
    let local = write_config(&dir, ".docnav.toml", "base_url = \"https://local.example.org/\"\n");

    std::env::set_var("DOCNAV_BASE_URL", "https://env.example.org/");
    let result = Settings::load_from(None, Some(&local));
    std::env::remove_var("DOCNAV_BASE_URL");

    assert_eq!(result.unwrap().base_url, "https://env.example.org/");
}

#[test]
#[serial]
fn given_default_topic_env_var_when_loading_project_then_overrides_dotfile() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, ".docnav.toml", "default_topic = \"start-here.md\"\n");

    std::env::set_var("DOCNAV_DEFAULT_TOPIC", "welcome.md");
    let result = Settings::load(Some(dir.path()));
    std::env::remove_var("DOCNAV_DEFAULT_TOPIC");

    let settings = result.unwrap();
    assert_eq!(settings.default_topic, "welcome.md");
    assert_eq!(settings.base_url, DEFAULT_BASE_URL);
}

#[test]
#[serial]
fn given_base_url_without_trailing_slash_when_overriding_then_kept_verbatim() {
    let settings = Settings::load_from(None, None)
        .unwrap()
        .with_base_url(Some("https://x.org/kb"))
        .unwrap();

    assert_eq!(settings.base_url, "https://x.org/kb");
}

#[test]
#[serial]
fn given_project_dir_when_loading_then_reads_local_dotfile() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, ".docnav.toml", "default_topic = \"start-here.md\"\n");
    assert_eq!(local_config_path(dir.path()), dir.path().join(".docnav.toml"));

    let settings = Settings::load(Some(dir.path())).unwrap();

    assert_eq!(settings.default_topic, "start-here.md");
}

#[test]
#[serial]
fn given_invalid_toml_when_loading_then_config_error() {
    let dir = TempDir::new().unwrap();
    let local = write_config(&dir, ".docnav.toml", "base_url = [not toml");

    let err = Settings::load_from(None, Some(&local)).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
}

#[test]
#[serial]
fn given_empty_base_url_when_loading_then_config_error() {
    let dir = TempDir::new().unwrap();
    let local = write_config(&dir, ".docnav.toml", "base_url = \"\"\n");

    assert!(Settings::load_from(None, Some(&local)).is_err());
}
