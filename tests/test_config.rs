use jnicall::config::{Config, ConfigError, CONFIG_FILE};
use jnicall::interop::TransientPolicy;
use jnicall::logging::LogFormat;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE);
    fs::write(
        &path,
        "[logging]\nlevel = \"warn\"\nformat = \"pretty\"\n\n[arguments]\ntransient_strings = \"frame_teardown\"\n",
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.logging.format, LogFormat::Pretty);
    assert!(config.faults.describe);
    assert_eq!(config.env_options().transient_strings, TransientPolicy::FrameTeardown);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = Config::load(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_malformed_file_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE);
    fs::write(&path, "[logging\nlevel = ").unwrap();

    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_find_file_walks_up() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("app").join("libs").join("arm64");
    fs::create_dir_all(&nested).unwrap();
    fs::write(dir.path().join(CONFIG_FILE), "").unwrap();

    let found = Config::find_file(&nested).unwrap();
    assert_eq!(found, dir.path().join(CONFIG_FILE));

    // The nearest file wins
    fs::write(nested.join(CONFIG_FILE), "").unwrap();
    assert_eq!(Config::find_file(&nested).unwrap(), nested.join(CONFIG_FILE));
}

#[test]
fn test_save_then_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE);

    let mut config = Config::default();
    config.logging.level = "debug".to_string();
    config.logging.directory = Some("/var/log/bridge".to_string());
    config.faults.describe = false;
    config.save(&path).unwrap();

    assert_eq!(Config::load(&path).unwrap(), config);
}

#[test]
fn test_empty_file_is_default() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE);
    fs::write(&path, "").unwrap();

    assert_eq!(Config::load(&path).unwrap(), Config::default());
}
