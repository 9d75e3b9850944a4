use std::ffi::OsString;
use std::fs;

use roomar_config::{AppConfig, ConfigError, ConfigSource};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn test_explicit_path_wins() {
    let dir = TempDir::new().unwrap();
    let explicit = write(&dir, "explicit.toml", "[viewport]\nwidth = 320\nheight = 240\n");
    let env = write(&dir, "env.toml", "[viewport]\nwidth = 640\n");

    let (config, source) = AppConfig::discover_from(
        Some(&explicit),
        Some(OsString::from(env.as_os_str())),
        None,
    )
    .unwrap();
    assert_eq!(config.viewport.width, 320);
    assert_eq!(source, ConfigSource::Explicit(explicit));
}

#[test]
fn test_env_then_user_dir_then_defaults() {
    let dir = TempDir::new().unwrap();
    let env = write(&dir, "env.toml", "[viewport]\nwidth = 640\n");
    let user = write(&dir, "config.toml", "[viewport]\nwidth = 800\n");

    let (config, source) =
        AppConfig::discover_from(None, Some(env.clone().into_os_string()), Some(user.clone())).unwrap();
    assert_eq!(config.viewport.width, 640);
    assert_eq!(source, ConfigSource::Environment(env));

    let (config, source) = AppConfig::discover_from(None, Some(OsString::new()), Some(user.clone())).unwrap();
    assert_eq!(config.viewport.width, 800);
    assert_eq!(source, ConfigSource::UserDir(user));

    let missing = dir.path().join("nope.toml");
    let (config, source) = AppConfig::discover_from(None, None, Some(missing)).unwrap();
    assert_eq!(config, AppConfig::default());
    assert_eq!(source, ConfigSource::Defaults);
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = AppConfig::discover_from(Some(&dir.path().join("absent.toml")), None, None).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_parse_error_names_the_file() {
    let dir = TempDir::new().unwrap();
    let bad = write(&dir, "bad.toml", "[viewport\nwidth = ");
    let err = AppConfig::load(&bad).unwrap_err();
    match err {
        ConfigError::Parse { path, .. } => assert_eq!(path, bad),
        other => panic!("unexpected error: {other}"),
    }
}
