//! Convention loading: base files, environment overrides, env and argv.

use pretty_assertions::assert_eq;
use strata::{ConfigError, ConfigStore, Convention, Env, Value};
use tempfile::TempDir;

/// A convention directory with a base file and a production override,
/// mirroring the synopsis scenario.
fn convention_dir() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join(".strata.yml"),
        "database:\n  username: tim\n  password: weak\n",
    )
    .unwrap();
    std::fs::write(
        temp_dir.path().join(".strata.production.yml"),
        "database:\n  password: strong\n  connection: on-air\n",
    )
    .unwrap();
    temp_dir
}

fn hermetic(env: &[(&str, &str)], args: &[&str]) -> Convention {
    // Opt-in log output for debugging: RUST_LOG=debug cargo test
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
    Convention::new(
        Env::from_pairs(env.iter().copied()),
        args.iter().map(|s| s.to_string()).collect(),
    )
}

#[test]
fn test_convention_without_environment() {
    let dir = convention_dir();
    let mut store = ConfigStore::new();
    hermetic(&[], &[]).load(&mut store, dir.path()).unwrap();

    assert_eq!(store.get("database:username"), Some("tim".into()));
    assert_eq!(store.get("database:password"), Some("weak".into()));
    // The production override was never loaded.
    assert_eq!(store.get("database:connection"), None);
}

#[test]
fn test_convention_with_production_environment() {
    let dir = convention_dir();
    let mut store = ConfigStore::new();
    hermetic(&[("ENV", "production")], &[])
        .load(&mut store, dir.path())
        .unwrap();

    assert_eq!(store.get("database:username"), Some("tim".into()));
    assert_eq!(store.get("database:password"), Some("strong".into()));
    assert_eq!(store.get("database:connection"), Some("on-air".into()));
    // The environment variables themselves were ingested unprefixed.
    assert_eq!(store.get("ENV"), Some("production".into()));
}

#[test]
fn test_command_line_environment_overrides_process() {
    let dir = convention_dir();
    let mut store = ConfigStore::new();
    hermetic(&[("ENV", "development")], &["--env", "production"])
        .load(&mut store, dir.path())
        .unwrap();

    assert_eq!(store.get("database:connection"), Some("on-air".into()));
}

#[test]
fn test_arguments_override_file_leaves() {
    let dir = convention_dir();
    let mut store = ConfigStore::new();
    hermetic(&[], &["--database:password", "cli-wins"])
        .load(&mut store, dir.path())
        .unwrap();

    assert_eq!(store.get("database:password"), Some("cli-wins".into()));
    assert_eq!(store.get("database:username"), Some("tim".into()));
}

#[test]
fn test_environment_variables_override_file_leaves() {
    let dir = convention_dir();
    let mut store = ConfigStore::new();
    hermetic(&[("database:password", "env-wins")], &[])
        .load(&mut store, dir.path())
        .unwrap();

    assert_eq!(store.get("database:password"), Some("env-wins".into()));
}

#[test]
fn test_json_base_loaded_before_yaml() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join(".strata.json"), r#"{"a": 1, "b": 1}"#).unwrap();
    std::fs::write(temp_dir.path().join(".strata.yml"), "b: 2\n").unwrap();

    let mut store = ConfigStore::new();
    hermetic(&[], &[]).load(&mut store, temp_dir.path()).unwrap();

    assert_eq!(store.get("a"), Some(Value::Integer(1)));
    assert_eq!(store.get("b"), Some(Value::Integer(2)));
}

#[test]
fn test_missing_convention_files_tolerated() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = ConfigStore::new();
    hermetic(&[("ENV", "production")], &[])
        .load(&mut store, temp_dir.path())
        .unwrap();

    // Nothing but the mocked environment landed in the store.
    assert_eq!(store.get("ENV"), Some("production".into()));
}

#[test]
fn test_empty_base_directory_is_an_error() {
    let mut store = ConfigStore::new();
    let err = hermetic(&[], &[]).load(&mut store, "").unwrap_err();
    assert!(matches!(err, ConfigError::MissingDirectory));
    assert_eq!(err.name(), "CONFIG:MISSING_DIRNAME");
}

#[test]
fn test_broken_convention_file_fails_hard() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join(".strata.json"), "{broken").unwrap();

    let mut store = ConfigStore::new();
    let err = hermetic(&[], &[])
        .load(&mut store, temp_dir.path())
        .unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
}
