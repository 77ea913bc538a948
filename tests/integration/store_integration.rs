//! Integration tests for the flat store: ingestion, lookup, lifecycle.

use pretty_assertions::assert_eq;
use strata::{ConfigError, ConfigStore, Mapping, Value};

fn mapping(entries: &[(&str, Value)]) -> Value {
    Value::Mapping(
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect(),
    )
}

/// The synopsis scenario: an unnamespaced nested mapping is addressable
/// both by leaf key and by prefix, with no false prefix matches.
#[test]
fn test_nested_ingestion_and_lookup() {
    let mut store = ConfigStore::new();
    store.load_defaults(
        mapping(&[(
            "database",
            mapping(&[("username", "tim".into()), ("password", "x".into())]),
        )]),
        None,
    );

    assert_eq!(store.get("database:username"), Some("tim".into()));
    assert_eq!(
        store.get("database"),
        Some(mapping(&[
            ("username", "tim".into()),
            ("password", "x".into())
        ]))
    );
    // "data" is a string prefix of "database" but not a key prefix.
    assert_eq!(store.get("data"), None);
}

#[test]
fn test_every_leaf_key_resolves_after_flattening() {
    let mut store = ConfigStore::new();
    store.load_defaults(
        mapping(&[
            ("a", mapping(&[("b", mapping(&[("c", Value::Integer(1))]))])),
            ("x", Value::Bool(true)),
        ]),
        None,
    );

    assert_eq!(store.get("a:b:c"), Some(Value::Integer(1)));
    assert_eq!(store.get("x"), Some(Value::Bool(true)));
}

#[test]
fn test_whole_store_reconstruction() {
    let mut store = ConfigStore::new();
    store.load_defaults(
        mapping(&[("database", mapping(&[("username", "tim".into())]))]),
        None,
    );
    store.load_defaults("on", Some("flags:color"));

    assert_eq!(
        store.get(""),
        Some(mapping(&[
            ("database", mapping(&[("username", "tim".into())])),
            ("flags", mapping(&[("color", "on".into())])),
        ]))
    );
}

#[test]
fn test_later_ingestion_overrides_at_leaf_granularity() {
    let mut store = ConfigStore::new();
    store.load_defaults(
        mapping(&[(
            "database",
            mapping(&[("username", "tim".into()), ("password", "weak".into())]),
        )]),
        None,
    );
    store.load_defaults(
        mapping(&[("database", mapping(&[("password", "strong".into())]))]),
        None,
    );

    // Only the conflicting leaf changed.
    assert_eq!(store.get("database:username"), Some("tim".into()));
    assert_eq!(store.get("database:password"), Some("strong".into()));
}

#[test]
fn test_reingesting_identical_value_is_idempotent() {
    let value = mapping(&[
        ("name", "tim".into()),
        ("hosts", Value::Sequence(vec!["a".into(), "b".into()])),
    ]);

    let mut store = ConfigStore::new();
    store.load_defaults(value.clone(), Some("app"));
    let first = store.get("");

    store.load_defaults(value, Some("app"));
    assert_eq!(store.get(""), first);
    assert_eq!(store.len(), 2);
}

#[test]
fn test_clear_then_get_returns_none_for_every_key() {
    let mut store = ConfigStore::new();
    store.load_defaults(
        mapping(&[
            ("database", mapping(&[("username", "tim".into())])),
            ("port", Value::Integer(8080)),
        ]),
        None,
    );
    let keys: Vec<String> = store.keys().map(|k| k.to_string()).collect();
    assert!(!keys.is_empty());

    store.clear();
    for key in keys {
        assert_eq!(store.get(&key), None);
    }
    assert_eq!(store.get(""), None);
}

#[test]
fn test_mutation_entry_point_always_fails() {
    let mut store = ConfigStore::new();
    for (key, value) in [
        ("database:username", Value::String("mallory".into())),
        ("", Value::Null),
        ("x", Value::Integer(1)),
    ] {
        let err = store.set(key, value).unwrap_err();
        assert!(matches!(err, ConfigError::ReadOnly));
        assert_eq!(err.code(), 500);
        assert_eq!(err.name(), "CONFIG:READ_ONLY");
    }
}

#[test]
fn test_defaults_callback_populates_mapping() {
    let mut store = ConfigStore::new();
    store.load_defaults_with(
        |defaults: &mut Mapping| {
            defaults.insert("host".into(), "localhost".into());
            defaults.insert("port".into(), Value::Integer(5432));
        },
        Some("database"),
    );

    assert_eq!(store.get("database:host"), Some("localhost".into()));
    assert_eq!(store.get("database:port"), Some(Value::Integer(5432)));
}

#[test]
fn test_args_loader_with_parser_configuration() {
    let mut store = ConfigStore::new();
    store.load_args_from(
        |parser| {
            parser.alias("e", "env").default("retries", 3i64);
        },
        ["-e", "production", "--database:password", "cli-wins"],
        None,
    );

    assert_eq!(store.get("env"), Some("production".into()));
    assert_eq!(store.get("retries"), Some(Value::Integer(3)));
    // Colon-delimited flag names address nested leaves directly.
    assert_eq!(store.get("database:password"), Some("cli-wins".into()));
}

#[test]
fn test_env_loader_with_namespace() {
    let mut store = ConfigStore::new();
    let env = strata::Env::from_pairs([("HOME", "/home/tim"), ("SHELL", "/bin/sh")]);
    store.load_env_from(&env, Some("process:env"));

    assert_eq!(store.get("process:env:HOME"), Some("/home/tim".into()));
    assert_eq!(
        store.get("process:env"),
        Some(mapping(&[
            ("HOME", "/home/tim".into()),
            ("SHELL", "/bin/sh".into())
        ]))
    );
}
