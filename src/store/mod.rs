//! Flat configuration store.
//!
//! The store is the single source of truth: a mapping from colon-delimited
//! keys to terminal values. It grows only through ingestion, is reset only by
//! [`ConfigStore::clear`], and is never mutated by lookup. It is an explicit
//! context object rather than process-global state, so tests and embedders
//! can hold several independent configurations.

mod ingest;
mod lookup;

use crate::error::ConfigError;
use crate::key::Key;
use crate::sources::argv::ArgvParser;
use crate::sources::env::Env;
use crate::sources::file;
use crate::value::{Mapping, Value};
use indexmap::IndexMap;
use std::path::Path;
use tracing::{debug, warn};

/// Read-only configuration store over a flat key space.
///
/// Favors lookup speed over memory: every leaf of every ingested value tree
/// is addressable in one map probe. Loading is synchronous and takes
/// `&mut self`; callers in multi-threaded hosts must finish loading before
/// sharing the store.
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    entries: IndexMap<Key, Value>,
}

impl ConfigStore {
    pub fn new() -> Self {
        ConfigStore::default()
    }

    /// Number of flat entries currently held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All flat keys, in ingestion order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.keys()
    }

    /// Drop every entry. There is no scoped or partial clear.
    pub fn clear(&mut self) {
        debug!("clearing all config keys");
        self.entries.clear();
    }

    /// Always fails: mutation flows exclusively through ingestion.
    pub fn set(&mut self, key: &str, _value: Value) -> Result<(), ConfigError> {
        warn!(key, "rejected write to the read-only configuration store");
        Err(ConfigError::ReadOnly)
    }

    /// Decode `path` by extension and ingest the result.
    pub fn load_file(
        &mut self,
        path: impl AsRef<Path>,
        namespace: Option<&str>,
    ) -> Result<(), ConfigError> {
        let decoded = file::decode(path.as_ref())?;
        self.ingest(parse_namespace(namespace), decoded);
        Ok(())
    }

    /// Like [`load_file`](ConfigStore::load_file), but a missing file is
    /// tolerated (logged, not failed). Every other failure still surfaces.
    pub fn load_file_if_present(
        &mut self,
        path: impl AsRef<Path>,
        namespace: Option<&str>,
    ) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            self.load_file(path, namespace)
        } else {
            debug!(
                path = %path.display(),
                "asked to load config file, but it does not exist; gracefully failing"
            );
            Ok(())
        }
    }

    /// Ingest the full process environment as a flat NAME -> string mapping.
    pub fn load_env(&mut self, namespace: Option<&str>) {
        self.load_env_from(&Env::real(), namespace);
    }

    /// Ingest environment variables read through an explicit [`Env`] handle.
    pub fn load_env_from(&mut self, env: &Env, namespace: Option<&str>) {
        let vars = env.harvest();
        debug!(count = vars.len(), "loading environment variables");
        self.ingest(parse_namespace(namespace), Value::Mapping(vars));
    }

    /// Parse the process command line and ingest the resulting flag mapping.
    ///
    /// `configure` runs against the parser before parsing, so callers can
    /// register aliases and default values.
    pub fn load_args<F>(&mut self, configure: F, namespace: Option<&str>)
    where
        F: FnOnce(&mut ArgvParser),
    {
        self.load_args_from(configure, std::env::args().skip(1), namespace);
    }

    /// Like [`load_args`](ConfigStore::load_args), over explicit tokens.
    pub fn load_args_from<F, I, S>(&mut self, configure: F, args: I, namespace: Option<&str>)
    where
        F: FnOnce(&mut ArgvParser),
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut parser = ArgvParser::new();
        configure(&mut parser);
        let flags = parser.parse(args);
        debug!(count = flags.len(), "loading command-line arguments");
        self.ingest(parse_namespace(namespace), Value::Mapping(flags));
    }

    /// Ingest an in-memory default value.
    pub fn load_defaults(&mut self, defaults: impl Into<Value>, namespace: Option<&str>) {
        debug!("loading defaults");
        self.ingest(parse_namespace(namespace), defaults.into());
    }

    /// Ingest defaults built by a callback over a mutable mapping.
    pub fn load_defaults_with<F>(&mut self, build: F, namespace: Option<&str>)
    where
        F: FnOnce(&mut Mapping),
    {
        let mut defaults = Mapping::new();
        build(&mut defaults);
        debug!(count = defaults.len(), "loading defaults via callback");
        self.ingest(parse_namespace(namespace), Value::Mapping(defaults));
    }
}

/// An empty namespace scopes nothing; treat it like no namespace at all.
fn parse_namespace(namespace: Option<&str>) -> Option<Key> {
    namespace.filter(|ns| !ns.is_empty()).map(Key::parse)
}
