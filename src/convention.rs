//! Convention-driven loading.
//!
//! The convention sequences ingestion in a fixed priority order: base files,
//! an environment-named override file, the process environment, then
//! command-line arguments. Later ingestions override earlier ones at
//! leaf-key granularity.

use crate::error::ConfigError;
use crate::sources::argv::ArgvParser;
use crate::sources::env::Env;
use crate::store::ConfigStore;
use crate::value::Value;
use std::path::Path;
use tracing::debug;

/// File stem the convention looks for in the base directory.
pub const DEFAULT_FILE_STEM: &str = ".strata";

const EXT_JSON: &str = ".json";
const EXT_YAML: &str = ".yml";

/// The variables consulted to resolve the deployment environment name,
/// in priority order. Command-line flags of the same names win over
/// process variables.
const ENV_NAME_VARS: [&str; 2] = ["ENV", "STRATA_ENV"];
const ENV_NAME_FLAGS: [&str; 3] = ["env", "ENV", "STRATA_ENV"];

/// Context for one convention run: where environment variables and
/// command-line tokens come from. `Default` uses the real process state;
/// tests inject both.
#[derive(Debug, Clone)]
pub struct Convention {
    env: Env,
    args: Vec<String>,
}

impl Default for Convention {
    fn default() -> Self {
        Convention {
            env: Env::real(),
            args: std::env::args().skip(1).collect(),
        }
    }
}

impl Convention {
    pub fn new(env: Env, args: Vec<String>) -> Self {
        Convention { env, args }
    }

    /// Run the convention against `store`, rooted at `dir`.
    ///
    /// Missing convention files are tolerated; an empty base directory is
    /// not — there is no implicit caller-relative default.
    pub fn load(&self, store: &mut ConfigStore, dir: impl AsRef<Path>) -> Result<(), ConfigError> {
        let dir = dir.as_ref();
        if dir.as_os_str().is_empty() {
            return Err(ConfigError::MissingDirectory);
        }
        debug!(dir = %dir.display(), "loading the strata convention of configuration");

        store.load_file_if_present(dir.join(format!("{DEFAULT_FILE_STEM}{EXT_JSON}")), None)?;
        store.load_file_if_present(dir.join(format!("{DEFAULT_FILE_STEM}{EXT_YAML}")), None)?;

        if let Some(name) = self.environment_name() {
            debug!(environment = %name, "loading environment-specific convention files");
            store.load_file_if_present(
                dir.join(format!("{DEFAULT_FILE_STEM}.{name}{EXT_JSON}")),
                None,
            )?;
            store.load_file_if_present(
                dir.join(format!("{DEFAULT_FILE_STEM}.{name}{EXT_YAML}")),
                None,
            )?;
        }

        store.load_env_from(&self.env, None);
        let flags = ArgvParser::new().parse(self.args.iter().cloned());
        store.ingest(None, Value::Mapping(flags));

        debug!(entries = store.len(), "strata convention loaded");
        Ok(())
    }

    /// Resolve the deployment environment name. Command-line flags strictly
    /// override process variables; within each group the first non-empty
    /// candidate wins.
    fn environment_name(&self) -> Option<String> {
        let flags = ArgvParser::new().parse(self.args.iter().cloned());
        for flag in ENV_NAME_FLAGS {
            if let Some(Value::String(name)) = flags.get(flag) {
                if !name.is_empty() {
                    return Some(name.clone());
                }
            }
        }
        for var in ENV_NAME_VARS {
            if let Some(name) = self.env.var(var) {
                if !name.is_empty() {
                    return Some(name);
                }
            }
        }
        None
    }
}

impl ConfigStore {
    /// Load the strata convention from an explicit base directory, using the
    /// real process environment and command line.
    pub fn load_convention(&mut self, dir: impl AsRef<Path>) -> Result<(), ConfigError> {
        Convention::default().load(self, dir)
    }
}
