//! Strata: Layered Read-Only Configuration
//!
//! A process-lifetime configuration aggregator. Fragments from structured
//! files, the process environment, command-line arguments, and in-memory
//! defaults are flattened into a single colon-delimited key space; lookups
//! return either an exact terminal value or a nested view reconstructed
//! from everything below a key prefix.

pub mod convention;
pub mod error;
pub mod key;
pub mod sources;
pub mod store;
pub mod value;

pub use convention::Convention;
pub use error::ConfigError;
pub use key::Key;
pub use sources::{ArgvParser, Env};
pub use store::ConfigStore;
pub use value::{Mapping, Value};
