//! Configuration sources: file decoders and flat key/value harvesters.
//!
//! Sources produce [`Value`](crate::value::Value) trees; the store's
//! ingestion engine folds them into the flat key space. Nothing here touches
//! the store directly.

pub mod argv;
pub mod env;
pub mod file;

pub use argv::ArgvParser;
pub use env::Env;
