//! Ingestion engine: folds a nested value tree into the flat store.

use super::ConfigStore;
use crate::key::Key;
use crate::value::Value;
use tracing::debug;

impl ConfigStore {
    /// Fold `value` into the store under an optional namespace.
    ///
    /// Dispatch order matters: the mapping arm is a broad catch-all that
    /// would otherwise swallow the more specific terminal variants, notably
    /// sequences, timestamps, and empty containers.
    pub fn ingest(&mut self, namespace: Option<Key>, value: Value) {
        match (namespace, value) {
            // Verbatim terminals overwrite whatever was at the namespace.
            (Some(key), value) if value.is_verbatim_terminal() => {
                self.entries.insert(key, value);
            }
            // Non-empty mappings decompose one entry at a time, in
            // insertion order, extending the namespace per segment.
            (namespace, Value::Mapping(entries)) => {
                for (segment, child) in entries {
                    let child_key = match &namespace {
                        Some(key) => key.child(&segment),
                        None => Key::parse(&segment),
                    };
                    self.ingest(Some(child_key), child);
                }
            }
            // Remaining terminals (scalars) merge with any prior entry;
            // new leaves win.
            (Some(key), value) => {
                if let Some(slot) = self.entries.get_mut(&key) {
                    let old = std::mem::replace(slot, Value::Null);
                    *slot = Value::deep_merge(old, value);
                } else {
                    self.entries.insert(key, value);
                }
            }
            // A non-mapping value with no namespace has no addressable key;
            // merging it into the root is a no-op.
            (None, value) => {
                debug!(?value, "dropping non-mapping value ingested without a namespace");
            }
        }
    }
}
