//! Lookup engine: reconstructs nested views from the flat key space.

use super::ConfigStore;
use crate::key::Key;
use crate::value::{Mapping, Value};
use tracing::debug;

impl ConfigStore {
    /// Look up `select`, which may name a leaf or just a prefix.
    ///
    /// An exact key match returns the stored value directly. Otherwise every
    /// entry below the selector is re-nested on its remaining segments into
    /// a mapping built fresh for this call. The empty selector reconstructs
    /// the entire store. Absent keys yield `None`; lookup never fails and
    /// never mutates the store.
    pub fn get(&self, select: &str) -> Option<Value> {
        debug!(key = select, "retrieving config value");
        let select = Key::parse(select);

        // Exact-match fast path.
        if let Some(value) = self.entries.get(&select) {
            return Some(value.clone());
        }

        let mut reconstructed: Option<Mapping> = None;
        for (key, value) in &self.entries {
            // Structural prefix check: "data" never matches "database:...".
            if !key.starts_with(&select) {
                continue;
            }
            let remainder = key.suffix(&select);
            let root = reconstructed.get_or_insert_with(Mapping::new);
            insert_nested(root, remainder, value.clone());
        }
        reconstructed.map(Value::Mapping)
    }
}

/// Store `value` at the end of the segment chain, creating (or reusing,
/// within one reconstruction) an intermediate mapping per segment.
fn insert_nested(map: &mut Mapping, segments: &[String], value: Value) {
    match segments {
        [] => {}
        [leaf] => {
            map.insert(leaf.clone(), value);
        }
        [head, rest @ ..] => {
            let slot = map
                .entry(head.clone())
                .or_insert_with(|| Value::Mapping(Mapping::new()));
            // A leaf stored at an intermediate position gives way to the
            // mapping its descendants need.
            if slot.as_mapping().is_none() {
                *slot = Value::Mapping(Mapping::new());
            }
            if let Value::Mapping(child) = slot {
                insert_nested(child, rest, value);
            }
        }
    }
}
