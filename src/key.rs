//! Colon-delimited configuration keys.
//!
//! The wire format is segments joined by `:` with no escaping (an explicit
//! limitation: segments themselves cannot contain `:`). Internally a key is
//! a parsed sequence of segments, so the prefix/boundary rule used by lookup
//! ("the character after a matched prefix must be `:`") becomes a structural
//! segment-prefix check instead of string slicing.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// A parsed configuration key.
///
/// The root key has zero segments and matches every entry during lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key {
    segments: Vec<String>,
}

impl Key {
    /// The root key (zero segments, wire form `""`).
    pub fn root() -> Self {
        Key::default()
    }

    /// Parse a `:`-joined key. The empty string parses to the root key.
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return Key::root();
        }
        Key {
            segments: raw.split(':').map(str::to_string).collect(),
        }
    }

    /// Append a child path, producing the key for a child entry.
    ///
    /// The child is parsed like any key, so a harvested flat name such as
    /// `database:password` lands on the same segments as its nested
    /// equivalent. A key's segments therefore never contain `:`.
    pub fn child(&self, child: &str) -> Key {
        let mut segments = self.segments.clone();
        segments.extend(child.split(':').map(str::to_string));
        Key { segments }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Structural prefix test. `database:username` starts with `database`
    /// but not with `data`; every key starts with the root key.
    pub fn starts_with(&self, prefix: &Key) -> bool {
        self.segments.len() >= prefix.segments.len()
            && self.segments[..prefix.segments.len()] == prefix.segments[..]
    }

    /// The segments remaining after a matched prefix.
    ///
    /// Callers must check [`starts_with`](Key::starts_with) first.
    pub fn suffix(&self, prefix: &Key) -> &[String] {
        &self.segments[prefix.segments.len()..]
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join(":"))
    }
}

impl From<&str> for Key {
    fn from(raw: &str) -> Self {
        Key::parse(raw)
    }
}

impl FromStr for Key {
    type Err = Infallible;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Ok(Key::parse(raw))
    }
}
