//! Command-line argument harvesting.
//!
//! [`ArgvParser`] turns raw tokens into a flat flag mapping suitable for
//! unprefixed ingestion. It is a deliberately small flag parser: `--key=v`,
//! `--key v`, bare `--flag` (true), bundled short flags, and positionals
//! collected under `_`. Numeric and boolean literals are coerced so that
//! `--port 8080` compares equal to a port from a structured file.

use crate::value::{Mapping, Value};
use std::collections::HashMap;

/// Configurable parser for command-line flags.
///
/// Callers get a chance to configure aliases and default values through the
/// closure passed to the store's argument loaders before parsing runs.
#[derive(Debug, Clone, Default)]
pub struct ArgvParser {
    aliases: HashMap<String, String>,
    defaults: Mapping,
}

impl ArgvParser {
    pub fn new() -> Self {
        <ArgvParser as Default>::default()
    }

    /// Register `from` as an alias: occurrences are recorded under `to`.
    pub fn alias(&mut self, from: &str, to: &str) -> &mut Self {
        self.aliases.insert(from.to_string(), to.to_string());
        self
    }

    /// Pre-populate a flag with a default value; an occurrence on the
    /// command line replaces it.
    pub fn default(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
        self.defaults.insert(key.to_string(), value.into());
        self
    }

    /// Parse tokens (program name already stripped) into a flag mapping.
    /// Positional arguments land in a sequence under `_`, which is always
    /// present.
    pub fn parse<I, S>(&self, args: I) -> Mapping
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = args.into_iter().map(Into::into).collect();
        let mut flags = self.defaults.clone();
        let mut positionals: Vec<Value> = Vec::new();

        let mut i = 0;
        let mut only_positionals = false;
        while i < tokens.len() {
            let token = &tokens[i];
            if only_positionals {
                positionals.push(coerce(token));
            } else if token == "--" {
                only_positionals = true;
            } else if let Some(body) = token.strip_prefix("--") {
                i += self.parse_flag(body, tokens.get(i + 1), &mut flags);
            } else if is_short_flag(token) {
                let body = &token[1..];
                if body.chars().count() == 1 {
                    i += self.parse_flag(body, tokens.get(i + 1), &mut flags);
                } else {
                    // Bundled short flags are all boolean.
                    for flag in body.chars() {
                        self.insert(&mut flags, &flag.to_string(), Value::Bool(true));
                    }
                }
            } else {
                positionals.push(coerce(token));
            }
            i += 1;
        }

        flags.insert("_".to_string(), Value::Sequence(positionals));
        flags
    }

    /// Parse one named flag. Returns how many extra tokens were consumed.
    fn parse_flag(&self, body: &str, next: Option<&String>, flags: &mut Mapping) -> usize {
        if let Some((name, raw)) = body.split_once('=') {
            self.insert(flags, name, coerce(raw));
            0
        } else {
            match next {
                Some(value) if !is_flag_like(value) => {
                    self.insert(flags, body, coerce(value));
                    1
                }
                _ => {
                    self.insert(flags, body, Value::Bool(true));
                    0
                }
            }
        }
    }

    fn insert(&self, flags: &mut Mapping, name: &str, value: Value) {
        let canonical = self.aliases.get(name).map(String::as_str).unwrap_or(name);
        flags.insert(canonical.to_string(), value);
    }
}

/// A leading dash marks a flag unless the token is a negative number.
fn is_flag_like(token: &str) -> bool {
    token.starts_with('-') && token.len() > 1 && token.parse::<f64>().is_err()
}

fn is_short_flag(token: &str) -> bool {
    is_flag_like(token) && !token.starts_with("--")
}

/// Coerce a raw token the way the flag grammar reads it: boolean and
/// numeric literals first, everything else stays a string.
fn coerce(raw: &str) -> Value {
    match raw {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if let Ok(n) = raw.parse::<i64>() {
        return Value::Integer(n);
    }
    if let Ok(n) = raw.parse::<f64>() {
        return Value::Float(n);
    }
    Value::String(raw.to_string())
}
