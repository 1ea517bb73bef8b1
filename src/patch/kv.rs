use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A value to be written into TOML-like config content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KvValue {
    /// Written quoted: `key = "value"`.
    Str(String),
    /// Written unquoted: `key = value`. Used for numeric keys such as
    /// `l1_chain_id` and `l1_start_epoch`.
    Int(u64),
}

impl KvValue {
    /// Renders the value as it appears on the right-hand side of a line.
    fn render(&self) -> String {
        match self {
            KvValue::Str(s) => format!("\"{s}\""),
            KvValue::Int(n) => n.to_string(),
        }
    }
}

impl fmt::Display for KvValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KvValue::Str(s) => write!(f, "{s}"),
            KvValue::Int(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for KvValue {
    fn from(value: &str) -> Self {
        KvValue::Str(value.to_owned())
    }
}

impl From<String> for KvValue {
    fn from(value: String) -> Self {
        KvValue::Str(value)
    }
}

impl From<u64> for KvValue {
    fn from(value: u64) -> Self {
        KvValue::Int(value)
    }
}

impl Serialize for KvValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            KvValue::Str(s) => serializer.serialize_str(s),
            KvValue::Int(n) => serializer.serialize_u64(*n),
        }
    }
}

/// An ordered set of key/value updates.
///
/// Setting a key that is already pending replaces its value in place, so
/// each key is written to the output at most once, in first-insertion order.
#[derive(Debug, Clone, Default)]
pub struct KvUpdates {
    entries: Vec<(String, KvValue)>,
}

impl KvUpdates {
    /// Creates an empty update set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the value for `key`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<KvValue>) {
        let key = key.into();
        let value = value.into();

        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Merges another update set into this one, key by key.
    pub fn merge(&mut self, other: KvUpdates) {
        for (key, value) in other.entries {
            self.set(key, value);
        }
    }

    /// Returns true if no updates are pending.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of pending updates.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates over the pending `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &KvValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl Serialize for KvUpdates {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Applies key/value updates to TOML-like content.
///
/// For each key, the first line whose trimmed form starts with `"{key} "`
/// is replaced in place. Keys with no matching line are appended at the
/// end, separated from existing content by a blank line. The result always
/// ends with a trailing newline. Applying the same updates twice yields
/// the same content: a written line matches its own key on the next run.
pub fn apply_updates(content: &str, updates: &KvUpdates) -> String {
    let mut lines: Vec<String> = content.lines().map(str::to_owned).collect();
    let mut remaining: Vec<(&str, &KvValue)> = updates.iter().collect();

    for line in lines.iter_mut() {
        let stripped = line.trim();
        let matched = remaining.iter().position(|(key, _)| {
            stripped.starts_with(key) && stripped[key.len()..].starts_with(' ')
        });

        if let Some(idx) = matched {
            let (key, value) = remaining.remove(idx);
            *line = format!("{key} = {}", value.render());
        }
    }

    if !remaining.is_empty() {
        if lines.last().map_or(true, |last| !last.trim().is_empty()) {
            lines.push(String::new());
        }
        for (key, value) in remaining {
            lines.push(format!("{key} = {}", value.render()));
        }
    }

    let mut updated = lines.join("\n");
    if !updated.ends_with('\n') {
        updated.push('\n');
    }

    updated
}

#[cfg(test)]
mod tests {
    use super::*;

    fn updates(pairs: &[(&str, KvValue)]) -> KvUpdates {
        let mut set = KvUpdates::new();
        for (key, value) in pairs {
            set.set(*key, value.clone());
        }
        set
    }

    #[test]
    fn test_updates_existing_line_in_place() {
        let content = "chain_name = \"old\"\nport = 1234\n";
        let set = updates(&[("chain_name", KvValue::from("new"))]);

        let out = apply_updates(content, &set);
        assert_eq!(out, "chain_name = \"new\"\nport = 1234\n");
    }

    #[test]
    fn test_appends_missing_keys_after_blank_line() {
        let content = "port = 1234";
        let set = updates(&[
            ("l1_chain_id", KvValue::Int(3151908)),
            ("l1_admin_address", KvValue::from("abc123")),
        ]);

        let out = apply_updates(content, &set);
        assert_eq!(out, "port = 1234\n\nl1_chain_id = 3151908\nl1_admin_address = \"abc123\"\n");
    }

    #[test]
    fn test_idempotent_on_key_set() {
        let content = "port = 1234\n";
        let set = updates(&[
            ("l1_chain_id", KvValue::Int(7)),
            ("l1_admin_address", KvValue::from("abc123")),
        ]);

        let once = apply_updates(content, &set);
        let twice = apply_updates(&once, &set);

        assert_eq!(once, twice);
        assert_eq!(once.matches("l1_chain_id").count(), 1);
    }

    #[test]
    fn test_integer_values_are_unquoted() {
        let out = apply_updates("", &updates(&[("l1_start_epoch", KvValue::Int(42))]));
        assert!(out.contains("l1_start_epoch = 42"));
        assert!(!out.contains('"'));
    }

    #[test]
    fn test_respects_indented_lines() {
        let content = "  l1_chain_id 3\n";
        let out = apply_updates(content, &updates(&[("l1_chain_id", KvValue::Int(9))]));
        assert_eq!(out, "l1_chain_id = 9\n");
    }

    #[test]
    fn test_key_prefix_does_not_match() {
        // `l1_chain` must not swallow the `l1_chain_id` line.
        let content = "l1_chain_id = 3\n";
        let out = apply_updates(content, &updates(&[("l1_chain", KvValue::Int(9))]));
        assert_eq!(out, "l1_chain_id = 3\n\nl1_chain = 9\n");
    }

    #[test]
    fn test_set_replaces_pending_value() {
        let mut set = KvUpdates::new();
        set.set("l1_chain_id", 1u64);
        set.set("l1_chain_id", 2u64);

        assert_eq!(set.len(), 1);
        let out = apply_updates("", &set);
        assert_eq!(out.matches("l1_chain_id").count(), 1);
        assert!(out.contains("l1_chain_id = 2"));
    }

    #[test]
    fn test_always_ends_with_newline() {
        let out = apply_updates("a = 1", &KvUpdates::new());
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn test_serializes_as_json_map() {
        let mut set = KvUpdates::new();
        set.set("l1_admin_address", "abc123");
        set.set("l1_chain_id", 3151908u64);

        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json["l1_admin_address"], "abc123");
        assert_eq!(json["l1_chain_id"], 3151908);
    }
}
