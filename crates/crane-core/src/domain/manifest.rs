//! Manifest documents (`package.json`) and the two pure transformations the
//! renderer applies to them: structural deep merge and group sorting.
//!
//! A [`Manifest`] keeps its top-level keys in document order. Only the five
//! [`ManifestGroup`]s get a canonical internal order, and only once
//! [`sort_groups`] has run. Everything else is passed through untouched.

use std::fmt;

use serde_json::{Map, Value};

use crate::domain::error::DomainError;

// ── Groups ────────────────────────────────────────────────────────────────────

/// The top-level property groups whose keys are kept in sorted order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManifestGroup {
    Dependencies,
    DevDependencies,
    PeerDependencies,
    OptionalDependencies,
    Scripts,
}

impl ManifestGroup {
    pub const ALL: [Self; 5] = [
        Self::Dependencies,
        Self::DevDependencies,
        Self::PeerDependencies,
        Self::OptionalDependencies,
        Self::Scripts,
    ];

    /// Key of this group inside a manifest.
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Dependencies => "dependencies",
            Self::DevDependencies => "devDependencies",
            Self::PeerDependencies => "peerDependencies",
            Self::OptionalDependencies => "optionalDependencies",
            Self::Scripts => "scripts",
        }
    }
}

impl fmt::Display for ManifestGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ── Manifest ──────────────────────────────────────────────────────────────────

/// A manifest document: a JSON object with insertion-ordered keys.
///
/// Invariant: the top level is always an object. Construction from text
/// rejects anything else.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest(Map<String, Value>);

impl Manifest {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// The minimal `{name, version}` manifest written before any template.
    pub fn seed(name: &str, version: &str) -> Self {
        let mut map = Map::new();
        map.insert("name".into(), Value::String(name.into()));
        map.insert("version".into(), Value::String(version.into()));
        Self(map)
    }

    /// Parse manifest bytes. `origin` names the source in error messages.
    pub fn parse(bytes: &[u8], origin: impl fmt::Display) -> Result<Self, DomainError> {
        let value: Value =
            serde_json::from_slice(bytes).map_err(|e| DomainError::MalformedManifest {
                path: origin.to_string(),
                reason: e.to_string(),
            })?;

        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(DomainError::MalformedManifest {
                path: origin.to_string(),
                reason: format!("expected a JSON object, found {}", kind_of(&other)),
            }),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Entries of a group, if present and shaped as an object.
    pub fn group(&self, group: ManifestGroup) -> Option<&Map<String, Value>> {
        self.0.get(group.key()).and_then(Value::as_object)
    }

    pub fn has_group(&self, group: ManifestGroup) -> bool {
        self.0.contains_key(group.key())
    }

    /// Replace a group. An existing group keeps its position in the document.
    pub fn set_group(&mut self, group: ManifestGroup, entries: Map<String, Value>) {
        self.0.insert(group.key().into(), Value::Object(entries));
    }

    pub fn remove_group(&mut self, group: ManifestGroup) -> Option<Value> {
        // shift_remove keeps the remaining keys in document order
        self.0.shift_remove(group.key())
    }

    /// Top-level keys in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Serialize with 2-space indentation and a trailing newline.
    pub fn to_pretty_string(&self) -> String {
        // Serializing a Map<String, Value> cannot fail.
        let mut out = serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| "{}".into());
        out.push('\n');
        out
    }
}

impl From<Map<String, Value>> for Manifest {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ── Merge ─────────────────────────────────────────────────────────────────────

/// Deep-merge `incoming` into `existing`.
///
/// Keys present in both whose values are both objects are merged recursively.
/// In every other case the incoming value replaces the existing one, arrays
/// included. Keys only in `existing` keep their position. New keys are
/// appended in `incoming` order.
pub fn merge(existing: Manifest, incoming: Manifest) -> Manifest {
    let mut target = existing.0;
    merge_objects(&mut target, incoming.0);
    Manifest(target)
}

fn merge_objects(target: &mut Map<String, Value>, source: Map<String, Value>) {
    for (key, incoming) in source {
        if let Value::Object(nested) = incoming {
            if let Some(Value::Object(current)) = target.get_mut(&key) {
                merge_objects(current, nested);
                continue;
            }
            target.insert(key, Value::Object(nested));
        } else {
            target.insert(key, incoming);
        }
    }
}

// ── Sort ──────────────────────────────────────────────────────────────────────

/// Rewrite each recognized group with its keys in ascending code-point order.
///
/// Groups not present stay absent; groups that are not objects pass through
/// unchanged. Top-level key order is not touched.
pub fn sort_groups(manifest: Manifest) -> Manifest {
    let mut map = manifest.0;

    for group in ManifestGroup::ALL {
        if let Some(Value::Object(entries)) = map.get_mut(group.key()) {
            let mut sorted: Vec<(String, Value)> = std::mem::take(entries).into_iter().collect();
            sorted.sort_by(|(a, _), (b, _)| a.cmp(b));
            *entries = sorted.into_iter().collect();
        }
    }

    Manifest(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn manifest(value: Value) -> Manifest {
        match value {
            Value::Object(map) => Manifest(map),
            _ => panic!("test manifest must be an object"),
        }
    }

    fn group_keys(m: &Manifest, group: ManifestGroup) -> Vec<String> {
        m.group(group).unwrap().keys().cloned().collect()
    }

    // ── merge ─────────────────────────────────────────────────────────────

    #[test]
    fn incoming_scalar_wins() {
        let merged = merge(
            manifest(json!({"name": "a", "version": "0.0.0"})),
            manifest(json!({"version": "1.0.0"})),
        );
        assert_eq!(merged.get("version"), Some(&json!("1.0.0")));
        assert_eq!(merged.get("name"), Some(&json!("a")));
    }

    #[test]
    fn arrays_are_replaced_not_concatenated() {
        let merged = merge(
            manifest(json!({"files": ["dist"]})),
            manifest(json!({"files": ["lib", "types"]})),
        );
        assert_eq!(merged.get("files"), Some(&json!(["lib", "types"])));
    }

    #[test]
    fn nested_objects_merge_recursively() {
        let merged = merge(
            manifest(json!({"engines": {"node": ">=16"}, "scripts": {"build": "tsc"}})),
            manifest(json!({"scripts": {"test": "vitest"}})),
        );
        assert_eq!(merged.get("engines"), Some(&json!({"node": ">=16"})));
        assert_eq!(
            merged.get("scripts"),
            Some(&json!({"build": "tsc", "test": "vitest"}))
        );
    }

    #[test]
    fn object_replaces_scalar_and_scalar_replaces_object() {
        let merged = merge(
            manifest(json!({"a": 1, "b": {"x": 1}})),
            manifest(json!({"a": {"y": 2}, "b": "flat"})),
        );
        assert_eq!(merged.get("a"), Some(&json!({"y": 2})));
        assert_eq!(merged.get("b"), Some(&json!("flat")));
    }

    #[test]
    fn merge_is_idempotent() {
        let a = manifest(json!({
            "name": "pkg",
            "dependencies": {"b": "2", "a": "1"},
            "files": ["x"],
            "nested": {"deep": {"k": true}}
        }));
        let b = manifest(json!({
            "dependencies": {"c": "3"},
            "files": ["y"],
            "nested": {"deep": {"j": null}},
            "private": true
        }));

        let once = merge(a, b.clone());
        let twice = merge(once.clone(), b);
        assert_eq!(once, twice);
    }

    #[test]
    fn existing_keys_keep_their_position() {
        let merged = merge(
            manifest(json!({"name": "a", "version": "0.0.0"})),
            manifest(json!({"type": "module", "name": "b"})),
        );
        let keys: Vec<&str> = merged.keys().collect();
        assert_eq!(keys, vec!["name", "version", "type"]);
    }

    // ── sort ──────────────────────────────────────────────────────────────

    #[test]
    fn sorts_dependencies_ascending() {
        let sorted = sort_groups(manifest(json!({"dependencies": {"b": "2", "a": "1"}})));
        assert_eq!(
            group_keys(&sorted, ManifestGroup::Dependencies),
            vec!["a", "b"]
        );
        assert_eq!(
            sorted.to_pretty_string(),
            "{\n  \"dependencies\": {\n    \"a\": \"1\",\n    \"b\": \"2\"\n  }\n}\n"
        );
    }

    #[test]
    fn scoped_names_sort_before_plain_names() {
        let sorted = sort_groups(manifest(json!({
            "devDependencies": {"x": "1", "@scope/x": "1", "Upper": "1"}
        })));
        assert_eq!(
            group_keys(&sorted, ManifestGroup::DevDependencies),
            vec!["@scope/x", "Upper", "x"]
        );
    }

    #[test]
    fn sorts_every_recognized_group() {
        let sorted = sort_groups(manifest(json!({
            "peerDependencies": {"z": "1", "y": "1"},
            "optionalDependencies": {"q": "1", "p": "1"},
            "scripts": {"test": "vitest", "build": "tsup"}
        })));
        assert_eq!(
            group_keys(&sorted, ManifestGroup::PeerDependencies),
            vec!["y", "z"]
        );
        assert_eq!(
            group_keys(&sorted, ManifestGroup::OptionalDependencies),
            vec!["p", "q"]
        );
        assert_eq!(
            group_keys(&sorted, ManifestGroup::Scripts),
            vec!["build", "test"]
        );
    }

    #[test]
    fn unrecognized_groups_pass_through_unordered() {
        let sorted = sort_groups(manifest(json!({"custom": {"b": 1, "a": 2}})));
        let custom = sorted.get("custom").unwrap().as_object().unwrap();
        let keys: Vec<&String> = custom.keys().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn non_object_group_passes_through() {
        let sorted = sort_groups(manifest(json!({"scripts": null})));
        assert_eq!(sorted.get("scripts"), Some(&Value::Null));
    }

    #[test]
    fn top_level_order_is_preserved() {
        let sorted = sort_groups(manifest(json!({
            "name": "a",
            "scripts": {"b": "1", "a": "2"},
            "version": "0.0.0",
            "dependencies": {"d": "1"}
        })));
        let keys: Vec<&str> = sorted.keys().collect();
        assert_eq!(keys, vec!["name", "scripts", "version", "dependencies"]);
    }

    #[test]
    fn sort_is_idempotent() {
        let m = manifest(json!({
            "dependencies": {"b": "2", "a": "1", "@x/y": "0"},
            "scripts": {"z": "", "a": ""}
        }));
        let once = sort_groups(m);
        let twice = sort_groups(once.clone());
        assert_eq!(once.to_pretty_string(), twice.to_pretty_string());
    }

    #[test]
    fn merge_then_sort_does_not_invent_groups() {
        let merged = sort_groups(merge(
            manifest(json!({"name": "a", "dependencies": {"x": "1"}})),
            manifest(json!({"devDependencies": {"y": "1"}})),
        ));
        assert!(!merged.has_group(ManifestGroup::Scripts));
        assert!(!merged.has_group(ManifestGroup::PeerDependencies));
        assert!(!merged.has_group(ManifestGroup::OptionalDependencies));
    }

    #[test]
    fn merge_then_sort_unions_disjoint_groups() {
        let merged = sort_groups(merge(
            manifest(json!({"name": "a", "dependencies": {"zod": "3", "axios": "1"}})),
            manifest(json!({"devDependencies": {"vitest": "1", "@types/node": "20", "tsup": "8"}})),
        ));

        let deps: Vec<&String> = merged
            .get("dependencies")
            .and_then(Value::as_object)
            .unwrap()
            .keys()
            .collect();
        assert_eq!(deps, vec!["axios", "zod"]);

        let dev: Vec<&String> = merged
            .get("devDependencies")
            .and_then(Value::as_object)
            .unwrap()
            .keys()
            .collect();
        assert_eq!(dev, vec!["@types/node", "tsup", "vitest"]);
        assert_eq!(merged.get("name"), Some(&json!("a")));
    }

    // ── parsing / serialization ───────────────────────────────────────────

    #[test]
    fn parse_rejects_invalid_json() {
        let err = Manifest::parse(b"{ not json", "dest/package.json").unwrap_err();
        assert!(matches!(
            err,
            DomainError::MalformedManifest { ref path, .. } if path == "dest/package.json"
        ));
    }

    #[test]
    fn parse_rejects_non_object_top_level() {
        let err = Manifest::parse(b"[1, 2]", "package.json").unwrap_err();
        match err {
            DomainError::MalformedManifest { reason, .. } => assert!(reason.contains("array")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn seed_serializes_name_then_version() {
        assert_eq!(
            Manifest::seed("my-lib", "0.0.0").to_pretty_string(),
            "{\n  \"name\": \"my-lib\",\n  \"version\": \"0.0.0\"\n}\n"
        );
    }

    #[test]
    fn remove_group_keeps_remaining_order() {
        let mut m = manifest(json!({"a": 1, "dependencies": {}, "b": 2}));
        m.remove_group(ManifestGroup::Dependencies);
        let keys: Vec<&str> = m.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
    }
}
