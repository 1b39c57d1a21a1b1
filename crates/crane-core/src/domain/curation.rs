//! Dependency curation: pick, per template, which names from the tool's own
//! version pool end up in the generated manifest.
//!
//! The pool holds two maps (runtime and dev). Lookups prefer the dev map and
//! fall back to the runtime map. Iteration follows the declaration order of
//! the wanted set; the property sorter orders the final group.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{
    error::DomainError,
    manifest::{Manifest, ManifestGroup},
    value_objects::TemplateId,
};

// ── Pool ──────────────────────────────────────────────────────────────────────

/// Name → version pairs available to curation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyPool {
    dependencies: HashMap<String, String>,
    dev_dependencies: HashMap<String, String>,
}

impl DependencyPool {
    pub fn new(
        dependencies: impl IntoIterator<Item = (String, String)>,
        dev_dependencies: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        Self {
            dependencies: dependencies.into_iter().collect(),
            dev_dependencies: dev_dependencies.into_iter().collect(),
        }
    }

    /// Build a pool from a manifest's `dependencies` and `devDependencies`.
    ///
    /// Entries whose value is not a string are ignored.
    pub fn from_manifest(manifest: &Manifest) -> Self {
        let strings = |group| {
            manifest
                .group(group)
                .into_iter()
                .flat_map(|entries| entries.iter())
                .filter_map(|(name, version)| {
                    version.as_str().map(|v| (name.clone(), v.to_string()))
                })
                .collect::<HashMap<_, _>>()
        };

        Self {
            dependencies: strings(ManifestGroup::Dependencies),
            dev_dependencies: strings(ManifestGroup::DevDependencies),
        }
    }

    /// Version for `name`: dev pool first, then runtime pool.
    pub fn version_of(&self, name: &str) -> Option<&str> {
        self.dev_dependencies
            .get(name)
            .or_else(|| self.dependencies.get(name))
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty() && self.dev_dependencies.is_empty()
    }
}

// ── Policy ────────────────────────────────────────────────────────────────────

/// What to do with a wanted name that has no version in either pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingVersionPolicy {
    /// Leave the name out of the generated group.
    #[default]
    Omit,
    /// Emit the name with version `"*"`.
    Wildcard,
    /// Abort rendering.
    Fail,
}

impl MissingVersionPolicy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Omit => "omit",
            Self::Wildcard => "wildcard",
            Self::Fail => "fail",
        }
    }
}

impl FromStr for MissingVersionPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "omit" | "skip" => Ok(Self::Omit),
            "wildcard" | "*" => Ok(Self::Wildcard),
            "fail" | "error" => Ok(Self::Fail),
            other => Err(DomainError::UnknownPolicy(other.into())),
        }
    }
}

// ── Template dependency sets ──────────────────────────────────────────────────

/// Names a template declares relevant, per manifest group.
///
/// Names keep declaration order and appear at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateDependencySet {
    dependencies: Option<Vec<String>>,
    dev_dependencies: Option<Vec<String>>,
}

impl TemplateDependencySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dependencies<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = Some(dedup(names));
        self
    }

    pub fn with_dev_dependencies<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dev_dependencies = Some(dedup(names));
        self
    }

    /// Wanted names for `group`. Only the two dependency groups are curated.
    pub fn wanted(&self, group: ManifestGroup) -> Option<&[String]> {
        match group {
            ManifestGroup::Dependencies => self.dependencies.as_deref(),
            ManifestGroup::DevDependencies => self.dev_dependencies.as_deref(),
            _ => None,
        }
    }
}

fn dedup<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut out: Vec<String> = Vec::new();
    for name in names {
        let name = name.into();
        if !out.contains(&name) {
            out.push(name);
        }
    }
    out
}

// ── Selection ─────────────────────────────────────────────────────────────────

/// Select the versioned subset of `pool` named by `wanted`.
///
/// `template` is only used to label errors.
pub fn select(
    pool: &DependencyPool,
    wanted: Option<&[String]>,
    policy: MissingVersionPolicy,
    template: &TemplateId,
) -> Result<Map<String, Value>, DomainError> {
    let mut selected = Map::new();

    for name in wanted.unwrap_or_default() {
        match (pool.version_of(name), policy) {
            (Some(version), _) => {
                selected.insert(name.clone(), Value::String(version.into()));
            }
            (None, MissingVersionPolicy::Omit) => {}
            (None, MissingVersionPolicy::Wildcard) => {
                selected.insert(name.clone(), Value::String("*".into()));
            }
            (None, MissingVersionPolicy::Fail) => {
                return Err(DomainError::MissingDependencyVersion {
                    name: name.clone(),
                    template: template.to_string(),
                });
            }
        }
    }

    Ok(selected)
}

/// Overwrite `incoming`'s dependency groups with the curated selection.
///
/// A group that curates to nothing is removed, so a merge keeps whatever the
/// destination already declares instead of gaining an empty group.
pub fn curate(
    incoming: &mut Manifest,
    pool: &DependencyPool,
    set: &TemplateDependencySet,
    policy: MissingVersionPolicy,
    template: &TemplateId,
) -> Result<(), DomainError> {
    for group in [ManifestGroup::Dependencies, ManifestGroup::DevDependencies] {
        let selected = select(pool, set.wanted(group), policy, template)?;
        if selected.is_empty() {
            incoming.remove_group(group);
        } else {
            incoming.set_group(group, selected);
        }
    }
    Ok(())
}

// ── Catalog ───────────────────────────────────────────────────────────────────

const BASE_DEV_DEPENDENCIES: &[&str] = &[
    "@types/node",
    "@vitest/coverage-istanbul",
    "husky",
    "lint-staged",
    "rome",
    "typescript",
    "vitest",
];

const BASE_DEPENDENCIES: &[&str] = &["tslib"];

/// Dependency sets keyed by template identity.
#[derive(Debug, Clone, Default)]
pub struct DependencyCatalog {
    sets: HashMap<TemplateId, TemplateDependencySet>,
}

impl DependencyCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The sets shipped with the bundled templates.
    pub fn builtin() -> Self {
        let base_dev = BASE_DEV_DEPENDENCIES.iter().copied();

        Self::new()
            .with(
                TemplateId::new("lib"),
                TemplateDependencySet::new()
                    .with_dependencies(BASE_DEPENDENCIES.iter().copied())
                    .with_dev_dependencies(base_dev.clone().chain(["tsup"])),
            )
            .with(
                TemplateId::new("app"),
                TemplateDependencySet::new()
                    .with_dependencies(BASE_DEPENDENCIES.iter().copied())
                    .with_dev_dependencies(base_dev.chain(["rimraf", "tsx"])),
            )
            .with(
                TemplateId::new("monorepo"),
                TemplateDependencySet::new().with_dev_dependencies([
                    "rome",
                    "turbo",
                    "@changesets/cli",
                    "@changesets/changelog-github",
                ]),
            )
            .with(
                TemplateId::new("with-changesets"),
                TemplateDependencySet::new()
                    .with_dev_dependencies(["@changesets/cli", "@changesets/changelog-github"]),
            )
            .with(
                TemplateId::new("with-commitlint"),
                TemplateDependencySet::new().with_dev_dependencies([
                    "@commitlint/cli",
                    "@commitlint/config-conventional",
                ]),
            )
            .with(
                TemplateId::new("with-husky"),
                TemplateDependencySet::new().with_dev_dependencies(["husky", "lint-staged"]),
            )
    }

    pub fn with(mut self, id: TemplateId, set: TemplateDependencySet) -> Self {
        self.sets.insert(id, set);
        self
    }

    pub fn get(&self, id: &TemplateId) -> Option<&TemplateDependencySet> {
        self.sets.get(id)
    }
}
