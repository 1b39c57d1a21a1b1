//! Domain value objects: ProjectKind, ExistingMode, AddOn, PackageManager,
//! PackageName, TemplateId.
//!
//! These are plain value types with equality-by-value. Each has a string form
//! and a `FromStr` parser so the CLI and config layers can share them.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

// ── TemplateId ────────────────────────────────────────────────────────────────

/// Identity of a template subtree, relative to the template root.
///
/// `lib`, `base`, `with-actions/monorepo`. Curation keys off this value, never
/// off the filesystem path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemplateId(String);

impl TemplateId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Relative path segments of this subtree.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── RepositoryType ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepositoryType {
    Standalone,
    Monorepo,
}

impl RepositoryType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Standalone => "standalone",
            Self::Monorepo => "monorepo",
        }
    }
}

impl fmt::Display for RepositoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ProjectKind ───────────────────────────────────────────────────────────────

/// The shape of project to scaffold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectKind {
    Lib,
    App,
    Monorepo,
    MonorepoApp,
    MonorepoLib,
}

/// Lint configuration dropped from monorepo members; the workspace root owns it.
pub const MEMBER_STRIPPED_FILE: &str = "rome.json";

impl ProjectKind {
    pub const ALL: [ProjectKind; 5] = [
        Self::Lib,
        Self::App,
        Self::Monorepo,
        Self::MonorepoApp,
        Self::MonorepoLib,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Lib => "lib",
            Self::App => "app",
            Self::Monorepo => "monorepo",
            Self::MonorepoApp => "monorepo-app",
            Self::MonorepoLib => "monorepo-lib",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            Self::Lib => "TypeScript library bundled with tsup",
            Self::App => "TypeScript application run with tsx",
            Self::Monorepo => "pnpm + turbo workspace with apps/ and packages/",
            Self::MonorepoApp => "application inside an existing monorepo",
            Self::MonorepoLib => "library inside an existing monorepo",
        }
    }

    /// A project that lives inside a monorepo workspace.
    pub const fn is_monorepo_member(self) -> bool {
        matches!(self, Self::MonorepoApp | Self::MonorepoLib)
    }

    pub const fn is_monorepo(self) -> bool {
        matches!(self, Self::Monorepo)
    }

    /// Kinds that have a dev server.
    pub const fn is_app(self) -> bool {
        matches!(self, Self::App | Self::MonorepoApp)
    }

    /// Template subtrees rendered for this kind, in order.
    pub fn subtrees(self) -> Vec<TemplateId> {
        let names: &[&str] = match self {
            Self::Lib | Self::MonorepoLib => &["base", "lib"],
            Self::App | Self::MonorepoApp => &["base", "app"],
            Self::Monorepo => &["monorepo"],
        };
        names.iter().map(|n| TemplateId::new(*n)).collect()
    }

    /// Empty directories created after the subtrees.
    pub const fn workspace_dirs(self) -> &'static [&'static str] {
        match self {
            Self::Monorepo => &["apps", "packages"],
            _ => &[],
        }
    }

    /// Files removed after rendering, absence tolerated.
    pub const fn stripped_files(self) -> &'static [&'static str] {
        if self.is_monorepo_member() {
            &[MEMBER_STRIPPED_FILE]
        } else {
            &[]
        }
    }

    pub const fn repository_type(self) -> RepositoryType {
        if self.is_monorepo() {
            RepositoryType::Monorepo
        } else {
            RepositoryType::Standalone
        }
    }
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lib" | "library" => Ok(Self::Lib),
            "app" | "application" => Ok(Self::App),
            "monorepo" | "workspace" => Ok(Self::Monorepo),
            "monorepo-app" | "member-app" => Ok(Self::MonorepoApp),
            "monorepo-lib" | "member-lib" => Ok(Self::MonorepoLib),
            other => Err(DomainError::UnknownProjectKind(other.into())),
        }
    }
}

// ── ExistingMode ──────────────────────────────────────────────────────────────

/// How to treat a destination that already has content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExistingMode {
    /// Empty the destination first.
    Force,
    /// Render on top of what is there.
    Inject,
    /// Destination is empty or missing; nothing to do.
    #[default]
    Skip,
}

impl ExistingMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Force => "force",
            Self::Inject => "inject",
            Self::Skip => "skip",
        }
    }
}

impl fmt::Display for ExistingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── AddOn ─────────────────────────────────────────────────────────────────────

/// Optional template subtree rendered after the kind subtrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddOn {
    Changesets,
    Commitlint,
    Actions,
    Husky,
}

impl AddOn {
    pub const ALL: [AddOn; 4] = [Self::Changesets, Self::Commitlint, Self::Actions, Self::Husky];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Changesets => "changesets",
            Self::Commitlint => "commitlint",
            Self::Actions => "actions",
            Self::Husky => "husky",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            Self::Changesets => "release notes and versioning with changesets",
            Self::Commitlint => "conventional commit linting",
            Self::Actions => "GitHub Actions CI workflows",
            Self::Husky => "pre-commit hooks with husky and lint-staged",
        }
    }

    /// Template subtree for this add-on.
    pub fn subtree(self, repository: RepositoryType) -> TemplateId {
        match self {
            Self::Changesets => TemplateId::new("with-changesets"),
            Self::Commitlint => TemplateId::new("with-commitlint"),
            Self::Actions => TemplateId::new(format!("with-actions/{repository}")),
            Self::Husky => TemplateId::new("with-husky"),
        }
    }

    /// Whether this add-on applies to `kind`. Hooks belong to the workspace
    /// root, not to its members.
    pub const fn applies_to(self, kind: ProjectKind) -> bool {
        !matches!(self, Self::Husky) || !kind.is_monorepo_member()
    }
}

impl fmt::Display for AddOn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AddOn {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "changesets" | "changeset" => Ok(Self::Changesets),
            "commitlint" => Ok(Self::Commitlint),
            "actions" | "gh-actions" | "github-actions" => Ok(Self::Actions),
            "husky" | "hooks" => Ok(Self::Husky),
            other => Err(DomainError::UnknownAddOn(other.into())),
        }
    }
}

// ── PackageManager ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    #[default]
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManager {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
        }
    }

    /// Name of the executable.
    pub const fn binary(&self) -> &'static str {
        self.as_str()
    }

    /// Pick a manager from the invoking user agent string.
    ///
    /// Monorepos always use pnpm.
    pub fn detect(user_agent: Option<&str>, is_monorepo: bool) -> Self {
        if is_monorepo {
            return Self::Pnpm;
        }
        let agent = user_agent.unwrap_or_default();
        if agent.contains("pnpm") {
            Self::Pnpm
        } else if agent.contains("yarn") {
            Self::Yarn
        } else {
            Self::Npm
        }
    }

    /// Shell command that runs `script` with this manager.
    pub fn command(&self, script: &str, args: Option<&str>) -> String {
        let args = args.filter(|a| !a.is_empty());
        match (self, script) {
            (Self::Yarn, "install") => "yarn".into(),
            (Self::Npm, "install") => "npm install".into(),
            (Self::Npm, _) => match args {
                Some(args) => format!("npm run {script} -- {args}"),
                None => format!("npm run {script}"),
            },
            (Self::Yarn | Self::Pnpm, _) => match args {
                Some(args) => format!("{} {script} {args}", self.binary()),
                None => format!("{} {script}", self.binary()),
            },
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageManager {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "npm" => Ok(Self::Npm),
            "yarn" => Ok(Self::Yarn),
            "pnpm" => Ok(Self::Pnpm),
            other => Err(DomainError::UnknownPackageManager(other.into())),
        }
    }
}

// ── PackageName ───────────────────────────────────────────────────────────────

static PACKAGE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:@[a-z0-9\-*~][a-z0-9\-*._~]*/)?[a-z0-9\-~][a-z0-9\-._~]*$")
        .expect("package name pattern is valid")
});
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));
static LEADING_DOT_OR_UNDERSCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[._]").expect("leading pattern is valid"));
static INVALID_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\-~]+").expect("invalid run pattern is valid"));

/// A validated package.json `name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageName(String);

impl PackageName {
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if Self::is_valid(&name) {
            Ok(Self(name))
        } else {
            Err(DomainError::InvalidPackageName { name })
        }
    }

    pub fn is_valid(name: &str) -> bool {
        PACKAGE_NAME.is_match(name)
    }

    /// Turn an arbitrary project name into a valid candidate.
    pub fn suggest(project_name: &str) -> String {
        let lowered = project_name.trim().to_lowercase();
        let dashed = WHITESPACE.replace_all(&lowered, "-");
        let stripped = LEADING_DOT_OR_UNDERSCORE.replace(&dashed, "");
        INVALID_RUN.replace_all(&stripped, "-").into_owned()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PackageName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_kind_round_trips_through_str() {
        for kind in ProjectKind::ALL {
            assert_eq!(kind.as_str().parse::<ProjectKind>().unwrap(), kind);
        }
        assert!("spa".parse::<ProjectKind>().is_err());
    }

    #[test]
    fn project_kind_subtrees() {
        let ids = |k: ProjectKind| -> Vec<String> {
            k.subtrees().iter().map(ToString::to_string).collect()
        };
        assert_eq!(ids(ProjectKind::Lib), ["base", "lib"]);
        assert_eq!(ids(ProjectKind::MonorepoApp), ["base", "app"]);
        assert_eq!(ids(ProjectKind::Monorepo), ["monorepo"]);
        assert_eq!(ProjectKind::Monorepo.workspace_dirs(), ["apps", "packages"]);
        assert!(ProjectKind::Monorepo.stripped_files().is_empty());
        assert_eq!(ProjectKind::MonorepoLib.stripped_files(), ["rome.json"]);
    }

    #[test]
    fn actions_subtree_follows_repository_type() {
        assert_eq!(
            AddOn::Actions.subtree(ProjectKind::Monorepo.repository_type()).as_str(),
            "with-actions/monorepo"
        );
        assert_eq!(
            AddOn::Actions.subtree(ProjectKind::MonorepoApp.repository_type()).as_str(),
            "with-actions/standalone"
        );
    }

    #[test]
    fn husky_does_not_apply_to_members() {
        assert!(AddOn::Husky.applies_to(ProjectKind::Lib));
        assert!(AddOn::Husky.applies_to(ProjectKind::Monorepo));
        assert!(!AddOn::Husky.applies_to(ProjectKind::MonorepoLib));
        assert!(AddOn::Commitlint.applies_to(ProjectKind::MonorepoLib));
    }

    #[test]
    fn yarn_commands() {
        let pm = PackageManager::Yarn;
        assert_eq!(pm.command("install", None), "yarn");
        assert_eq!(pm.command("test", None), "yarn test");
        assert_eq!(pm.command("test", Some("my args")), "yarn test my args");
    }

    #[test]
    fn npm_commands() {
        let pm = PackageManager::Npm;
        assert_eq!(pm.command("install", None), "npm install");
        assert_eq!(pm.command("test", None), "npm run test");
        assert_eq!(pm.command("test", Some("my args")), "npm run test -- my args");
    }

    #[test]
    fn pnpm_commands() {
        let pm = PackageManager::Pnpm;
        assert_eq!(pm.command("install", None), "pnpm install");
        assert_eq!(pm.command("test", None), "pnpm test");
        assert_eq!(pm.command("test", Some("my args")), "pnpm test my args");
    }

    #[test]
    fn detect_package_manager() {
        assert_eq!(PackageManager::detect(Some("yarn/1.22.0"), true), PackageManager::Pnpm);
        assert_eq!(
            PackageManager::detect(Some("pnpm/8.6.0 npm/? node/v18"), false),
            PackageManager::Pnpm
        );
        assert_eq!(PackageManager::detect(Some("yarn/1.22.0 npm/?"), false), PackageManager::Yarn);
        assert_eq!(PackageManager::detect(Some("npm/9.0.0"), false), PackageManager::Npm);
        assert_eq!(PackageManager::detect(None, false), PackageManager::Npm);
    }

    #[test]
    fn package_name_validation() {
        assert!(PackageName::is_valid("my-lib"));
        assert!(PackageName::is_valid("@scope/my.lib_2"));
        assert!(!PackageName::is_valid("My Lib"));
        assert!(!PackageName::is_valid(".hidden"));
        assert!(!PackageName::is_valid(""));
        assert_eq!(
            PackageName::new("Nope").unwrap_err(),
            DomainError::InvalidPackageName { name: "Nope".into() }
        );
    }

    #[test]
    fn package_name_suggestion_is_valid() {
        assert_eq!(PackageName::suggest("  My Cool App "), "my-cool-app");
        assert_eq!(PackageName::suggest("_private"), "private");
        assert_eq!(PackageName::suggest("a@b!c"), "a-b-c");
        assert!(PackageName::is_valid(&PackageName::suggest("Hello World")));
    }
}
