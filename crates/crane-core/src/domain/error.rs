// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (so they can be carried inside plans and reports)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Malformed manifest at {path}: {reason}")]
    MalformedManifest { path: String, reason: String },

    #[error("Invalid package name '{name}'")]
    InvalidPackageName { name: String },

    #[error("Unknown project kind '{0}'")]
    UnknownProjectKind(String),

    #[error("Unknown add-on '{0}'")]
    UnknownAddOn(String),

    #[error("Unknown package manager '{0}'")]
    UnknownPackageManager(String),

    #[error("Unknown missing-version policy '{0}'")]
    UnknownPolicy(String),

    // ========================================================================
    // Curation
    // ========================================================================
    #[error("No version for '{name}' in the dependency pool (template '{template}')")]
    MissingDependencyVersion { name: String, template: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MalformedManifest { path, .. } => vec![
                format!("Fix the JSON in {}", path),
                "A manifest must be a JSON object at the top level".into(),
            ],
            Self::InvalidPackageName { name } => vec![
                format!("'{}' is not a valid package.json name", name),
                "Use lowercase letters, digits, '-', '.', '_' and '~'".into(),
                "Scoped names look like @scope/name".into(),
            ],
            Self::MissingDependencyVersion { name, .. } => vec![
                format!("Add a version for '{}' to the template versions.json", name),
                "Or rerun with --missing-version omit".into(),
            ],
            Self::UnknownProjectKind(_) => vec![
                "Supported kinds: lib, app, monorepo, monorepo-app, monorepo-lib".into(),
            ],
            Self::UnknownAddOn(_) => {
                vec!["Supported add-ons: changesets, commitlint, actions, husky".into()]
            }
            Self::UnknownPackageManager(_) => vec!["Supported: npm, yarn, pnpm".into()],
            Self::UnknownPolicy(_) => vec!["Supported: omit, wildcard, fail".into()],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidPackageName { .. }
            | Self::UnknownProjectKind(_)
            | Self::UnknownAddOn(_)
            | Self::UnknownPackageManager(_)
            | Self::UnknownPolicy(_) => ErrorCategory::Validation,
            Self::MalformedManifest { .. } | Self::MissingDependencyVersion { .. } => {
                ErrorCategory::Template
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Template,
}
