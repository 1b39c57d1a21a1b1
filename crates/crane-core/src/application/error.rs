//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not business
//! logic. Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A template subtree is missing from the template root.
    #[error("Template not found at {path}")]
    TemplateNotFound { path: PathBuf },

    /// No template root could be located.
    #[error("No template directory found (searched: {searched})")]
    TemplateRootNotFound { searched: String },

    /// An external program (`git`, a package manager) failed.
    #[error("Command '{command}' failed: {reason}")]
    ExternalCommandFailed { command: String, reason: String },

    /// An external program is not installed.
    #[error("'{name}' was not found on PATH")]
    ToolNotFound { name: String },

    /// Store access failed (lock poisoned, etc.).
    #[error("Filesystem store lock poisoned")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::TemplateNotFound { path } => vec![
                format!("Expected a template directory at {}", path.display()),
                "Point --templates (or CRANE_TEMPLATES_DIR) at a complete template root".into(),
            ],
            Self::TemplateRootNotFound { .. } => vec![
                "Set CRANE_TEMPLATES_DIR or pass --templates <DIR>".into(),
                "Or set templates.root in the config file (crane config path)".into(),
            ],
            Self::ExternalCommandFailed { command, .. } => vec![
                format!("Run '{}' manually to see the full output", command),
            ],
            Self::ToolNotFound { name } => vec![
                format!("Install {} and make sure it is on PATH", name),
                "Or skip this step (--no-git, or leave out --install)".into(),
            ],
            Self::StoreLockError => vec!["Try again in a moment".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateNotFound { .. } | Self::TemplateRootNotFound { .. } => {
                ErrorCategory::NotFound
            }
            Self::ToolNotFound { .. } => ErrorCategory::NotFound,
            Self::ExternalCommandFailed { .. } => ErrorCategory::External,
            Self::FilesystemError { .. } => ErrorCategory::Internal,
            Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}
