//! Template root discovery.
//!
//! # Resolution order
//!
//! The first candidate that looks like a template root wins:
//!
//! 1. An explicit override (`--templates` or `templates.root` in config).
//! 2. **`$CRANE_TEMPLATES_DIR`**, the environment variable override.
//! 3. **`./templates`**, relative to the current working directory.
//! 4. **`<executable-dir>/templates`**, sibling to the `crane` binary.
//! 5. **`../templates`**, convenient when running from `target/debug/`.
//!
//! A directory "looks like" a template root when it contains at least one of
//! the kind subtrees (`base` or `monorepo`). An explicit override is taken as
//! is and only has to exist.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crane_core::{application::ApplicationError, error::CraneResult};

pub const TEMPLATES_DIR_ENV: &str = "CRANE_TEMPLATES_DIR";

const MARKER_SUBTREES: &[&str] = &["base", "monorepo"];

/// Locate the template root.
#[instrument]
pub fn discover(explicit: Option<&Path>) -> CraneResult<PathBuf> {
    if let Some(dir) = explicit {
        if dir.is_dir() {
            info!(path = %dir.display(), "Using explicit template root");
            return Ok(dir.to_path_buf());
        }
        return Err(ApplicationError::TemplateNotFound {
            path: dir.to_path_buf(),
        }
        .into());
    }

    let candidates = candidate_paths();
    for candidate in &candidates {
        debug!(path = %candidate.display(), "checking candidate templates path");
        if is_template_root(candidate) {
            info!(path = %candidate.display(), "Template root found");
            return Ok(candidate.clone());
        }
    }

    warn!("no templates directory found");
    Err(ApplicationError::TemplateRootNotFound {
        searched: candidates
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", "),
    }
    .into())
}

pub fn is_template_root(dir: &Path) -> bool {
    dir.is_dir() && MARKER_SUBTREES.iter().any(|s| dir.join(s).is_dir())
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(4);

    if let Ok(env_dir) = std::env::var(TEMPLATES_DIR_ENV) {
        let p = PathBuf::from(env_dir);
        debug!(path = %p.display(), "candidate from $CRANE_TEMPLATES_DIR");
        paths.push(p);
    }

    paths.push(PathBuf::from("templates"));

    if let Some(exe_sibling) = exe_sibling_templates() {
        paths.push(exe_sibling);
    }

    paths.push(PathBuf::from("../templates"));

    paths
}

fn exe_sibling_templates() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.join("templates")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_root_must_exist() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope");

        assert!(discover(Some(&missing)).is_err());
        assert_eq!(discover(Some(tmp.path())).unwrap(), tmp.path());
    }

    #[test]
    fn template_root_needs_a_kind_subtree() {
        let tmp = TempDir::new().unwrap();
        assert!(!is_template_root(tmp.path()));

        std::fs::create_dir(tmp.path().join("monorepo")).unwrap();
        assert!(is_template_root(tmp.path()));
    }
}
