//! Process adapters: `git` and the package managers.
//!
//! Output is captured, not streamed. The CLI shows a spinner while these run
//! and only the first stderr line is surfaced on failure.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tracing::{debug, instrument};

use crane_core::{
    application::{
        ApplicationError,
        ports::{PackageInstaller, VersionControl},
    },
    domain::PackageManager,
    error::CraneResult,
};

fn locate(binary: &str) -> CraneResult<PathBuf> {
    which::which(binary).map_err(|_| {
        ApplicationError::ToolNotFound {
            name: binary.to_string(),
        }
        .into()
    })
}

/// Run `program args..` in `dir`, mapping a spawn error or a non-zero exit to
/// `ExternalCommandFailed`.
fn run(program: &Path, display: &str, args: &[&str], dir: &Path) -> CraneResult<Output> {
    let command = std::iter::once(display)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ");
    debug!(%command, dir = %dir.display(), "Spawning");

    let output = Command::new(program)
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|e| ApplicationError::ExternalCommandFailed {
            command: command.clone(),
            reason: e.to_string(),
        })?;

    if output.status.success() {
        return Ok(output);
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let reason = stderr
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| output.status.to_string());
    Err(ApplicationError::ExternalCommandFailed { command, reason }.into())
}

// ── Git ───────────────────────────────────────────────────────────────────────

/// `git init` through the `git` binary on PATH.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitCli;

impl GitCli {
    pub fn new() -> Self {
        Self
    }
}

impl VersionControl for GitCli {
    #[instrument(skip(self), fields(dir = %dir.display()))]
    fn init(&self, dir: &Path) -> CraneResult<()> {
        let git = locate("git")?;
        run(&git, "git", &["init"], dir)?;
        Ok(())
    }
}

// ── Package managers ──────────────────────────────────────────────────────────

/// Spawns npm, yarn or pnpm.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandInstaller;

impl CommandInstaller {
    pub fn new() -> Self {
        Self
    }

    pub(crate) fn install_args(manager: PackageManager) -> &'static [&'static str] {
        match manager {
            PackageManager::Npm => &["install"],
            PackageManager::Yarn => &["install"],
            PackageManager::Pnpm => &["i"],
        }
    }

    pub(crate) fn update_args(manager: PackageManager) -> &'static [&'static str] {
        match manager {
            PackageManager::Npm | PackageManager::Pnpm => &["update"],
            PackageManager::Yarn => &["upgrade"],
        }
    }
}

impl PackageInstaller for CommandInstaller {
    fn is_available(&self, manager: PackageManager) -> bool {
        which::which(manager.binary()).is_ok()
    }

    #[instrument(skip(self), fields(dir = %dir.display()))]
    fn install(&self, dir: &Path, manager: PackageManager) -> CraneResult<()> {
        let program = locate(manager.binary())?;
        run(&program, manager.binary(), Self::install_args(manager), dir)?;
        Ok(())
    }

    #[instrument(skip(self), fields(dir = %dir.display()))]
    fn update(&self, dir: &Path, manager: PackageManager) -> CraneResult<()> {
        let program = locate(manager.binary())?;
        run(&program, manager.binary(), Self::update_args(manager), dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crane_core::error::CraneError;

    #[test]
    fn manager_arguments() {
        assert_eq!(CommandInstaller::install_args(PackageManager::Pnpm), ["i"]);
        assert_eq!(CommandInstaller::update_args(PackageManager::Pnpm), ["update"]);
        assert_eq!(CommandInstaller::update_args(PackageManager::Yarn), ["upgrade"]);
    }

    #[test]
    fn unknown_binary_is_tool_not_found() {
        let err = locate("crane-definitely-not-installed").unwrap_err();
        assert_eq!(
            err,
            CraneError::Application(ApplicationError::ToolNotFound {
                name: "crane-definitely-not-installed".into()
            })
        );
    }
}
