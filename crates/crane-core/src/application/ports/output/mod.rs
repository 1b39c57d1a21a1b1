//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `crane-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::PackageManager;
use crate::error::CraneResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `crane_adapters::filesystem::LocalFilesystem` (production)
/// - `crane_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Check if path is a symbolic link. The link is not followed.
    fn is_symlink(&self, path: &Path) -> bool;

    /// Names of the direct children of a directory.
    fn read_dir(&self, path: &Path) -> CraneResult<Vec<String>>;

    fn read_file(&self, path: &Path) -> CraneResult<Vec<u8>>;

    /// Write content to a file, replacing it. The parent must exist.
    fn write_file(&self, path: &Path, content: &[u8]) -> CraneResult<()>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> CraneResult<()>;

    fn remove_file(&self, path: &Path) -> CraneResult<()>;

    /// Remove an empty directory.
    fn remove_dir(&self, path: &Path) -> CraneResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> CraneResult<()>;
}

/// Port for repository initialization.
///
/// Implemented by `crane_adapters::process::GitCli`.
#[cfg_attr(test, mockall::automock)]
pub trait VersionControl: Send + Sync {
    /// Initialize an empty repository in `dir`.
    fn init(&self, dir: &Path) -> CraneResult<()>;
}

/// Port for running a package manager in a generated project.
///
/// Implemented by `crane_adapters::process::CommandInstaller`.
#[cfg_attr(test, mockall::automock)]
pub trait PackageInstaller: Send + Sync {
    fn is_available(&self, manager: PackageManager) -> bool;

    /// Install the declared dependencies.
    fn install(&self, dir: &Path, manager: PackageManager) -> CraneResult<()>;

    /// Bump dependencies within their declared ranges.
    fn update(&self, dir: &Path, manager: PackageManager) -> CraneResult<()>;
}
