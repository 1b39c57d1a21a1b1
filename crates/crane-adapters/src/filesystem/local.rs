//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use walkdir::WalkDir;

use crane_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{CraneError, CraneResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_symlink(&self, path: &Path) -> bool {
        path.is_symlink()
    }

    /// Direct children, sorted by file name.
    fn read_dir(&self, path: &Path) -> CraneResult<Vec<String>> {
        WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .map(|entry| {
                entry
                    .map(|e| e.file_name().to_string_lossy().into_owned())
                    .map_err(|e| map_walk_error(path, e))
            })
            .collect()
    }

    fn read_file(&self, path: &Path) -> CraneResult<Vec<u8>> {
        std::fs::read(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> CraneResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn create_dir_all(&self, path: &Path) -> CraneResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn remove_file(&self, path: &Path) -> CraneResult<()> {
        std::fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
    }

    fn remove_dir(&self, path: &Path) -> CraneResult<()> {
        std::fs::remove_dir(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }

    fn remove_dir_all(&self, path: &Path) -> CraneResult<()> {
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> CraneError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

fn map_walk_error(path: &Path, e: walkdir::Error) -> CraneError {
    ApplicationError::FilesystemError {
        path: e.path().unwrap_or(path).to_path_buf(),
        reason: format!("Failed to list directory: {}", e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn read_dir_lists_sorted_direct_children() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("b.txt"), "b").unwrap();
        std::fs::write(tmp.path().join("_gitignore"), "g").unwrap();
        std::fs::create_dir_all(tmp.path().join("a/nested")).unwrap();

        let names = LocalFilesystem::new().read_dir(tmp.path()).unwrap();
        assert_eq!(names, ["_gitignore", "a", "b.txt"]);
    }

    #[test]
    fn write_then_read_round_trips_bytes() {
        let tmp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let path = tmp.path().join("package.json");

        fs.write_file(&path, b"{}\n").unwrap();
        assert_eq!(fs.read_file(&path).unwrap(), b"{}\n");
        assert!(fs.exists(&path));
        assert!(!fs.is_dir(&path));
    }

    #[cfg(unix)]
    #[test]
    fn emptying_removes_links_but_not_their_targets() {
        use crane_core::application::DirectoryCleaner;

        let outside = TempDir::new().unwrap();
        std::fs::write(outside.path().join("precious.txt"), "keep").unwrap();

        let dest = TempDir::new().unwrap();
        std::fs::write(dest.path().join("stale.txt"), "stale").unwrap();
        std::os::unix::fs::symlink(outside.path(), dest.path().join("link")).unwrap();
        std::os::unix::fs::symlink(
            outside.path().join("precious.txt"),
            dest.path().join("file-link"),
        )
        .unwrap();

        let fs = LocalFilesystem::new();
        assert!(fs.is_symlink(&dest.path().join("link")));
        assert!(!fs.is_symlink(&dest.path().join("stale.txt")));

        DirectoryCleaner::new(&fs).empty_dir(dest.path()).unwrap();

        assert!(LocalFilesystem::new().read_dir(dest.path()).unwrap().is_empty());
        assert_eq!(
            std::fs::read_to_string(outside.path().join("precious.txt")).unwrap(),
            "keep"
        );
    }

    #[test]
    fn missing_file_maps_to_filesystem_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nope");

        let err = LocalFilesystem::new().read_file(&path).unwrap_err();
        assert!(matches!(
            err,
            CraneError::Application(ApplicationError::FilesystemError { path: p, .. }) if p == path
        ));
    }
}
