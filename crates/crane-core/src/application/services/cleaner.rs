use std::path::Path;

use tracing::{debug, instrument};

use crate::{application::ports::Filesystem, error::CraneResult};

const GIT_DIR: &str = ".git";

/// Destination checks and emptying before a forced scaffold.
pub struct DirectoryCleaner<'a> {
    fs: &'a dyn Filesystem,
}

impl<'a> DirectoryCleaner<'a> {
    pub fn new(fs: &'a dyn Filesystem) -> Self {
        Self { fs }
    }

    /// True when `dir` is missing, empty, or holds nothing but `.git`.
    pub fn can_skip_emptying(&self, dir: &Path) -> CraneResult<bool> {
        if !self.fs.exists(dir) {
            return Ok(true);
        }
        let entries = self.fs.read_dir(dir)?;
        Ok(match entries.as_slice() {
            [] => true,
            [only] => only == GIT_DIR,
            _ => false,
        })
    }

    /// Delete everything under `dir` except a top-level `.git`, children
    /// before parents. Links are removed, never followed. A missing `dir` is
    /// a no-op.
    #[instrument(skip(self), fields(dir = %dir.display()))]
    pub fn empty_dir(&self, dir: &Path) -> CraneResult<()> {
        if !self.fs.exists(dir) {
            return Ok(());
        }
        for name in self.fs.read_dir(dir)? {
            if name == GIT_DIR {
                continue;
            }
            self.remove_tree(&dir.join(name))?;
        }
        Ok(())
    }

    fn remove_tree(&self, path: &Path) -> CraneResult<()> {
        if self.fs.is_symlink(path) {
            debug!(path = %path.display(), "Removing link");
            return self.fs.remove_file(path);
        }
        if self.fs.is_dir(path) {
            for name in self.fs.read_dir(path)? {
                self.remove_tree(&path.join(name))?;
            }
            debug!(path = %path.display(), "Removing directory");
            self.fs.remove_dir(path)
        } else {
            self.fs.remove_file(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockFilesystem;
    use mockall::predicate::eq;

    fn listing(names: &'static [&'static str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn missing_directory_can_skip() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        assert!(DirectoryCleaner::new(&fs).can_skip_emptying(Path::new("/p")).unwrap());
    }

    #[test]
    fn only_git_can_skip() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_read_dir().returning(|_| Ok(listing(&[".git"])));
        assert!(DirectoryCleaner::new(&fs).can_skip_emptying(Path::new("/p")).unwrap());
    }

    #[test]
    fn any_other_content_cannot_skip() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_read_dir().returning(|_| Ok(listing(&[".git", "a.txt"])));
        assert!(!DirectoryCleaner::new(&fs).can_skip_emptying(Path::new("/p")).unwrap());
    }

    #[test]
    fn empty_dir_keeps_top_level_git_and_removes_post_order() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_read_dir()
            .with(eq(Path::new("/p")))
            .returning(|_| Ok(listing(&[".git", "src", "a.txt"])));
        fs.expect_read_dir()
            .with(eq(Path::new("/p/src")))
            .returning(|_| Ok(listing(&["index.ts"])));
        fs.expect_is_symlink().returning(|_| false);
        fs.expect_is_dir()
            .returning(|p| p == Path::new("/p/src"));

        let mut seq = mockall::Sequence::new();
        fs.expect_remove_file()
            .with(eq(Path::new("/p/src/index.ts")))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        fs.expect_remove_dir()
            .with(eq(Path::new("/p/src")))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        fs.expect_remove_file()
            .with(eq(Path::new("/p/a.txt")))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        DirectoryCleaner::new(&fs).empty_dir(Path::new("/p")).unwrap();
    }

    #[test]
    fn empty_dir_unlinks_directory_links_without_descending() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_read_dir()
            .with(eq(Path::new("/p")))
            .times(1)
            .returning(|_| Ok(listing(&["shared"])));
        fs.expect_is_symlink()
            .with(eq(Path::new("/p/shared")))
            .returning(|_| true);
        fs.expect_is_dir().never();
        fs.expect_remove_dir().never();
        fs.expect_remove_file()
            .with(eq(Path::new("/p/shared")))
            .times(1)
            .returning(|_| Ok(()));

        DirectoryCleaner::new(&fs).empty_dir(Path::new("/p")).unwrap();
    }

    #[test]
    fn empty_dir_on_missing_directory_is_noop() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_read_dir().never();
        DirectoryCleaner::new(&fs).empty_dir(Path::new("/nope")).unwrap();
    }
}
