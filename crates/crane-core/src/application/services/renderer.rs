//! Template tree renderer.
//!
//! Rendering is split in two passes:
//! 1. `plan` walks a template subtree and decides, per file, whether it is a
//!    copy, a manifest merge or a text append. Nothing is written.
//! 2. `apply` executes the actions in order, one read-modify-write each.
//!
//! A destination "collides" when it exists on disk or when an earlier action
//! of the same scaffold writes it. The caller threads the `pending` set from
//! subtree to subtree so later subtrees see earlier ones.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{
        DependencyCatalog, DependencyPool, Manifest, MissingVersionPolicy, RenderAction,
        RenderPlan, TemplateId, curate, merge, sort_groups,
    },
    error::CraneResult,
};

const MANIFEST_FILE: &str = "package.json";
const GITIGNORE_TEMPLATE: &str = "_gitignore";
const PRUNED_DIR: &str = "node_modules";

/// Curation inputs shared by every subtree of a scaffold.
#[derive(Debug, Clone, Default)]
pub struct Curation {
    pub catalog: DependencyCatalog,
    pub pool: DependencyPool,
    pub policy: MissingVersionPolicy,
}

impl Curation {
    pub fn new(
        catalog: DependencyCatalog,
        pool: DependencyPool,
        policy: MissingVersionPolicy,
    ) -> Self {
        Self {
            catalog,
            pool,
            policy,
        }
    }
}

/// Destination paths already claimed by planned actions.
#[derive(Debug, Clone, Default)]
pub struct PendingWrites {
    files: HashSet<PathBuf>,
    dirs: HashSet<PathBuf>,
    /// Ignore what is on disk; the destination is emptied before apply.
    ignore_existing: bool,
}

impl PendingWrites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ignoring_existing() -> Self {
        Self {
            ignore_existing: true,
            ..Self::default()
        }
    }

    pub fn claim_file(&mut self, path: &Path) {
        self.files.insert(path.to_path_buf());
    }

    pub fn release_file(&mut self, path: &Path) {
        self.files.remove(path);
    }

    /// Returns `false` when the directory was already claimed.
    pub fn claim_dir(&mut self, path: &Path) -> bool {
        self.dirs.insert(path.to_path_buf())
    }

    pub fn contains_file(&self, path: &Path) -> bool {
        self.files.contains(path)
    }
}

/// Where a node sits inside the subtree being planned.
#[derive(Clone, Copy)]
struct Scope<'s> {
    template: Option<&'s TemplateId>,
    root: &'s Path,
}

pub struct TemplateRenderer<'a> {
    fs: &'a dyn Filesystem,
    curation: &'a Curation,
}

impl<'a> TemplateRenderer<'a> {
    pub fn new(fs: &'a dyn Filesystem, curation: &'a Curation) -> Self {
        Self { fs, curation }
    }

    /// Plan the rendering of `src` into `dest`.
    ///
    /// `template` enables dependency curation for the manifest at the root of
    /// `src` when the catalog has a set for it.
    #[instrument(
        skip_all,
        fields(
            src = %src.display(),
            dest = %dest.display(),
            template = ?template.map(TemplateId::as_str)
        )
    )]
    pub fn plan(
        &self,
        src: &Path,
        dest: &Path,
        template: Option<&TemplateId>,
        pending: &mut PendingWrites,
    ) -> CraneResult<RenderPlan> {
        if !self.fs.exists(src) {
            return Err(ApplicationError::TemplateNotFound {
                path: src.to_path_buf(),
            }
            .into());
        }

        let mut plan = RenderPlan::new(dest);
        let scope = Scope {
            template,
            root: src,
        };
        self.plan_node(src, dest, scope, pending, &mut plan)?;
        debug!(actions = plan.len(), "Subtree planned");
        Ok(plan)
    }

    fn plan_node(
        &self,
        src: &Path,
        dest: &Path,
        scope: Scope<'_>,
        pending: &mut PendingWrites,
        plan: &mut RenderPlan,
    ) -> CraneResult<()> {
        let file_name = src
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if self.fs.is_dir(src) {
            if file_name == PRUNED_DIR {
                debug!(path = %src.display(), "Pruned");
                return Ok(());
            }

            if pending.claim_dir(dest) {
                plan.push(RenderAction::CreateDir {
                    path: dest.to_path_buf(),
                });
            }

            let mut children = self.fs.read_dir(src)?;
            children.sort();
            for child in children {
                self.plan_node(&src.join(&child), &dest.join(&child), scope, pending, plan)?;
            }
            return Ok(());
        }

        if file_name == MANIFEST_FILE && self.collides(dest, pending) {
            let bytes = self.fs.read_file(src)?;
            let mut incoming = Manifest::parse(&bytes, src.display())?;
            let template = self.curate_if_root(src, scope, &mut incoming)?;

            plan.push(RenderAction::MergeManifest {
                source: src.to_path_buf(),
                destination: dest.to_path_buf(),
                incoming,
                template,
            });
            pending.claim_file(dest);
            return Ok(());
        }

        let dest = match file_name.strip_prefix('_') {
            Some(rest) => dest.with_file_name(format!(".{rest}")),
            None => dest.to_path_buf(),
        };

        let action = if file_name == GITIGNORE_TEMPLATE && self.collides(&dest, pending) {
            RenderAction::AppendText {
                source: src.to_path_buf(),
                destination: dest.clone(),
            }
        } else {
            RenderAction::Copy {
                source: src.to_path_buf(),
                destination: dest.clone(),
            }
        };
        plan.push(action);
        pending.claim_file(&dest);
        Ok(())
    }

    fn collides(&self, dest: &Path, pending: &PendingWrites) -> bool {
        pending.contains_file(dest) || (!pending.ignore_existing && self.fs.exists(dest))
    }

    /// Curate `incoming` when it is the subtree's root manifest and the
    /// catalog knows the subtree.
    fn curate_if_root(
        &self,
        src: &Path,
        scope: Scope<'_>,
        incoming: &mut Manifest,
    ) -> CraneResult<Option<TemplateId>> {
        let Some(id) = scope.template else {
            return Ok(None);
        };
        if src.parent() != Some(scope.root) {
            return Ok(None);
        }
        let Some(set) = self.curation.catalog.get(id) else {
            return Ok(None);
        };

        curate(incoming, &self.curation.pool, set, self.curation.policy, id)?;
        debug!(template = %id, "Dependencies curated");
        Ok(Some(id.clone()))
    }

    /// Execute `plan` against the filesystem, in order.
    #[instrument(skip_all, fields(root = %plan.root().display(), actions = plan.len()))]
    pub fn apply(&self, plan: &RenderPlan) -> CraneResult<()> {
        for action in plan.actions() {
            debug!(%action, "Applying");
            self.apply_action(action)?;
        }
        Ok(())
    }

    fn apply_action(&self, action: &RenderAction) -> CraneResult<()> {
        match action {
            RenderAction::CreateDir { path } => self.fs.create_dir_all(path),
            RenderAction::WriteSeedManifest {
                destination,
                manifest,
            } => self
                .fs
                .write_file(destination, manifest.to_pretty_string().as_bytes()),
            RenderAction::Copy {
                source,
                destination,
            } => {
                let bytes = self.fs.read_file(source)?;
                self.fs.write_file(destination, &bytes)
            }
            RenderAction::MergeManifest {
                destination,
                incoming,
                ..
            } => {
                let bytes = self.fs.read_file(destination)?;
                let existing = Manifest::parse(&bytes, destination.display())?;
                let merged = sort_groups(merge(existing, incoming.clone()));
                self.fs
                    .write_file(destination, merged.to_pretty_string().as_bytes())
            }
            RenderAction::AppendText {
                source,
                destination,
            } => {
                let mut content = self.fs.read_file(destination)?;
                content.push(b'\n');
                content.extend(self.fs.read_file(source)?);
                self.fs.write_file(destination, &content)
            }
            RenderAction::RemoveFileIfExists { path } => {
                if self.fs.exists(path) {
                    self.fs.remove_file(path)
                } else {
                    debug!(path = %path.display(), "Nothing to remove");
                    Ok(())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockFilesystem;
    use crate::error::CraneError;
    use mockall::predicate::eq;

    #[test]
    fn missing_subtree_is_template_not_found() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        let curation = Curation::default();
        let renderer = TemplateRenderer::new(&fs, &curation);

        let err = renderer
            .plan(
                Path::new("/t/lib"),
                Path::new("/out"),
                None,
                &mut PendingWrites::new(),
            )
            .unwrap_err();

        assert_eq!(
            err,
            CraneError::Application(ApplicationError::TemplateNotFound {
                path: PathBuf::from("/t/lib")
            })
        );
    }

    #[test]
    fn remove_if_exists_tolerates_absence() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .with(eq(Path::new("/out/rome.json")))
            .returning(|_| false);
        fs.expect_remove_file().never();
        let curation = Curation::default();
        let renderer = TemplateRenderer::new(&fs, &curation);

        let mut plan = RenderPlan::new("/out");
        plan.push(RenderAction::RemoveFileIfExists {
            path: "/out/rome.json".into(),
        });

        renderer.apply(&plan).unwrap();
    }

    #[test]
    fn append_joins_with_newline() {
        let mut fs = MockFilesystem::new();
        fs.expect_read_file()
            .with(eq(Path::new("/out/.gitignore")))
            .returning(|_| Ok(b"dist".to_vec()));
        fs.expect_read_file()
            .with(eq(Path::new("/t/lib/_gitignore")))
            .returning(|_| Ok(b"coverage\n".to_vec()));
        fs.expect_write_file()
            .withf(|path, content| {
                path == Path::new("/out/.gitignore") && content == b"dist\ncoverage\n"
            })
            .times(1)
            .returning(|_, _| Ok(()));
        let curation = Curation::default();
        let renderer = TemplateRenderer::new(&fs, &curation);

        let mut plan = RenderPlan::new("/out");
        plan.push(RenderAction::AppendText {
            source: "/t/lib/_gitignore".into(),
            destination: "/out/.gitignore".into(),
        });

        renderer.apply(&plan).unwrap();
    }

    #[test]
    fn merge_rejects_malformed_destination() {
        let mut fs = MockFilesystem::new();
        fs.expect_read_file().returning(|_| Ok(b"[1, 2]".to_vec()));
        fs.expect_write_file().never();
        let curation = Curation::default();
        let renderer = TemplateRenderer::new(&fs, &curation);

        let mut plan = RenderPlan::new("/out");
        plan.push(RenderAction::MergeManifest {
            source: "/t/base/package.json".into(),
            destination: "/out/package.json".into(),
            incoming: Manifest::new(),
            template: None,
        });

        let err = renderer.apply(&plan).unwrap_err();
        assert!(matches!(
            err,
            CraneError::Domain(crate::domain::DomainError::MalformedManifest { .. })
        ));
    }

    #[test]
    fn pending_writes_ignore_disk_when_asked() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| true);
        let curation = Curation::default();
        let renderer = TemplateRenderer::new(&fs, &curation);

        let fresh = PendingWrites::ignoring_existing();
        assert!(!renderer.collides(Path::new("/out/package.json"), &fresh));

        let mut normal = PendingWrites::new();
        assert!(renderer.collides(Path::new("/out/package.json"), &normal));
        normal.claim_file(Path::new("/out/a"));
        assert!(normal.contains_file(Path::new("/out/a")));
    }
}
