//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the entire scaffolding workflow:
//! 1. Plan the kind's subtrees, workspace folders and add-ons
//! 2. Empty the destination when forced
//! 3. Apply the plan
//!
//! Post-scaffold steps (readme, repository, dependency install) are separate
//! calls so the CLI can decide which of them run.

use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, PackageInstaller, VersionControl},
        services::{
            cleaner::DirectoryCleaner,
            renderer::{Curation, PendingWrites, TemplateRenderer},
        },
    },
    domain::{
        AddOn, ExistingMode, Manifest, PackageManager, PackageName, ProjectKind, ReadmeSpec,
        RenderAction, RenderPlan, TemplateId, generate_readme,
    },
    error::CraneResult,
};

const SEED_VERSION: &str = "0.0.0";
const README_FILE: &str = "README.md";

/// Everything needed to render one project.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaffoldRequest {
    pub template_root: PathBuf,
    pub kind: ProjectKind,
    pub package_name: Option<PackageName>,
    pub destination: PathBuf,
    pub existing_mode: ExistingMode,
    pub addons: Vec<AddOn>,
}

impl ScaffoldRequest {
    pub fn new(
        template_root: impl Into<PathBuf>,
        kind: ProjectKind,
        destination: impl Into<PathBuf>,
    ) -> Self {
        Self {
            template_root: template_root.into(),
            kind,
            package_name: None,
            destination: destination.into(),
            existing_mode: ExistingMode::default(),
            addons: Vec::new(),
        }
    }

    pub fn with_package_name(mut self, name: PackageName) -> Self {
        self.package_name = Some(name);
        self
    }

    pub fn with_existing_mode(mut self, mode: ExistingMode) -> Self {
        self.existing_mode = mode;
        self
    }

    pub fn with_addons(mut self, addons: impl IntoIterator<Item = AddOn>) -> Self {
        self.addons = addons.into_iter().collect();
        self
    }

    /// Add-ons that will actually render: caller order, first occurrence
    /// wins, inapplicable ones dropped.
    pub fn effective_addons(&self) -> Vec<AddOn> {
        let mut out = Vec::new();
        for addon in &self.addons {
            if addon.applies_to(self.kind) && !out.contains(addon) {
                out.push(*addon);
            }
        }
        out
    }

    fn subtree_dir(&self, id: &TemplateId) -> PathBuf {
        id.segments()
            .fold(self.template_root.clone(), |dir, segment| dir.join(segment))
    }
}

/// Main scaffolding service.
pub struct ScaffoldService {
    filesystem: Box<dyn Filesystem>,
    vcs: Box<dyn VersionControl>,
    installer: Box<dyn PackageInstaller>,
    curation: Curation,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// Curation starts empty; see [`ScaffoldService::with_curation`].
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        vcs: Box<dyn VersionControl>,
        installer: Box<dyn PackageInstaller>,
    ) -> Self {
        Self {
            filesystem,
            vcs,
            installer,
            curation: Curation::default(),
        }
    }

    pub fn with_curation(mut self, curation: Curation) -> Self {
        self.curation = curation;
        self
    }

    fn renderer(&self) -> TemplateRenderer<'_> {
        TemplateRenderer::new(self.filesystem.as_ref(), &self.curation)
    }

    fn cleaner(&self) -> DirectoryCleaner<'_> {
        DirectoryCleaner::new(self.filesystem.as_ref())
    }

    /// Compute the full plan for `request` without writing anything.
    #[instrument(
        skip_all,
        fields(
            kind = %request.kind,
            mode = %request.existing_mode,
            destination = %request.destination.display()
        )
    )]
    pub fn plan(&self, request: &ScaffoldRequest) -> CraneResult<RenderPlan> {
        let dest = request.destination.as_path();
        let mut pending = match request.existing_mode {
            ExistingMode::Force => PendingWrites::ignoring_existing(),
            ExistingMode::Inject | ExistingMode::Skip => PendingWrites::new(),
        };
        let mut plan = RenderPlan::new(dest);

        if pending.claim_dir(dest) {
            plan.push(RenderAction::CreateDir {
                path: dest.to_path_buf(),
            });
        }

        if request.existing_mode != ExistingMode::Inject {
            if let Some(name) = &request.package_name {
                let destination = dest.join("package.json");
                pending.claim_file(&destination);
                plan.push(RenderAction::WriteSeedManifest {
                    destination,
                    manifest: Manifest::seed(name.as_str(), SEED_VERSION),
                });
            }
        }

        let renderer = self.renderer();
        for id in request.kind.subtrees() {
            info!(template = %id, "Rendering subtree");
            plan.extend(renderer.plan(&request.subtree_dir(&id), dest, Some(&id), &mut pending)?);
        }

        for dir in request.kind.workspace_dirs() {
            let path = dest.join(dir);
            if pending.claim_dir(&path) {
                plan.push(RenderAction::CreateDir { path });
            }
        }

        for file in request.kind.stripped_files() {
            let path = dest.join(file);
            pending.release_file(&path);
            plan.push(RenderAction::RemoveFileIfExists { path });
        }

        let repository = request.kind.repository_type();
        for addon in request.effective_addons() {
            let id = addon.subtree(repository);
            info!(%addon, template = %id, "Rendering add-on");
            plan.extend(renderer.plan(&request.subtree_dir(&id), dest, Some(&id), &mut pending)?);
        }

        info!(summary = %plan.summary(), "Scaffold planned");
        Ok(plan)
    }

    /// Scaffold a project: plan, empty the destination when forced, apply.
    ///
    /// Any failure aborts and is returned; written files stay in place.
    #[instrument(
        skip_all,
        fields(kind = %request.kind, destination = %request.destination.display())
    )]
    pub fn scaffold(&self, request: &ScaffoldRequest) -> CraneResult<RenderPlan> {
        let plan = self.plan(request)?;

        if request.existing_mode == ExistingMode::Force {
            info!("Emptying destination");
            self.cleaner().empty_dir(&request.destination)?;
        }

        self.renderer().apply(&plan)?;
        info!("Scaffold completed successfully");
        Ok(plan)
    }

    /// Whether `dir` needs no emptying.
    pub fn can_skip_emptying(&self, dir: &Path) -> CraneResult<bool> {
        self.cleaner().can_skip_emptying(dir)
    }

    /// Empty `dir`, keeping a top-level `.git`.
    pub fn empty_dir(&self, dir: &Path) -> CraneResult<()> {
        self.cleaner().empty_dir(dir)
    }

    /// Write `README.md` into `destination`. Skipped when injecting.
    ///
    /// Returns whether the file was written.
    #[instrument(skip_all, fields(destination = %destination.display()))]
    pub fn write_readme(
        &self,
        destination: &Path,
        spec: &ReadmeSpec,
        mode: ExistingMode,
    ) -> CraneResult<bool> {
        if mode == ExistingMode::Inject {
            info!("Injecting into an existing project, readme left alone");
            return Ok(false);
        }
        let readme = generate_readme(spec);
        self.filesystem
            .write_file(&destination.join(README_FILE), readme.as_bytes())?;
        Ok(true)
    }

    /// Initialize a repository in `destination`.
    ///
    /// On failure the destination is deleted (best effort) and the original
    /// error is returned.
    #[instrument(skip_all, fields(destination = %destination.display()))]
    pub fn init_repository(&self, destination: &Path) -> CraneResult<()> {
        match self.vcs.init(destination) {
            Ok(()) => {
                info!("Repository initialized");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Repository init failed, rolling back");
                self.rollback(destination);
                Err(e)
            }
        }
    }

    /// Install then update dependencies with `manager`. No rollback.
    #[instrument(skip_all, fields(destination = %destination.display(), %manager))]
    pub fn install_dependencies(
        &self,
        destination: &Path,
        manager: PackageManager,
    ) -> CraneResult<()> {
        if !self.installer.is_available(manager) {
            return Err(ApplicationError::ToolNotFound {
                name: manager.binary().to_string(),
            }
            .into());
        }
        self.installer.install(destination, manager)?;
        self.installer.update(destination, manager)?;
        info!("Dependencies installed");
        Ok(())
    }

    /// Best-effort rollback on failure.
    fn rollback(&self, root: &Path) {
        if let Err(e) = self.filesystem.remove_dir_all(root) {
            warn!(
                error = %e,
                path = %root.display(),
                "Rollback failed"
            );
        } else {
            info!("Rollback successful");
        }
    }
}
