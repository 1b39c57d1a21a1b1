//! Implementation of the `crane new` command.
//!
//! Responsibility: resolve every choice from flags, config and prompts into a
//! `ScaffoldRequest`, call the core scaffold service, and display results. No
//! rendering logic lives here.

use std::env;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crane_adapters::{CommandInstaller, GitCli, LocalFilesystem, template_root, versions};
use crane_core::{
    application::{Curation, ScaffoldRequest, ScaffoldService},
    domain::{
        AddOn, DependencyCatalog, ExistingMode, PackageManager, PackageName, ProjectKind,
        ReadmeSpec, RenderPlan,
    },
};

use crate::{
    cli::{NewArgs, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
    prompts::Prompter,
};

const DEFAULT_DIRECTORY: &str = "my-project";

/// Every decision `crane new` needs, after flags, config and prompts.
#[derive(Debug, Clone, PartialEq)]
struct Choices {
    directory: PathBuf,
    project_name: String,
    existing_mode: ExistingMode,
    package_name: PackageName,
    kind: ProjectKind,
    addons: Vec<AddOn>,
    git: bool,
    install: bool,
}

/// Execute the `crane new` command.
///
/// Dispatch sequence:
/// 1. Locate the template root and load the version pool
/// 2. Resolve directory, existing-directory mode, package name, kind, add-ons
/// 3. Early-exit with the plan if `--dry-run`
/// 4. Scaffold, then write the readme
/// 5. `git init` and dependency install when asked for
/// 6. Print next-steps guidance
#[instrument(skip_all)]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Templates first: nothing to ask about if they are missing.
    let explicit_root = args.templates.as_deref().or(config.templates_root());
    let root = template_root::discover(explicit_root)?;
    let pool = versions::load_pool(&LocalFilesystem::new(), &root)?;
    let policy = args
        .missing_version
        .unwrap_or(config.curation.missing_version);
    debug!(root = %root.display(), policy = policy.as_str(), "Templates located");

    let service = ScaffoldService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(GitCli::new()),
        Box::new(CommandInstaller::new()),
    )
    .with_curation(Curation::new(DependencyCatalog::builtin(), pool, policy));

    // 2. Resolve choices
    let prompter = Prompter::new(args.yes);
    let choices = resolve_choices(&args, &config, &service, &prompter)?;
    debug!(?choices, "Choices resolved");

    let destination = absolute(&choices.directory)?;
    let request = ScaffoldRequest::new(root, choices.kind, &destination)
        .with_package_name(choices.package_name.clone())
        .with_existing_mode(choices.existing_mode)
        .with_addons(choices.addons.iter().copied());

    // 3. Dry run: describe but do not write.
    if args.dry_run {
        let plan = service.plan(&request)?;
        return show_plan(&plan, &choices, &output);
    }

    // 4. Scaffold
    if choices.existing_mode == ExistingMode::Force {
        output.warning(&format!(
            "Deleting the content of {}",
            destination.display()
        ))?;
    }
    output.header(&format!(
        "Scaffolding {} '{}' in {}",
        choices.kind,
        choices.package_name,
        destination.display()
    ))?;
    info!(kind = %choices.kind, path = %destination.display(), "Scaffold started");

    let plan = service.scaffold(&request)?;
    output.success(&format!("Templates rendered ({})", plan.summary()))?;

    let manager = package_manager(&args, &config, choices.kind);
    let readme = ReadmeSpec::new(&choices.project_name, choices.kind, manager);
    if service.write_readme(&destination, &readme, choices.existing_mode)? {
        output.success("README.md generated")?;
    }

    // 5. Post-scaffold steps
    if choices.git {
        service.init_repository(&destination)?;
        output.success("Git repository initialized")?;
    }

    let mut installed = false;
    if choices.install {
        let spinner = output.spinner(&format!("Installing dependencies with {manager}..."));
        let result = service.install_dependencies(&destination, manager);
        spinner.finish_and_clear();
        match result {
            Ok(()) => {
                installed = true;
                output.success("Dependencies installed")?;
            }
            Err(e) => {
                warn!(error = %e, "Dependency install failed");
                output.warning(&format!("Dependency install failed: {e}"))?;
            }
        }
    }

    info!(kind = %choices.kind, "Scaffold completed");

    // 6. Success + next steps
    output.success("Scaffolding complete. Now run:")?;
    if !global.quiet {
        output.print("")?;
        for step in next_steps(&choices, manager, installed) {
            output.command(&step)?;
        }
        output.print("")?;
    }

    Ok(())
}

// ── Choice resolution ─────────────────────────────────────────────────────────

fn resolve_choices(
    args: &NewArgs,
    config: &AppConfig,
    service: &ScaffoldService,
    prompter: &Prompter,
) -> CliResult<Choices> {
    let directory = match &args.directory {
        Some(dir) => dir.clone(),
        None => PathBuf::from(prompter.directory(DEFAULT_DIRECTORY)?),
    };
    let project_name = project_name(&directory)?;

    let existing_mode = if service.can_skip_emptying(&directory)? {
        ExistingMode::Skip
    } else if args.force {
        ExistingMode::Force
    } else if args.inject {
        ExistingMode::Inject
    } else {
        prompter
            .existing_project(&directory)?
            .ok_or(CliError::Cancelled)?
    };

    let package_name = match &args.package_name {
        Some(name) => PackageName::new(name.clone())
            .map_err(|_| CliError::InvalidPackageName { name: name.clone() })?,
        None => prompter.package_name(&PackageName::suggest(&project_name))?,
    };

    let kind = match args.kind.resolve().or(config.defaults.kind) {
        Some(kind) => kind,
        None => prompter.kind(ProjectKind::Lib)?,
    };

    // Monorepo members inherit these from the workspace root.
    let member = kind.is_monorepo_member();
    let changesets = args.changesets
        || kind.is_monorepo()
        || (!member && prompter.confirm("Do you want to add Changesets?", false)?);
    let actions = args.actions
        || (!member && prompter.confirm("Do you want to add GitHub Actions?", false)?);
    let git = match args.git() {
        Some(git) => git,
        None => !member && prompter.confirm("Do you want to initialize git?", true)?,
    };
    let install = args.install
        || (!member && prompter.confirm("Do you want to install dependencies now?", false)?);

    let addons = [
        (changesets, AddOn::Changesets),
        (args.commitlint, AddOn::Commitlint),
        (actions, AddOn::Actions),
        (args.husky, AddOn::Husky),
    ]
    .into_iter()
    .filter_map(|(on, addon)| on.then_some(addon))
    .collect();

    Ok(Choices {
        directory,
        project_name,
        existing_mode,
        package_name,
        kind,
        addons,
        // An injected project already has its repository; a failed init would
        // roll back by deleting it.
        git: git && existing_mode != ExistingMode::Inject,
        install,
    })
}

/// The last path component, resolving `.` to the current directory's name.
fn project_name(directory: &Path) -> CliResult<String> {
    let resolved = absolute(directory)?;
    let name = directory
        .file_name()
        .or_else(|| resolved.file_name())
        .and_then(|n| n.to_str())
        .ok_or_else(|| CliError::InvalidInput {
            message: format!(
                "cannot derive a project name from '{}'",
                directory.display()
            ),
            source: None,
        })?;
    Ok(name.to_owned())
}

fn absolute(directory: &Path) -> CliResult<PathBuf> {
    if directory.is_absolute() {
        return Ok(directory.to_path_buf());
    }
    let cwd = env::current_dir().with_cli_context(|| "reading the current directory")?;
    Ok(if directory == Path::new(".") {
        cwd
    } else {
        cwd.join(directory)
    })
}

/// Monorepos always use pnpm. Otherwise config, then the invoking manager.
fn package_manager(args: &NewArgs, config: &AppConfig, kind: ProjectKind) -> PackageManager {
    match config.defaults.package_manager {
        Some(manager) if !kind.is_monorepo() => manager,
        _ => PackageManager::detect(args.user_agent.as_deref(), kind.is_monorepo()),
    }
}

fn next_steps(choices: &Choices, manager: PackageManager, installed: bool) -> Vec<String> {
    let mut steps = Vec::new();
    if choices.directory != Path::new(".") {
        steps.push(format!("cd {}", choices.directory.display()));
    }
    if !installed && !choices.kind.is_monorepo_member() {
        steps.push(manager.command("install", None));
    }
    steps.push(manager.command("lint", None));
    let script = if choices.kind.is_app() { "dev" } else { "build" };
    steps.push(manager.command(script, None));
    steps
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn show_plan(plan: &RenderPlan, choices: &Choices, out: &OutputManager) -> CliResult<()> {
    out.info(&format!(
        "Dry run: would scaffold {} '{}' in {}",
        choices.kind,
        choices.package_name,
        plan.root().display(),
    ))?;
    out.print(&format!("  Existing:  {}", choices.existing_mode))?;
    let addons: Vec<&str> = choices.addons.iter().map(AddOn::as_str).collect();
    out.print(&format!(
        "  Add-ons:   {}",
        if addons.is_empty() {
            "none".to_owned()
        } else {
            addons.join(", ")
        }
    ))?;
    out.print("")?;
    for action in plan.actions() {
        out.print(&format!("  {action}"))?;
    }
    out.print("")?;
    out.print(&format!("  {}", plan.summary()))?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
