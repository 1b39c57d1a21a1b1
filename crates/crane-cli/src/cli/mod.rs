//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crane_core::domain::{MissingVersionPolicy, ProjectKind};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "crane",
    bin_name = "crane",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Scaffold TypeScript libraries, applications and monorepos",
    long_about = "Crane builds a TypeScript project from composable template \
                  directories, merging package.json files instead of \
                  overwriting them.",
    after_help = "EXAMPLES:\n\
        \x20 crane new my-lib --lib\n\
        \x20 crane new my-app --app --changesets --actions\n\
        \x20 crane new acme   --monorepo --husky\n\
        \x20 crane completions bash > /usr/share/bash-completion/completions/crane",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new project from the templates.
    #[command(
        visible_alias = "n",
        about = "Create a new project",
        after_help = "EXAMPLES:\n\
            \x20 crane new my-lib --lib --package-name @acme/my-lib\n\
            \x20 crane new . --app --inject\n\
            \x20 crane new apps/web --monorepo-app --yes\n\
            \x20 crane new my-lib --lib --dry-run"
    )]
    New(NewArgs),

    /// List project kinds and add-ons.
    #[command(
        visible_alias = "ls",
        about = "List project kinds and add-ons",
        after_help = "EXAMPLES:\n\
            \x20 crane list\n\
            \x20 crane list --format json"
    )]
    List(ListArgs),

    /// Initialise a Crane configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 crane init           # default location\n\
            \x20 crane init --local   # .crane.toml in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 crane completions bash > ~/.local/share/bash-completion/completions/crane\n\
            \x20 crane completions zsh  > ~/.zfunc/_crane\n\
            \x20 crane completions fish > ~/.config/fish/completions/crane.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the Crane configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 crane config get defaults.kind\n\
            \x20 crane config set curation.missing_version wildcard\n\
            \x20 crane config list"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `crane new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Target directory. Prompted for when omitted.
    #[arg(value_name = "DIR", help = "Project directory")]
    pub directory: Option<PathBuf>,

    #[command(flatten)]
    pub kind: KindArgs,

    /// `name` for the seed package.json. Defaults to one derived from DIR.
    #[arg(long = "package-name", value_name = "NAME", help = "package.json name")]
    pub package_name: Option<String>,

    /// Empty a non-empty target (a top-level `.git` survives).
    #[arg(long = "force", conflicts_with = "inject", help = "Overwrite existing directory")]
    pub force: bool,

    /// Merge into an existing project without seeding a new manifest.
    #[arg(long = "inject", help = "Inject the toolchain into an existing project")]
    pub inject: bool,

    #[arg(long = "changesets", help = "Add Changesets")]
    pub changesets: bool,

    #[arg(long = "commitlint", help = "Add commitlint")]
    pub commitlint: bool,

    #[arg(long = "actions", help = "Add GitHub Actions workflows")]
    pub actions: bool,

    #[arg(long = "husky", help = "Add husky git hooks")]
    pub husky: bool,

    #[arg(long = "git", overrides_with = "no_git", help = "Initialise a git repository")]
    pub git: bool,

    #[arg(long = "no-git", overrides_with = "git", help = "Skip git initialisation")]
    pub no_git: bool,

    #[arg(long = "install", help = "Install dependencies after scaffolding")]
    pub install: bool,

    /// Template root, overriding discovery and config.
    #[arg(long = "templates", value_name = "DIR", help = "Template root directory")]
    pub templates: Option<PathBuf>,

    /// What to do with a curated dependency missing from versions.json.
    #[arg(
        long = "missing-version",
        value_name = "POLICY",
        help = "Missing dependency version policy (omit, wildcard, fail)"
    )]
    pub missing_version: Option<MissingVersionPolicy>,

    /// Answer every prompt with its default.
    #[arg(short = 'y', long = "yes", help = "Skip prompts and use defaults")]
    pub yes: bool,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,

    /// Set by npm, yarn and pnpm when run through `create`.
    #[arg(long = "user-agent", env = "npm_config_user_agent", hide = true)]
    pub user_agent: Option<String>,
}

impl NewArgs {
    /// `--git` / `--no-git`, last one wins. `None` when neither was given.
    pub fn git(&self) -> Option<bool> {
        if self.git {
            Some(true)
        } else if self.no_git {
            Some(false)
        } else {
            None
        }
    }
}

/// Project kind selection. At most one may be given.
#[derive(Debug, Default, Args)]
#[group(id = "kind_selection", multiple = false)]
pub struct KindArgs {
    #[arg(long = "lib", help = "Create a library")]
    pub lib: bool,

    #[arg(long = "app", help = "Create an application")]
    pub app: bool,

    #[arg(long = "monorepo", help = "Create a pnpm + turbo monorepo")]
    pub monorepo: bool,

    #[arg(long = "monorepo-app", help = "Add an application to a monorepo")]
    pub monorepo_app: bool,

    #[arg(long = "monorepo-lib", help = "Add a library to a monorepo")]
    pub monorepo_lib: bool,

    #[arg(long = "kind", value_name = "KIND", help = "Project kind by name")]
    pub kind: Option<ProjectKind>,
}

impl KindArgs {
    pub fn resolve(&self) -> Option<ProjectKind> {
        [
            (self.lib, ProjectKind::Lib),
            (self.app, ProjectKind::App),
            (self.monorepo, ProjectKind::Monorepo),
            (self.monorepo_app, ProjectKind::MonorepoApp),
            (self.monorepo_lib, ProjectKind::MonorepoLib),
        ]
        .into_iter()
        .find_map(|(on, kind)| on.then_some(kind))
        .or(self.kind)
    }
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `crane list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `crane init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.crane.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `crane completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `crane config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.kind`.
        key: String,
    },
    /// Set a configuration key in the default config file.
    Set {
        /// Dotted key path.
        key: String,
        /// New value.
        value: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the default configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
