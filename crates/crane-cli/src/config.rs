//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `CRANE_*` environment variables, `__` between sections
//!    (`CRANE_CURATION__MISSING_VERSION=wildcard`)
//! 3. The file given with `--config`
//! 4. `.crane.toml` in the current directory
//! 5. The user config file (see [`AppConfig::config_path`])
//! 6. Built-in defaults

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crane_core::domain::{MissingVersionPolicy, PackageManager, ProjectKind};

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};

/// Name of the per-project config file.
pub const LOCAL_CONFIG_FILE: &str = ".crane.toml";

const ENV_PREFIX: &str = "CRANE";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default values for new projects.
    pub defaults: Defaults,
    /// Template settings.
    pub templates: TemplateConfig,
    /// Dependency curation settings.
    pub curation: CurationConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ProjectKind>,
    /// Ignored for monorepos, which always use pnpm.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_manager: Option<PackageManager>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurationConfig {
    pub missing_version: MissingVersionPolicy,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: OutputFormat,
}

/// One config file layer: path and whether it must exist.
type FileLayer = (PathBuf, bool);

impl AppConfig {
    /// Load configuration from every layer.
    ///
    /// `config_file` is the path the user passed via `--config`; unlike the
    /// implicit locations it must exist.
    pub fn load(config_file: Option<&PathBuf>) -> CliResult<Self> {
        let mut files: Vec<FileLayer> = vec![
            (Self::config_path(), false),
            (PathBuf::from(LOCAL_CONFIG_FILE), false),
        ];
        if let Some(path) = config_file {
            files.push((path.clone(), true));
        }
        Self::from_layers(&files, Environment::with_prefix(ENV_PREFIX))
    }

    /// Layered loading with an explicit environment source.
    fn from_layers(files: &[FileLayer], env: Environment) -> CliResult<Self> {
        let mut builder = Config::builder();
        for (path, required) in files {
            builder = builder.add_source(
                File::from(path.as_path())
                    .format(FileFormat::Toml)
                    .required(*required),
            );
        }

        builder
            .add_source(
                env.prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(Config::try_deserialize::<AppConfig>)
            .map_err(|e| CliError::ConfigError {
                message: e.to_string(),
                source: Some(Box::new(e)),
            })
    }

    /// Parse one TOML document, without layering.
    pub fn from_toml(text: &str) -> CliResult<Self> {
        toml::from_str(text).map_err(|e| CliError::ConfigError {
            message: format!("Invalid configuration: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Serialize as the TOML `crane init` writes.
    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::ConfigError {
            message: format!("Failed to serialise config: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.crane.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "crane", "crane")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// Template root from config, if any.
    pub fn templates_root(&self) -> Option<&Path> {
        self.templates.root.as_deref()
    }
}
