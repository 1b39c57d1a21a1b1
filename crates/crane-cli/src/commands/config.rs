//! `crane config`: read and write configuration values.

use std::path::Path;

use crate::{
    cli::{ConfigCommands, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Every key `get` and `set` understand.
const KEYS: [&str; 6] = [
    "templates.root",
    "defaults.kind",
    "defaults.package_manager",
    "curation.missing_version",
    "output.no_color",
    "output.format",
];

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.print(&format!("{key} = {value}"))?;
        }

        ConfigCommands::Set { key, value } => {
            let path = global.config.unwrap_or_else(AppConfig::config_path);
            let current = read_existing(&path)?;
            let updated = set_config_value(&current, &key, &value)?;

            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).with_cli_context(|| {
                    format!("Failed to create config directory '{}'", parent.display())
                })?;
            }
            std::fs::write(&path, updated)
                .with_cli_context(|| format!("Failed to write config to '{}'", path.display()))?;
            output.success(&format!("{key} = {value} ({})", path.display()))?;
        }

        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            output.print(&config.to_toml()?)?;
        }

        ConfigCommands::Path => {
            output.print(&AppConfig::config_path().display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn unknown_key(key: &str) -> CliError {
    CliError::ConfigError {
        message: format!("Unknown config key: '{key}' (known: {})", KEYS.join(", ")),
        source: None,
    }
}

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    let value = match key {
        "templates.root" => config
            .templates
            .root
            .as_ref()
            .map(|p| p.display().to_string()),
        "defaults.kind" => config.defaults.kind.map(|k| k.to_string()),
        "defaults.package_manager" => config.defaults.package_manager.map(|m| m.to_string()),
        "curation.missing_version" => Some(config.curation.missing_version.as_str().to_owned()),
        "output.no_color" => Some(config.output.no_color.to_string()),
        "output.format" => Some(format!("{:?}", config.output.format).to_lowercase()),
        _ => return Err(unknown_key(key)),
    };
    Ok(value.unwrap_or_else(|| "(unset)".to_owned()))
}

fn read_existing(path: &Path) -> CliResult<String> {
    if !path.exists() {
        return Ok(String::new());
    }
    std::fs::read_to_string(path)
        .with_cli_context(|| format!("Failed to read config from '{}'", path.display()))
}

/// Set `key` in the TOML document `text`, returning the new document.
///
/// The result must still load as an [`AppConfig`], so a bad enum value is
/// rejected before anything is written.
fn set_config_value(text: &str, key: &str, value: &str) -> CliResult<String> {
    if !KEYS.contains(&key) {
        return Err(unknown_key(key));
    }
    let Some((section, field)) = key.split_once('.') else {
        return Err(unknown_key(key));
    };

    let mut table: toml::Table = toml::from_str(text).map_err(|e| CliError::ConfigError {
        message: format!("Existing config is not valid TOML: {e}"),
        source: Some(Box::new(e)),
    })?;

    let entry = table
        .entry(section)
        .or_insert(toml::Value::Table(toml::Table::new()));
    let Some(section_table) = entry.as_table_mut() else {
        return Err(CliError::ConfigError {
            message: format!("'{section}' is not a table"),
            source: None,
        });
    };

    let parsed = match value {
        "true" => toml::Value::Boolean(true),
        "false" => toml::Value::Boolean(false),
        other => toml::Value::String(other.to_owned()),
    };
    section_table.insert(field.to_owned(), parsed);

    let updated = toml::to_string_pretty(&table).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })?;
    AppConfig::from_toml(&updated)?;
    Ok(updated)
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crane_core::domain::{MissingVersionPolicy, ProjectKind};

    #[test]
    fn get_known_key() {
        let cfg = AppConfig::default();
        assert_eq!(
            get_config_value(&cfg, "curation.missing_version").unwrap(),
            "omit"
        );
        assert_eq!(get_config_value(&cfg, "defaults.kind").unwrap(), "(unset)");
    }

    #[test]
    fn get_unknown_key_is_error() {
        let cfg = AppConfig::default();
        assert!(matches!(
            get_config_value(&cfg, "does.not.exist"),
            Err(CliError::ConfigError { .. })
        ));
    }

    #[test]
    fn get_no_color_default() {
        let cfg = AppConfig::default();
        assert_eq!(get_config_value(&cfg, "output.no_color").unwrap(), "false");
        assert_eq!(get_config_value(&cfg, "output.format").unwrap(), "auto");
    }

    #[test]
    fn set_into_an_empty_file() {
        let updated = set_config_value("", "defaults.kind", "monorepo-app").unwrap();
        let cfg = AppConfig::from_toml(&updated).unwrap();
        assert_eq!(cfg.defaults.kind, Some(ProjectKind::MonorepoApp));
    }

    #[test]
    fn set_keeps_other_values() {
        let existing = "[curation]\nmissing_version = \"fail\"\n";
        let updated = set_config_value(existing, "output.no_color", "true").unwrap();
        let cfg = AppConfig::from_toml(&updated).unwrap();
        assert!(cfg.output.no_color);
        assert_eq!(cfg.curation.missing_version, MissingVersionPolicy::Fail);
    }

    #[test]
    fn set_rejects_invalid_values() {
        assert!(set_config_value("", "curation.missing_version", "sometimes").is_err());
        assert!(set_config_value("", "defaults.lang", "rust").is_err());
    }
}
