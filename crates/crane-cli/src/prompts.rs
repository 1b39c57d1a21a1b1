//! Interactive questions for `crane new`.
//!
//! Every question has a non-interactive answer. [`Prompter`] uses it when
//! `--yes` was given, when stdin or stderr is not a terminal, or when the
//! crate is built without the `interactive` feature.

use std::io::{self, IsTerminal};
use std::path::Path;

use crane_core::domain::{ExistingMode, PackageName, ProjectKind};

use crate::error::{CliError, CliResult};

pub struct Prompter {
    interactive: bool,
}

impl Prompter {
    pub fn new(assume_yes: bool) -> Self {
        let interactive = cfg!(feature = "interactive")
            && !assume_yes
            && io::stdin().is_terminal()
            && io::stderr().is_terminal();
        Self { interactive }
    }

    /// Always answers with the default.
    pub fn non_interactive() -> Self {
        Self { interactive: false }
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn directory(&self, default: &str) -> CliResult<String> {
        if !self.interactive {
            return Ok(default.to_owned());
        }
        ui::text("Project directory", default)
    }

    /// A valid package name, starting from `initial`.
    pub fn package_name(&self, initial: &str) -> CliResult<PackageName> {
        let name = if self.interactive {
            ui::package_name(initial)?
        } else {
            initial.to_owned()
        };
        PackageName::new(name.clone()).map_err(|_| CliError::InvalidPackageName { name })
    }

    pub fn kind(&self, default: ProjectKind) -> CliResult<ProjectKind> {
        if !self.interactive {
            return Ok(default);
        }
        let labels: Vec<String> = ProjectKind::ALL
            .iter()
            .map(|k| format!("{:<13} {}", k.as_str(), k.description()))
            .collect();
        let initial = ProjectKind::ALL
            .iter()
            .position(|k| *k == default)
            .unwrap_or(0);
        let index = ui::select("Select project type", &labels, initial)?;
        Ok(ProjectKind::ALL[index])
    }

    pub fn confirm(&self, question: &str, default: bool) -> CliResult<bool> {
        if !self.interactive {
            return Ok(default);
        }
        ui::confirm(question, default)
    }

    /// What to do with a non-empty `dir`. `None` means the user cancelled.
    ///
    /// Without a terminal there is nobody to ask, so this is an error.
    pub fn existing_project(&self, dir: &Path) -> CliResult<Option<ExistingMode>> {
        if !self.interactive {
            return Err(CliError::DirectoryNotEmpty {
                path: dir.to_path_buf(),
            });
        }

        let target = if dir == Path::new(".") {
            "Current directory".to_owned()
        } else {
            format!("Target directory \"{}\"", dir.display())
        };
        let choices = [
            (None, "Cancel: do nothing and quit"),
            (
                Some(ExistingMode::Inject),
                "Inject: merge the toolchain into the existing project",
            ),
            (
                Some(ExistingMode::Force),
                "Overwrite: delete existing files and create a new project",
            ),
        ];
        let labels: Vec<String> = choices.iter().map(|(_, l)| (*l).to_owned()).collect();
        let index = ui::select(
            &format!("{target} is not empty. What do you want to do?"),
            &labels,
            0,
        )?;
        Ok(choices[index].0)
    }
}

#[cfg(feature = "interactive")]
mod ui {
    use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};

    use crane_core::domain::PackageName;

    use crate::error::{CliError, CliResult};

    fn prompt_error(e: dialoguer::Error) -> CliError {
        CliError::Prompt {
            message: e.to_string(),
        }
    }

    pub(super) fn text(prompt: &str, default: &str) -> CliResult<String> {
        Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(default.to_owned())
            .validate_with(|v: &String| {
                if v.trim().is_empty() {
                    Err("A value is required")
                } else {
                    Ok(())
                }
            })
            .interact_text()
            .map(|v| v.trim().to_owned())
            .map_err(prompt_error)
    }

    pub(super) fn package_name(initial: &str) -> CliResult<String> {
        Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt("Package name")
            .with_initial_text(initial)
            .validate_with(|v: &String| {
                if PackageName::is_valid(v) {
                    Ok(())
                } else {
                    Err("Invalid package.json name")
                }
            })
            .interact_text()
            .map_err(prompt_error)
    }

    pub(super) fn select(prompt: &str, labels: &[String], initial: usize) -> CliResult<usize> {
        Select::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .items(labels)
            .default(initial)
            .interact_opt()
            .map_err(prompt_error)?
            .ok_or(CliError::Cancelled)
    }

    pub(super) fn confirm(question: &str, default: bool) -> CliResult<bool> {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(question)
            .default(default)
            .interact_opt()
            .map_err(prompt_error)?
            .ok_or(CliError::Cancelled)
    }
}

#[cfg(not(feature = "interactive"))]
mod ui {
    use crate::error::{CliError, CliResult};

    const FEATURE: &str = "interactive";

    pub(super) fn text(_prompt: &str, _default: &str) -> CliResult<String> {
        Err(CliError::FeatureNotAvailable { feature: FEATURE })
    }

    pub(super) fn package_name(_initial: &str) -> CliResult<String> {
        Err(CliError::FeatureNotAvailable { feature: FEATURE })
    }

    pub(super) fn select(_prompt: &str, _labels: &[String], _initial: usize) -> CliResult<usize> {
        Err(CliError::FeatureNotAvailable { feature: FEATURE })
    }

    pub(super) fn confirm(_question: &str, _default: bool) -> CliResult<bool> {
        Err(CliError::FeatureNotAvailable { feature: FEATURE })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_a_terminal() {
        let prompter = Prompter::non_interactive();
        assert!(!prompter.is_interactive());
        assert_eq!(prompter.directory("my-project").unwrap(), "my-project");
        assert_eq!(prompter.kind(ProjectKind::App).unwrap(), ProjectKind::App);
        assert!(prompter.confirm("Initialize git?", true).unwrap());
        assert!(!prompter.confirm("Add Changesets?", false).unwrap());
    }

    #[test]
    fn package_name_is_validated_without_a_terminal() {
        let prompter = Prompter::non_interactive();
        assert_eq!(
            prompter.package_name("@acme/web").unwrap().as_str(),
            "@acme/web"
        );
        assert!(matches!(
            prompter.package_name("Bad Name"),
            Err(CliError::InvalidPackageName { name }) if name == "Bad Name"
        ));
    }

    #[test]
    fn non_empty_directory_needs_a_decision() {
        let prompter = Prompter::non_interactive();
        assert!(matches!(
            prompter.existing_project(Path::new("demo")),
            Err(CliError::DirectoryNotEmpty { .. })
        ));
    }

    #[test]
    fn assume_yes_is_never_interactive() {
        assert!(!Prompter::new(true).is_interactive());
    }
}
