use crate::domain::value_objects::{PackageManager, ProjectKind};

/// Inputs for the generated `README.md`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadmeSpec {
    pub project_name: String,
    pub kind: ProjectKind,
    pub package_manager: PackageManager,
}

impl ReadmeSpec {
    pub fn new(
        project_name: impl Into<String>,
        kind: ProjectKind,
        package_manager: PackageManager,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            kind,
            package_manager,
        }
    }
}

/// Render the readme. Output always ends with a newline.
pub fn generate_readme(spec: &ReadmeSpec) -> String {
    let cmd = |script: &str| spec.package_manager.command(script, None);
    let block = |title: &str, script: &str| format!("### {title}\n\n```sh\n{}\n```\n", cmd(script));

    let mut sections = vec![
        format!("# {}\n", spec.project_name),
        format!("## Project Setup\n\n```sh\n{}\n```\n", cmd("install")),
        block("Type-Check Compile and Minify for Production", "build"),
    ];
    if spec.kind.is_app() {
        sections.push(block("Compile and Hot-Reload for Development", "dev"));
    }
    sections.push(block("Run Tests with [Vitest](https://vitest.dev/)", "test"));
    sections.push(block("Lint with [Rome](https://rome.tools/)", "lint"));

    sections.join("\n")
}
