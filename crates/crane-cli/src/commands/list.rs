//! Implementation of the `crane list` command.

use serde::Serialize;

use crane_core::domain::{AddOn, ProjectKind, RepositoryType};

use crate::{
    cli::{ListArgs, ListFormat, global::GlobalArgs},
    error::CliResult,
    output::OutputManager,
};

/// One row of `crane list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct Entry {
    name: &'static str,
    category: &'static str,
    description: &'static str,
    /// Template subtrees rendered for this entry, in order.
    templates: Vec<String>,
}

fn entries() -> Vec<Entry> {
    let kinds = ProjectKind::ALL.iter().map(|kind| Entry {
        name: kind.as_str(),
        category: "kind",
        description: kind.description(),
        templates: kind.subtrees().iter().map(ToString::to_string).collect(),
    });

    let addons = AddOn::ALL.iter().map(|addon| {
        let mut templates: Vec<String> = [RepositoryType::Standalone, RepositoryType::Monorepo]
            .into_iter()
            .map(|repo| addon.subtree(repo).to_string())
            .collect();
        templates.dedup();
        Entry {
            name: addon.as_str(),
            category: "add-on",
            description: addon.description(),
            templates,
        }
    });

    kinds.chain(addons).collect()
}

pub fn execute(args: ListArgs, _global: GlobalArgs, output: OutputManager) -> CliResult<()> {
    let entries = entries();

    match args.format {
        ListFormat::Table => {
            output.header("Project kinds:")?;
            for entry in entries.iter().filter(|e| e.category == "kind") {
                print_row(&output, entry)?;
            }
            output.print("")?;
            output.header("Add-ons:")?;
            for entry in entries.iter().filter(|e| e.category == "add-on") {
                print_row(&output, entry)?;
            }
        }

        ListFormat::Json => {
            // Not suppressed by --quiet.
            let value = serde_json::to_value(&entries).map_err(std::io::Error::other)?;
            output.json(&value)?;
        }

        ListFormat::List => {
            for entry in &entries {
                println!("{}", entry.name);
            }
        }

        ListFormat::Csv => {
            println!("name,category,templates");
            for entry in &entries {
                println!("{},{},{}", entry.name, entry.category, entry.templates.join(" "));
            }
        }
    }

    Ok(())
}

fn print_row(output: &OutputManager, entry: &Entry) -> CliResult<()> {
    output.print(&format!(
        "  {:<13} {} [{}]",
        entry.name,
        entry.description,
        entry.templates.join(", ")
    ))?;
    Ok(())
}
