//! Scaffold command implementation

use anyhow::Result;
use colored::*;
use nbbook::config::Config;
use nbbook::errors::{print_warning, BookError};
use nbbook::scaffold::{build_tree, ScaffoldStep, StepOutcome, StepStatus};
use nbbook::theme;
use std::path::Path;

/// Create the part folders and chapter notebooks listed in `<folder>/TOC.md`
pub fn scaffold(folder: &Path, config: &Config, dry_run: bool) -> Result<()> {
    let outcomes = match build_tree(folder, config, dry_run) {
        Ok(outcomes) => outcomes,
        Err(e) => {
            if let Some(BookError::TocNotFound(_)) = e.downcast_ref::<BookError>() {
                println!("{} not found in {}.", config.toc_filename, folder.display());
                return Ok(());
            }
            return Err(e);
        }
    };

    for outcome in &outcomes {
        report(outcome);
    }

    let created = outcomes
        .iter()
        .filter(|o| matches!(o.status, StepStatus::Created | StepStatus::WouldCreate))
        .count();
    let verb = if dry_run { "would be created" } else { "created" };
    println!("\n{} {} item(s) {}", theme::success_symbol().green(), created, verb);

    Ok(())
}

fn report(outcome: &StepOutcome) {
    let (what, label, name) = match &outcome.step {
        ScaffoldStep::Part(part) => ("part folder", "Part folder", part.folder_name()),
        ScaffoldStep::Chapter { .. } => (
            "notebook",
            "Notebook",
            outcome
                .path
                .as_deref()
                .and_then(Path::file_name)
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        ),
        ScaffoldStep::Orphan { line, chapter } => {
            print_warning(&format!(
                "Chapter {} on line {} appears before any part heading; skipped",
                chapter.number, line
            ));
            return;
        }
    };

    match outcome.status {
        StepStatus::Created => {
            println!("{} Created {}: {}", theme::success_symbol().green(), what, name)
        }
        StepStatus::WouldCreate => {
            println!(
                "{} Would create {}: {}",
                theme::info_symbol().cyan(),
                what,
                theme::info(&name)
            )
        }
        StepStatus::AlreadyExists => println!("  {} already exists: {}", label, name.dimmed()),
        StepStatus::Skipped => {}
    }
}
