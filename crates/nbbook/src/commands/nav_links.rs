//! Navigation links command implementation

use anyhow::{bail, Result};
use colored::*;
use nbbook::config::Config;
use nbbook::navigation::{link_notebooks, ChapterEntry, LinkOutcome};
use nbbook::theme;
use std::path::Path;

/// Add previous/contents/next navigation to every notebook under `root`
pub fn nav_links(root: &Path, config: &Config, dry_run: bool) -> Result<()> {
    let report = link_notebooks(root, config, dry_run)?;
    println!("Found {} notebooks\n", report.outcomes.len());

    for outcome in &report.outcomes {
        print_outcome(outcome);
    }

    let failures: Vec<_> = report.failures().collect();
    if !failures.is_empty() {
        println!("\n{}", "Failed:".red().bold());
        for outcome in &failures {
            if let Some(err) = &outcome.error {
                println!(
                    "  {} {}/{}: {:#}",
                    theme::error_symbol().red(),
                    outcome.entry.folder,
                    outcome.entry.file,
                    err
                );
            }
        }
        bail!("{} of {} notebooks could not be updated", failures.len(), report.outcomes.len());
    }

    if dry_run {
        println!("\n{} Dry run: no notebooks were written", theme::info_symbol().cyan());
    } else {
        println!(
            "\n{} Updated {} notebooks with cross-folder navigation",
            theme::success_symbol().green(),
            report.updated()
        );
    }

    Ok(())
}

fn print_outcome(outcome: &LinkOutcome) {
    let symbol = if outcome.error.is_some() {
        theme::error_symbol().red()
    } else {
        theme::success_symbol().green()
    };
    println!(
        "{} Ch {}: {}/{}",
        symbol,
        theme::chapter_number(outcome.entry.number),
        outcome.entry.folder,
        outcome.entry.file
    );

    let neighbour = |entry: &ChapterEntry| match entry.number {
        Some(n) => n.to_string(),
        None => entry.file.clone(),
    };
    if let Some(prev) = &outcome.previous {
        println!("           ← Ch {}", neighbour(prev));
    }
    if let Some(next) = &outcome.next {
        println!("           → Ch {}", neighbour(next));
    }
}
