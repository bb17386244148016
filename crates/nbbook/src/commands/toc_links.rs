//! TOC links command implementation

use anyhow::Result;
use colored::*;
use nbbook::config::Config;
use nbbook::errors::BookError;
use nbbook::layout::discover_tocs;
use nbbook::theme;
use nbbook::toc::{toc_in, update_toc_file, TocRewrite};
use std::path::Path;

/// Link the chapter headings of `<folder>/TOC.md`
pub fn toc_links(folder: &Path, config: &Config, dry_run: bool) -> Result<()> {
    let toc_path = match toc_in(folder, config) {
        Ok(path) => path,
        Err(e) => {
            if let Some(BookError::TocNotFound(_)) = e.downcast_ref::<BookError>() {
                println!(
                    "{} {} not found in {}",
                    "Error:".red().bold(),
                    config.toc_filename,
                    folder.display()
                );
                return Ok(());
            }
            return Err(e);
        }
    };

    let rewrite = update_toc_file(&toc_path, config, dry_run)?;
    report(&toc_path, &rewrite, dry_run);
    Ok(())
}

/// Link the chapter headings of every `*/TOC.md` under `root`
pub fn toc_links_all(root: &Path, config: &Config, dry_run: bool) -> Result<()> {
    let mut processed = 0;
    let mut total_changes = 0;

    for toc_path in discover_tocs(root, config)? {
        let rewrite = update_toc_file(&toc_path, config, dry_run)?;
        report(&toc_path, &rewrite, dry_run);
        processed += 1;
        total_changes += rewrite.changes.len();
    }

    println!(
        "\n{} Processed {} TOC files with {} total changes",
        theme::success_symbol().green(),
        processed,
        total_changes
    );
    Ok(())
}

fn report(toc_path: &Path, rewrite: &TocRewrite, dry_run: bool) {
    let folder = toc_path
        .parent()
        .and_then(Path::file_name)
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| ".".to_string());
    let toc_name = toc_path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();

    if !rewrite.changed() {
        println!("- No changes needed in {}/{}", folder, toc_name);
        return;
    }

    let verb = if dry_run { "Would update" } else { "Updated" };
    println!(
        "{} {} {} chapter links in {}/{}",
        theme::success_symbol().green(),
        verb,
        rewrite.changes.len(),
        folder,
        toc_name
    );

    if dry_run {
        for change in &rewrite.changes {
            let context = change.part.as_deref().map(|p| format!(" ({})", p)).unwrap_or_default();
            println!("  line {}{}:", change.line, context.dimmed());
            println!("    {} {}", "-".red(), change.before);
            println!("    {} {}", "+".green(), change.after);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn book(root: &Path, name: &str) {
        let dir = root.join(name);
        fs::create_dir_all(dir.join("1. basics")).unwrap();
        fs::write(dir.join("1. basics/1. intro.ipynb"), "{}").unwrap();
        fs::write(dir.join("TOC.md"), "## Part I: Basics\n### Chapter 1: Intro\n").unwrap();
    }

    #[test]
    fn test_toc_links_single_folder() {
        let temp = TempDir::new().unwrap();
        book(temp.path(), "rust");

        toc_links(&temp.path().join("rust"), &Config::default(), false).unwrap();
        let toc = fs::read_to_string(temp.path().join("rust/TOC.md")).unwrap();
        assert!(toc.contains("### [Chapter 1: Intro](1.%20basics/1.%20intro.ipynb)"));
    }

    #[test]
    fn test_toc_links_missing_toc_is_not_an_error() {
        let temp = TempDir::new().unwrap();
        assert!(toc_links(temp.path(), &Config::default(), false).is_ok());
    }

    #[test]
    fn test_toc_links_all() {
        let temp = TempDir::new().unwrap();
        book(temp.path(), "rust");
        book(temp.path(), "go");

        toc_links_all(temp.path(), &Config::default(), false).unwrap();
        for name in ["rust", "go"] {
            let toc = fs::read_to_string(temp.path().join(name).join("TOC.md")).unwrap();
            assert!(toc.contains("](1.%20basics/1.%20intro.ipynb)"), "{name}");
        }
    }

    #[test]
    fn test_toc_links_dry_run_leaves_file() {
        let temp = TempDir::new().unwrap();
        book(temp.path(), "rust");

        toc_links(&temp.path().join("rust"), &Config::default(), true).unwrap();
        let toc = fs::read_to_string(temp.path().join("rust/TOC.md")).unwrap();
        assert_eq!(toc, "## Part I: Basics\n### Chapter 1: Intro\n");
    }
}
