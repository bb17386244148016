//! Previous / table-of-contents / next navigation between chapter notebooks

use crate::config::Config;
use crate::layout::{leading_number, notebooks_in, part_folders};
use crate::notebook::{Cell, Notebook};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A notebook located in a part folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterEntry {
    /// Leading integer of the file name; `None` sorts after every chapter
    pub number: Option<u32>,
    pub folder: String,
    pub file: String,
}

impl ChapterEntry {
    pub fn new(folder: &str, file: &str) -> Self {
        Self { number: leading_number(file), folder: folder.to_string(), file: file.to_string() }
    }

    pub fn path(&self, root: &Path) -> PathBuf {
        root.join(&self.folder).join(&self.file)
    }

    /// Link from this notebook's folder to `other`
    pub fn link_to(&self, other: &ChapterEntry) -> String {
        if self.folder == other.folder {
            other.file.clone()
        } else {
            format!("../{}/{}", other.folder, other.file)
        }
    }
}

/// Sort into reading order: chapter number, then folder name, then file name
pub fn sort_chapters(entries: &mut [ChapterEntry]) {
    entries.sort_by(|a, b| {
        (a.number.is_none(), a.number)
            .cmp(&(b.number.is_none(), b.number))
            .then_with(|| a.folder.cmp(&b.folder))
            .then_with(|| a.file.cmp(&b.file))
    });
}

/// Every notebook in the part folders of `root`, in reading order
pub fn collect_chapters(root: &Path, config: &Config) -> Result<Vec<ChapterEntry>> {
    let mut entries = Vec::new();
    for folder in part_folders(root)? {
        let folder_name = folder
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        for file in notebooks_in(&folder, config)? {
            entries.push(ChapterEntry::new(&folder_name, &file));
        }
    }
    sort_chapters(&mut entries);
    Ok(entries)
}

/// Links for one notebook; `None` renders as an inactive placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLinks {
    pub previous: Option<String>,
    pub toc: String,
    pub next: Option<String>,
}

impl NavLinks {
    /// Links for the entry at `idx` of an ordered chapter list
    pub fn for_index(entries: &[ChapterEntry], idx: usize, toc_filename: &str) -> Self {
        let current = &entries[idx];
        let previous = idx.checked_sub(1).and_then(|i| entries.get(i));
        let next = entries.get(idx + 1);

        Self {
            previous: previous.map(|p| current.link_to(p)),
            toc: format!("../{}", toc_filename),
            next: next.map(|n| current.link_to(n)),
        }
    }

    /// The navigation block as HTML, one element per line
    pub fn render(&self) -> String {
        let previous = match &self.previous {
            Some(href) => format!(
                "  <a href='{}' style='font-weight:bold; font-size:1.05em;'>&larr; Previous</a>",
                href
            ),
            None => "  <span style='color:gray; font-size:1.05em;'>Previous</span>".to_string(),
        };
        let next = match &self.next {
            Some(href) => format!(
                "  <a href='{}' style='font-weight:bold; font-size:1.05em;'>Next &rarr;</a>",
                href
            ),
            None => "  <span style='color:gray; font-size:1.05em;'>Next</span>".to_string(),
        };
        let toc = format!(
            "  <a href='{}' style='font-weight:bold; font-size:1.05em; text-align:center;'>Table of Contents</a>",
            self.toc
        );

        [
            "<div style='width:100%; display:flex; justify-content:space-between; align-items:center; margin: 1em 0;'>",
            previous.as_str(),
            toc.as_str(),
            next.as_str(),
            "</div>",
        ]
        .join("\n")
    }

    pub fn to_cell(&self) -> Cell {
        Cell::markdown(&self.render())
    }
}

/// Result of linking one notebook
#[derive(Debug)]
pub struct LinkOutcome {
    pub entry: ChapterEntry,
    pub previous: Option<ChapterEntry>,
    pub next: Option<ChapterEntry>,
    pub links: NavLinks,
    pub error: Option<anyhow::Error>,
}

/// Summary of a linking run
#[derive(Debug, Default)]
pub struct LinkReport {
    pub outcomes: Vec<LinkOutcome>,
}

impl LinkReport {
    pub fn failures(&self) -> impl Iterator<Item = &LinkOutcome> {
        self.outcomes.iter().filter(|o| o.error.is_some())
    }

    pub fn updated(&self) -> usize {
        self.outcomes.iter().filter(|o| o.error.is_none()).count()
    }
}

fn update_notebook(path: &Path, links: &NavLinks, config: &Config) -> Result<()> {
    let mut notebook = Notebook::load(path)?;
    notebook.set_navigation(links.to_cell());
    notebook.save(path, config.json_indent)
}

/// Inject navigation cells into every notebook under `root`
///
/// A notebook that cannot be read or parsed is recorded in the report and the
/// run continues with the next one. With `dry_run` nothing is written.
pub fn link_notebooks(root: &Path, config: &Config, dry_run: bool) -> Result<LinkReport> {
    let entries = collect_chapters(root, config)
        .with_context(|| format!("Failed to collect notebooks under {}", root.display()))?;
    debug!(root = %root.display(), count = entries.len(), "collected notebooks");

    let mut report = LinkReport::default();
    for (idx, entry) in entries.iter().enumerate() {
        let links = NavLinks::for_index(&entries, idx, &config.toc_filename);
        let error = if dry_run {
            None
        } else {
            update_notebook(&entry.path(root), &links, config).err()
        };
        if let Some(err) = &error {
            warn!(notebook = %entry.path(root).display(), error = %err, "failed to link notebook");
        }

        report.outcomes.push(LinkOutcome {
            entry: entry.clone(),
            previous: idx.checked_sub(1).map(|i| entries[i].clone()),
            next: entries.get(idx + 1).cloned(),
            links,
            error,
        });
    }

    Ok(report)
}
