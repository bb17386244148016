//! Build part folders and chapter notebooks from a TOC document

use crate::config::Config;
use crate::errors::BookError;
use crate::heading::{classify, ChapterHeading, Heading, PartHeading, ScanState};
use crate::notebook::Notebook;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One thing the TOC asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScaffoldStep {
    /// A part folder
    Part(PartHeading),
    /// A chapter notebook inside the current part's folder
    Chapter { part: PartHeading, chapter: ChapterHeading },
    /// A chapter listed before any part; it has no folder to go in
    Orphan { line: usize, chapter: ChapterHeading },
}

/// Advance the scan by one line
pub fn scaffold_step(
    state: ScanState,
    line_number: usize,
    line: &str,
) -> (ScanState, Option<ScaffoldStep>) {
    let Some(heading) = classify(line) else {
        return (state, None);
    };

    let step = match (&heading, state.current_part()) {
        (Heading::Part(part), _) => ScaffoldStep::Part(part.clone()),
        (Heading::Chapter(chapter), Some(part)) => {
            ScaffoldStep::Chapter { part: part.clone(), chapter: chapter.clone() }
        }
        (Heading::Chapter(chapter), None) => {
            ScaffoldStep::Orphan { line: line_number, chapter: chapter.clone() }
        }
    };

    (state.advance(&heading), Some(step))
}

/// Every step requested by a TOC document, in document order
pub fn plan(toc: &str) -> Vec<ScaffoldStep> {
    toc.lines()
        .enumerate()
        .scan(ScanState::default(), |state, (idx, line)| {
            let (next, step) = scaffold_step(std::mem::take(state), idx + 1, line);
            *state = next;
            Some(step)
        })
        .flatten()
        .collect()
}

/// What happened to a step on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Created,
    AlreadyExists,
    WouldCreate,
    Skipped,
}

/// A step together with the path it concerns and what was done
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub step: ScaffoldStep,
    pub path: Option<PathBuf>,
    pub status: StepStatus,
}

fn ensure_path(
    path: &Path,
    dry_run: bool,
    create: impl FnOnce(&Path) -> Result<()>,
) -> Result<StepStatus> {
    if path.exists() {
        Ok(StepStatus::AlreadyExists)
    } else if dry_run {
        Ok(StepStatus::WouldCreate)
    } else {
        create(path)?;
        Ok(StepStatus::Created)
    }
}

/// Apply one step under `root`
pub fn apply_step(
    root: &Path,
    step: ScaffoldStep,
    config: &Config,
    dry_run: bool,
) -> Result<StepOutcome> {
    let (path, status) = match &step {
        ScaffoldStep::Part(part) => {
            let path = root.join(part.folder_name());
            let status = ensure_path(&path, dry_run, |p| {
                fs::create_dir_all(p).with_context(|| format!("Failed to create {}", p.display()))
            })?;
            (Some(path), status)
        }
        ScaffoldStep::Chapter { part, chapter } => {
            let folder = root.join(part.folder_name());
            let path = folder.join(chapter.notebook_name(&config.notebook_extension));
            let status = ensure_path(&path, dry_run, |p| {
                // Normally created by the part step; a folder removed mid-run is recreated
                fs::create_dir_all(&folder)
                    .with_context(|| format!("Failed to create {}", folder.display()))?;
                Notebook::with_markdown(&chapter.title(), config.nbformat, config.nbformat_minor)
                    .save(p, config.json_indent)
            })?;
            (Some(path), status)
        }
        ScaffoldStep::Orphan { .. } => (None, StepStatus::Skipped),
    };

    debug!(?status, path = ?path, "scaffold step");
    Ok(StepOutcome { step, path, status })
}

/// Build the folder tree described by `<folder>/TOC.md`
///
/// Returns [`BookError::TocNotFound`] when the TOC document is missing.
pub fn build_tree(folder: &Path, config: &Config, dry_run: bool) -> Result<Vec<StepOutcome>> {
    let toc_path = config.toc_path(folder);
    if !toc_path.is_file() {
        return Err(BookError::TocNotFound(toc_path).into());
    }

    let toc = fs::read_to_string(&toc_path)
        .with_context(|| format!("Failed to read {}", toc_path.display()))?;

    plan(&toc).into_iter().map(|step| apply_step(folder, step, config, dry_run)).collect()
}
