//! Rewrite chapter headings in TOC documents into links to their notebooks

use crate::config::Config;
use crate::errors::BookError;
use crate::heading::{classify, Heading, ScanState};
use crate::layout::ChapterIndex;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One rewritten line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocChange {
    /// 1-based line number
    pub line: usize,
    pub chapter: u32,
    /// Label of the enclosing part, if any
    pub part: Option<String>,
    pub before: String,
    pub after: String,
}

/// A TOC document after rewriting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocRewrite {
    pub content: String,
    pub changes: Vec<TocChange>,
}

impl TocRewrite {
    pub fn changed(&self) -> bool {
        !self.changes.is_empty()
    }
}

/// Split a raw line into its text and its line ending (`\n`, `\r\n` or nothing)
fn split_line_ending(raw: &str) -> (&str, &str) {
    if let Some(body) = raw.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = raw.strip_suffix('\n') {
        (body, "\n")
    } else {
        (raw, "")
    }
}

/// Replacement for a chapter heading line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewritten {
    pub chapter: u32,
    /// New line, including the original line ending
    pub line: String,
}

/// Rewrite one raw line (including its line ending)
///
/// Returns the next scan state and the replacement when it differs from the
/// input byte for byte.
pub fn rewrite_line(
    state: ScanState,
    raw: &str,
    index: &ChapterIndex,
) -> (ScanState, Option<Rewritten>) {
    let (body, ending) = split_line_ending(raw);
    let Some(heading) = classify(body) else {
        return (state, None);
    };

    let replacement = match &heading {
        Heading::Part(_) => None,
        Heading::Chapter(chapter) => index
            .link_for(&chapter.digits)
            .map(|target| Rewritten {
                chapter: chapter.number,
                line: format!("{}{}", chapter.linked_form(target), ending),
            })
            .filter(|rewritten| rewritten.line != raw),
    };

    (state.advance(&heading), replacement)
}

/// Rewrite every chapter heading of `content` that has a notebook in `index`
pub fn rewrite_toc(content: &str, index: &ChapterIndex) -> TocRewrite {
    let mut state = ScanState::default();
    let mut output = String::with_capacity(content.len());
    let mut changes = Vec::new();

    for (idx, raw) in content.split_inclusive('\n').enumerate() {
        let (next, replacement) = rewrite_line(state, raw, index);
        state = next;

        match replacement {
            Some(Rewritten { chapter, line }) => {
                changes.push(TocChange {
                    line: idx + 1,
                    chapter,
                    part: state.current_part().map(|p| p.label()),
                    before: split_line_ending(raw).0.to_string(),
                    after: split_line_ending(&line).0.to_string(),
                });
                output.push_str(&line);
            }
            None => output.push_str(raw),
        }
    }

    TocRewrite { content: output, changes }
}

/// Rewrite the TOC document at `toc_path` against the notebooks next to it
///
/// The file is only written when something changed and `dry_run` is off.
pub fn update_toc_file(toc_path: &Path, config: &Config, dry_run: bool) -> Result<TocRewrite> {
    let content = fs::read_to_string(toc_path)
        .with_context(|| format!("Failed to read {}", toc_path.display()))?;

    let book_dir =
        toc_path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let index = ChapterIndex::scan(book_dir, config)
        .with_context(|| format!("Failed to index notebooks in {}", book_dir.display()))?;

    let rewrite = rewrite_toc(&content, &index);
    debug!(toc = %toc_path.display(), changes = rewrite.changes.len(), "rewrote TOC");

    if rewrite.changed() && !dry_run {
        fs::write(toc_path, &rewrite.content)
            .with_context(|| format!("Failed to write {}", toc_path.display()))?;
    }

    Ok(rewrite)
}

/// The TOC document of `folder`, or [`BookError::TocNotFound`]
pub fn toc_in(folder: &Path, config: &Config) -> Result<PathBuf> {
    let toc_path = config.toc_path(folder);
    if toc_path.is_file() {
        Ok(toc_path)
    } else {
        Err(BookError::TocNotFound(toc_path).into())
    }
}
