//! On-disk layout of a book: numbered part folders holding chapter notebooks

use crate::config::Config;
use crate::errors::BookError;
use anyhow::{Context, Result};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::debug;
use walkdir::WalkDir;

static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+)").unwrap());
static NUMBERED_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+)\.").unwrap());

/// Characters escaped in link targets: everything but unreserved characters and `/`
const LINK_ESCAPE: &AsciiSet =
    &NON_ALPHANUMERIC.remove(b'_').remove(b'.').remove(b'-').remove(b'~').remove(b'/');

/// Leading integer of a file name, e.g. `12` for `12-extra.ipynb`
pub fn leading_number(name: &str) -> Option<u32> {
    LEADING_NUMBER.captures(name).and_then(|caps| caps[1].parse().ok())
}

/// Digits before the first period, as written, e.g. `03` for `03. loops.ipynb`
pub fn numbered_prefix(name: &str) -> Option<&str> {
    NUMBERED_PREFIX.captures(name).and_then(|caps| caps.get(1)).map(|m| m.as_str())
}

/// Whether a directory name looks like a part folder (`<integer>.`)
pub fn is_part_folder_name(name: &str) -> bool {
    NUMBERED_PREFIX.is_match(name)
}

/// Percent-encode a relative link target, keeping `/` separators
pub fn encode_link(path: &str) -> String {
    utf8_percent_encode(path, LINK_ESCAPE).to_string()
}

fn entries(dir: &Path) -> Result<Vec<walkdir::DirEntry>> {
    if !dir.is_dir() {
        return Err(BookError::NotADirectory(dir.to_path_buf()).into());
    }

    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .map(|entry| entry.with_context(|| format!("Failed to list {}", dir.display())))
        .collect()
}

/// Immediate part folders of `root`, sorted by name
pub fn part_folders(root: &Path) -> Result<Vec<PathBuf>> {
    let mut folders = Vec::new();
    for entry in entries(root)? {
        let is_part = entry.file_type().is_dir()
            && is_part_folder_name(&entry.file_name().to_string_lossy());
        if is_part {
            folders.push(entry.into_path());
        } else {
            debug!(path = %entry.path().display(), "skipping non-part entry");
        }
    }
    Ok(folders)
}

/// Notebook file names directly inside `folder`, sorted
pub fn notebooks_in(folder: &Path, config: &Config) -> Result<Vec<String>> {
    Ok(entries(folder)?
        .into_iter()
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| config.is_notebook(name))
        .collect())
}

/// Chapter number → link target for every notebook under a book folder
///
/// Chapter numbers are compared as written, so `01. intro.ipynb` answers
/// `Chapter 01` but not `Chapter 1`. When two notebooks share a chapter number
/// the first one in folder/file name order wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChapterIndex {
    links: BTreeMap<String, String>,
}

impl ChapterIndex {
    /// Index the notebooks in the part folders directly under `book_dir`
    pub fn scan(book_dir: &Path, config: &Config) -> Result<Self> {
        let mut index = Self::default();
        for folder in part_folders(book_dir)? {
            let folder_name = folder.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
            for notebook in notebooks_in(&folder, config)? {
                if let Some(digits) = numbered_prefix(&notebook) {
                    index.insert(digits, &format!("{}/{}", folder_name, notebook));
                }
            }
        }
        debug!(dir = %book_dir.display(), chapters = index.len(), "indexed notebooks");
        Ok(index)
    }

    /// Record a notebook at `relative_path`, unless the chapter is already known
    pub fn insert(&mut self, chapter: &str, relative_path: &str) {
        self.links.entry(chapter.to_string()).or_insert_with(|| encode_link(relative_path));
    }

    /// Encoded link target for the chapter numbered `chapter`
    pub fn link_for(&self, chapter: &str) -> Option<&str> {
        self.links.get(chapter).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// TOC documents in the non-hidden immediate subdirectories of `root`, sorted
pub fn discover_tocs(root: &Path, config: &Config) -> Result<Vec<PathBuf>> {
    let pattern = Path::new(&glob::Pattern::escape(&root.to_string_lossy()))
        .join("*")
        .join(glob::Pattern::escape(&config.toc_filename));
    let pattern = pattern.to_string_lossy();

    let mut tocs = Vec::new();
    for path in glob::glob(&pattern).context("Invalid TOC search pattern")? {
        let path = path.context("Failed to read TOC candidate")?;
        let hidden = path
            .parent()
            .and_then(Path::file_name)
            .is_some_and(|name| name.to_string_lossy().starts_with('.'));
        if !hidden && path.is_file() {
            tocs.push(path);
        }
    }
    tocs.sort();
    Ok(tocs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "{}").unwrap();
    }

    #[test]
    fn test_leading_number() {
        assert_eq!(leading_number("12. traits.ipynb"), Some(12));
        assert_eq!(leading_number("3-extra.ipynb"), Some(3));
        assert_eq!(leading_number("appendix.ipynb"), None);
    }

    #[test]
    fn test_numbered_prefix_requires_period() {
        assert_eq!(numbered_prefix("3. loops.ipynb"), Some("3"));
        assert_eq!(numbered_prefix("03. loops.ipynb"), Some("03"));
        assert_eq!(numbered_prefix("3-loops.ipynb"), None);
        assert!(is_part_folder_name("1. basics"));
        assert!(!is_part_folder_name("basics"));
        assert!(!is_part_folder_name("1 basics"));
    }

    #[test]
    fn test_encode_link() {
        assert_eq!(encode_link("1. basics/1. intro.ipynb"), "1.%20basics/1.%20intro.ipynb");
        assert_eq!(encode_link("2. a&b/3. c#d.ipynb"), "2.%20a%26b/3.%20c%23d.ipynb");
        assert_eq!(encode_link("x_y-z~w/é.ipynb"), "x_y-z~w/%C3%A9.ipynb");
    }

    #[test]
    fn test_part_folders_and_notebooks() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(&root.join("2. control/3. loops.ipynb"));
        touch(&root.join("1. basics/2. variables.ipynb"));
        touch(&root.join("1. basics/1. intro.ipynb"));
        touch(&root.join("1. basics/notes.md"));
        touch(&root.join("drafts/9. scratch.ipynb"));
        touch(&root.join("3. loose.ipynb"));

        let folders = part_folders(root).unwrap();
        let names: Vec<_> =
            folders.iter().map(|f| f.file_name().unwrap().to_string_lossy().into_owned()).collect();
        assert_eq!(names, vec!["1. basics", "2. control"]);

        let notebooks = notebooks_in(&folders[0], &Config::default()).unwrap();
        assert_eq!(notebooks, vec!["1. intro.ipynb", "2. variables.ipynb"]);
    }

    #[test]
    fn test_part_folders_missing_root() {
        let temp = TempDir::new().unwrap();
        let err = part_folders(&temp.path().join("missing")).unwrap_err();
        assert!(matches!(err.downcast_ref::<BookError>(), Some(BookError::NotADirectory(_))));
    }

    #[test]
    fn test_chapter_index_scan() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(&root.join("1. basics/1. intro.ipynb"));
        touch(&root.join("1. basics/2. variables.ipynb"));
        touch(&root.join("2. more/2. duplicate.ipynb"));
        touch(&root.join("2. more/appendix.ipynb"));

        let index = ChapterIndex::scan(root, &Config::default()).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.link_for("1"), Some("1.%20basics/1.%20intro.ipynb"));
        assert_eq!(index.link_for("2"), Some("1.%20basics/2.%20variables.ipynb"));
        assert_eq!(index.link_for("3"), None);
    }

    #[test]
    fn test_chapter_index_compares_digits_as_written() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("1. basics/01. intro.ipynb"));
        touch(&temp.path().join("1. basics/2. variables.ipynb"));

        let index = ChapterIndex::scan(temp.path(), &Config::default()).unwrap();
        assert_eq!(index.link_for("01"), Some("1.%20basics/01.%20intro.ipynb"));
        assert_eq!(index.link_for("1"), None);
        assert_eq!(index.link_for("02"), None);
    }

    #[test]
    fn test_discover_tocs_skips_hidden_and_missing() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("rust")).unwrap();
        fs::write(root.join("rust/TOC.md"), "").unwrap();
        fs::create_dir_all(root.join("python")).unwrap();
        fs::write(root.join("python/TOC.md"), "").unwrap();
        fs::create_dir_all(root.join(".cache")).unwrap();
        fs::write(root.join(".cache/TOC.md"), "").unwrap();
        fs::create_dir_all(root.join("empty")).unwrap();

        let tocs = discover_tocs(root, &Config::default()).unwrap();
        assert_eq!(tocs, vec![root.join("python/TOC.md"), root.join("rust/TOC.md")]);
    }
}
