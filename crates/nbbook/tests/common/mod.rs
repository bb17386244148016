// Test infrastructure and utilities for nbbook tests
#![allow(dead_code)]

use nbbook::notebook::Notebook;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Sample TOC using several heading styles
pub fn sample_toc() -> &'static str {
    "# Learning Python\n\n\
     Some introduction text.\n\n\
     ## Part I: Basics\n\n\
     ### Chapter 1: Intro\n\
     ### Chapter 2: Variables\n\n\
     ## **Part II: Control Flow (Essentials)**\n\n\
     ### **Chapter 3: Conditionals**\n\
     **Chapter 4: Loops [draft]**\n"
}

/// A book folder in a temporary directory
pub struct TestBook {
    pub root: TempDir,
}

impl TestBook {
    /// Create a new empty book folder
    pub fn new() -> std::io::Result<Self> {
        let root = TempDir::new()?;
        Ok(Self { root })
    }

    /// Get the root path
    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// Write the TOC document
    pub fn write_toc(&self, content: &str) -> std::io::Result<PathBuf> {
        let path = self.root.path().join("TOC.md");
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Read the TOC document
    pub fn read_toc(&self) -> std::io::Result<String> {
        fs::read_to_string(self.root.path().join("TOC.md"))
    }

    /// Create a notebook holding one markdown cell at `relative`
    pub fn create_notebook(&self, relative: &str, title: &str) -> anyhow::Result<PathBuf> {
        let path = self.root.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Notebook::with_markdown(title, 4, 2).save(&path, 1)?;
        Ok(path)
    }

    /// Load a notebook at `relative`
    pub fn load_notebook(&self, relative: &str) -> anyhow::Result<Notebook> {
        Notebook::load(&self.root.path().join(relative))
    }

    /// Read a file as text
    pub fn read_file(&self, relative: &str) -> std::io::Result<String> {
        fs::read_to_string(self.root.path().join(relative))
    }

    /// Check if a path exists
    pub fn exists(&self, relative: &str) -> bool {
        self.root.path().join(relative).exists()
    }
}

impl Default for TestBook {
    fn default() -> Self {
        Self::new().expect("Failed to create test book")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_creation() {
        let book = TestBook::new().unwrap();
        assert!(book.root_path().exists());
        assert!(!book.exists("TOC.md"));
    }

    #[test]
    fn test_write_and_read_toc() {
        let book = TestBook::new().unwrap();
        book.write_toc(sample_toc()).unwrap();
        assert_eq!(book.read_toc().unwrap(), sample_toc());
    }

    #[test]
    fn test_create_notebook() {
        let book = TestBook::new().unwrap();
        book.create_notebook("1. basics/1. intro.ipynb", "# Chapter 1: Intro").unwrap();

        let nb = book.load_notebook("1. basics/1. intro.ipynb").unwrap();
        assert_eq!(nb.cells().len(), 1);
        assert_eq!(nb.cells()[0].source_text(), "# Chapter 1: Intro");
    }
}
