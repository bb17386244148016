//! Authoring tools for a book of notebooks
//!
//! A book is a folder holding a `TOC.md` and one numbered folder per part
//! (`1. basics`), each with one numbered notebook per chapter
//! (`1. intro.ipynb`). The library turns the TOC into that tree, links the
//! notebooks to each other, and links the TOC headings to the notebooks.

pub mod config;
pub mod constants;
pub mod errors;
pub mod heading;
pub mod layout;
pub mod navigation;
pub mod normalize;
pub mod notebook;
pub mod scaffold;
pub mod theme;
pub mod toc;

pub use config::Config;
pub use errors::BookError;
pub use heading::{classify, ChapterHeading, Heading, PartHeading, ScanState};
pub use layout::ChapterIndex;
pub use notebook::{Cell, Notebook};

/// Re-export common error types
pub use anyhow::{Error, Result};
