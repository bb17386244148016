//! Minimal notebook (nbformat) model
//!
//! Notebooks and cells are kept as their raw JSON objects with typed accessors
//! for the keys the tools use. Every other key, at notebook or cell level, is
//! carried through untouched and in its original position so a rewrite only
//! changes what the tools actually touch.

use crate::constants::NAV_MARKER;
use crate::errors::BookError;
use anyhow::{Context, Result};
use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// A notebook document
///
/// Always holds a `cells` array; `parse` rejects documents without one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Notebook(Map<String, Value>);

/// One notebook cell, kept as its raw JSON object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cell(Map<String, Value>);

fn source_of(cell: &Map<String, Value>) -> String {
    match cell.get("source") {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Array(lines)) => lines.iter().filter_map(Value::as_str).collect(),
        _ => String::new(),
    }
}

fn is_navigation_cell(cell: &Value) -> bool {
    cell.as_object().is_some_and(|cell| source_of(cell).contains(NAV_MARKER))
}

impl Cell {
    /// New markdown cell with empty metadata
    pub fn markdown(text: &str) -> Self {
        let mut map = Map::new();
        map.insert("cell_type".to_string(), Value::from("markdown"));
        map.insert("metadata".to_string(), Value::Object(Map::new()));
        map.insert("source".to_string(), Value::from(source_lines(text)));
        Cell(map)
    }

    pub fn cell_type(&self) -> Option<&str> {
        self.0.get("cell_type").and_then(Value::as_str)
    }

    /// The cell source joined into one string
    ///
    /// nbformat allows either a list of lines or a single string.
    pub fn source_text(&self) -> String {
        source_of(&self.0)
    }

    /// Whether this cell is a navigation block injected earlier
    pub fn is_navigation(&self) -> bool {
        self.source_text().contains(NAV_MARKER)
    }
}

impl From<Cell> for Value {
    fn from(cell: Cell) -> Self {
        Value::Object(cell.0)
    }
}

/// Split text into nbformat source lines: every line but the last keeps its `\n`
pub fn source_lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(str::to_string).collect()
}

impl Notebook {
    /// A new notebook holding a single markdown cell
    pub fn with_markdown(text: &str, nbformat: u32, nbformat_minor: u32) -> Self {
        let mut map = Map::new();
        map.insert("cells".to_string(), Value::Array(vec![Cell::markdown(text).into()]));
        map.insert("metadata".to_string(), Value::Object(Map::new()));
        map.insert("nbformat".to_string(), Value::from(nbformat));
        map.insert("nbformat_minor".to_string(), Value::from(nbformat_minor));
        Notebook(map)
    }

    /// Parse notebook JSON; `path` only names the file in errors
    pub fn parse(content: &str, path: &Path) -> Result<Self, BookError> {
        let invalid = |source: serde_json::Error| BookError::InvalidNotebook {
            path: path.to_path_buf(),
            source,
        };

        let map: Map<String, Value> = serde_json::from_str(content).map_err(invalid)?;
        if !map.get("cells").is_some_and(Value::is_array) {
            return Err(invalid(serde_json::Error::custom("missing `cells` array")));
        }
        Ok(Notebook(map))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Self::parse(&content, path)?)
    }

    /// The cells, in order
    pub fn cells(&self) -> Vec<Cell> {
        self.0
            .get("cells")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|cell| cell.as_object().cloned().map(Cell))
            .collect()
    }

    pub fn nbformat(&self) -> Option<u64> {
        self.0.get("nbformat").and_then(Value::as_u64)
    }

    pub fn nbformat_minor(&self) -> Option<u64> {
        self.0.get("nbformat_minor").and_then(Value::as_u64)
    }

    /// Serialize with `indent` spaces per level and a trailing newline
    pub fn to_json(&self, indent: usize) -> Result<String> {
        let indent = " ".repeat(indent);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser).context("Failed to serialize notebook")?;
        buf.push(b'\n');
        Ok(String::from_utf8(buf)?)
    }

    pub fn save(&self, path: &Path, indent: usize) -> Result<()> {
        fs::write(path, self.to_json(indent)?)
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Replace a trailing navigation cell, or append one if there is none
    pub fn set_navigation(&mut self, cell: Cell) {
        if let Some(cells) = self.0.get_mut("cells").and_then(Value::as_array_mut) {
            if cells.last().is_some_and(is_navigation_cell) {
                cells.pop();
            }
            cells.push(cell.into());
        }
    }
}
