use crate::constants::{CONFIG_FILENAME, DEFAULT_NOTEBOOKS_DIR, NOTEBOOK_EXTENSION, TOC_FILENAME};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration with layered defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Name of the table-of-contents document inside a book folder
    pub toc_filename: String,

    /// Default root for `nav-links` when no directory is given
    pub notebooks_dir: PathBuf,

    /// Notebook file extension, without the dot
    pub notebook_extension: String,

    /// Indent width used when writing notebook JSON
    pub json_indent: usize,

    /// `nbformat` written into newly scaffolded notebooks
    pub nbformat: u32,

    /// `nbformat_minor` written into newly scaffolded notebooks
    pub nbformat_minor: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            toc_filename: TOC_FILENAME.to_string(),
            notebooks_dir: PathBuf::from(".").join(DEFAULT_NOTEBOOKS_DIR),
            notebook_extension: NOTEBOOK_EXTENSION.to_string(),
            json_indent: 1,
            nbformat: 4,
            nbformat_minor: 2,
        }
    }
}

impl Config {
    /// Load configuration from all sources with proper precedence
    ///
    /// An explicit path must exist. Without one, `nbb.toml` in the current
    /// directory is used when present.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = Config::default();

        let file_config = match explicit {
            Some(path) => {
                if !path.exists() {
                    bail!("Config file not found: {}", path.display());
                }
                Some(Self::load_from_file(path)?)
            }
            None => {
                let path = Path::new(CONFIG_FILENAME);
                if path.exists() {
                    Some(Self::load_from_file(path)?)
                } else {
                    None
                }
            }
        };

        if let Some(file_config) = file_config {
            config.merge(file_config);
        }

        Ok(config)
    }

    fn load_from_file(path: &Path) -> Result<PartialConfig> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config: PartialConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Ok(config)
    }

    /// Merge partial config into this one (partial takes precedence for specified fields)
    fn merge(&mut self, other: PartialConfig) {
        if let Some(val) = other.toc_filename {
            self.toc_filename = val;
        }
        if let Some(val) = other.notebooks_dir {
            self.notebooks_dir = val;
        }
        if let Some(val) = other.notebook_extension {
            self.notebook_extension = val.trim_start_matches('.').to_string();
        }
        if let Some(val) = other.json_indent {
            self.json_indent = val;
        }
        if let Some(val) = other.nbformat {
            self.nbformat = val;
        }
        if let Some(val) = other.nbformat_minor {
            self.nbformat_minor = val;
        }
    }

    /// Path of the TOC document inside `folder`
    pub fn toc_path(&self, folder: &Path) -> PathBuf {
        folder.join(&self.toc_filename)
    }

    /// Whether `file_name` names a notebook
    pub fn is_notebook(&self, file_name: &str) -> bool {
        file_name
            .strip_suffix(&self.notebook_extension)
            .is_some_and(|stem| stem.ends_with('.'))
    }
}

/// Partial configuration for deserializing from TOML with optional fields
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartialConfig {
    toc_filename: Option<String>,
    notebooks_dir: Option<PathBuf>,
    notebook_extension: Option<String>,
    json_indent: Option<usize>,
    nbformat: Option<u32>,
    nbformat_minor: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.toc_filename, "TOC.md");
        assert_eq!(config.notebooks_dir, PathBuf::from("./python"));
        assert_eq!(config.notebook_extension, "ipynb");
        assert_eq!(config.json_indent, 1);
        assert_eq!((config.nbformat, config.nbformat_minor), (4, 2));
    }

    #[test]
    fn test_load_from_explicit_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.toml");
        fs::write(
            &path,
            r#"
toc_filename = "CONTENTS.md"
notebook_extension = ".ipynb"
json_indent = 2
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.toc_filename, "CONTENTS.md");
        assert_eq!(config.notebook_extension, "ipynb");
        assert_eq!(config.json_indent, 2);
        // Unspecified fields keep their defaults
        assert_eq!(config.notebooks_dir, PathBuf::from("./python"));
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let temp = TempDir::new().unwrap();
        let result = Config::load(Some(&temp.path().join("nope.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_rejects_unknown_keys() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.toml");
        fs::write(&path, "toc_file = \"x.md\"\n").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_is_notebook() {
        let config = Config::default();
        assert!(config.is_notebook("1. intro.ipynb"));
        assert!(!config.is_notebook("1. intro.md"));
        assert!(!config.is_notebook("ipynb"));
        assert!(!config.is_notebook("notes_ipynb"));
    }

    #[test]
    fn test_toc_path() {
        let config = Config::default();
        assert_eq!(config.toc_path(Path::new("book")), PathBuf::from("book/TOC.md"));
    }
}
