//! Constants used throughout the nbbook crate

/// The name of the table-of-contents document in each book folder
pub const TOC_FILENAME: &str = "TOC.md";

/// Default root holding the numbered part folders for `nav-links`
pub const DEFAULT_NOTEBOOKS_DIR: &str = "python";

/// File extension of notebook files (without the dot)
pub const NOTEBOOK_EXTENSION: &str = "ipynb";

/// Optional configuration file looked up in the current directory
pub const CONFIG_FILENAME: &str = "nbb.toml";

/// Style fragment that identifies a previously injected navigation cell
pub const NAV_MARKER: &str = "width:100%";
