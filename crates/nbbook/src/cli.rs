//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nbb")]
#[command(about = "Notebook Book Authoring Tools", long_about = None)]
#[command(after_help = "Use 'nbb <command> --help' for more information about a command.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a config file (defaults to ./nbb.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Show debug diagnostics on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create part folders and chapter notebooks from a TOC.md
    #[command(visible_alias = "create-folders")]
    Scaffold {
        /// Folder containing TOC.md, where the structure is created
        folder: PathBuf,

        /// Show what would be created without touching the disk
        #[arg(long)]
        dry_run: bool,
    },

    /// Add previous/contents/next navigation to every notebook
    #[command(visible_alias = "links")]
    NavLinks {
        /// Root holding the numbered part folders (defaults to ./python)
        root: Option<PathBuf>,

        /// Show the computed order without writing notebooks
        #[arg(long)]
        dry_run: bool,
    },

    /// Turn chapter headings in TOC.md into links to their notebooks
    #[command(visible_alias = "update-toc")]
    TocLinks {
        /// Folder containing TOC.md (defaults to every */TOC.md under the current directory)
        folder: Option<PathBuf>,

        /// Show the changes without writing TOC.md
        #[arg(long)]
        dry_run: bool,
    },
}
