//! Command implementations

pub mod nav_links;
pub mod scaffold;
pub mod toc_links;

pub use nav_links::nav_links;
pub use scaffold::scaffold;
pub use toc_links::{toc_links, toc_links_all};
