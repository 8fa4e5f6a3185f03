//! Sidebar navigation manifests.
//!
//! Loads declarative sidebar definitions and provides:
//! - Validated, immutable navigation trees for the site renderer
//! - Reading order with previous/next lookups
//! - Breadcrumb trails for documents

mod loader;
mod tree;

pub use loader::{load, load_sidebars};
pub use tree::{Group, NavigationNode, NavigationTree, Neighbors, SidebarSet};
