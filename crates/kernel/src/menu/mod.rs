//! Navigation menu for the admin console.
//!
//! The menu is static configuration: a tree of [`MenuItem`] nodes, each
//! optionally guarded by permission tokens. Per request the tree is
//! filtered against the current user:
//! - items whose permission checks fail are dropped with their subtree
//! - folders (no path) left without visible children are dropped
//! - everything else keeps its original order

mod filter;
mod item;
mod lookup;
mod registry;

pub use filter::filter_tree;
pub use item::{MenuItem, is_item_visible};
pub use lookup::{breadcrumb, count_items, find_by_path};
pub use registry::{MenuRegistry, RouteMatch};
