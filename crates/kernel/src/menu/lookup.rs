//! Path lookups over a menu tree, filtered or not.

use super::item::MenuItem;

/// First item whose path equals `path`, depth-first in tree order.
pub fn find_by_path<'a>(items: &'a [MenuItem], path: &str) -> Option<&'a MenuItem> {
    for item in items {
        if item.path.as_deref() == Some(path) {
            return Some(item);
        }
        if let Some(found) = find_by_path(&item.children, path) {
            return Some(found);
        }
    }
    None
}

/// Items from the root down to the item whose path equals `path`.
///
/// Empty when nothing matches.
pub fn breadcrumb<'a>(items: &'a [MenuItem], path: &str) -> Vec<&'a MenuItem> {
    let mut trail = Vec::new();
    if collect_trail(items, path, &mut trail) {
        trail
    } else {
        Vec::new()
    }
}

fn collect_trail<'a>(items: &'a [MenuItem], path: &str, trail: &mut Vec<&'a MenuItem>) -> bool {
    for item in items {
        trail.push(item);
        if item.path.as_deref() == Some(path) || collect_trail(&item.children, path, trail) {
            return true;
        }
        trail.pop();
    }
    false
}

/// Total number of nodes in the tree.
pub fn count_items(items: &[MenuItem]) -> usize {
    items
        .iter()
        .map(|item| 1 + count_items(&item.children))
        .sum()
}
