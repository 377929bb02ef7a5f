//! Per-user pruning of the menu tree.

use tracing::trace;

use super::item::MenuItem;
use crate::models::UserInfo;

/// Build the subset of `items` visible to `user`.
///
/// Sibling order is preserved and the input is left untouched. Hidden items
/// are dropped without looking at their children; a folder with no path is
/// dropped once its filtered children are empty, while an item with a path
/// stays even if all of its children were removed.
///
/// With no user (`None`) every guarded item is hidden, so only unguarded
/// items and the folders that hold them remain.
pub fn filter_tree(items: &[MenuItem], user: Option<&UserInfo>) -> Vec<MenuItem> {
    items
        .iter()
        .filter_map(|item| filter_item(item, user))
        .collect()
}

fn filter_item(item: &MenuItem, user: Option<&UserInfo>) -> Option<MenuItem> {
    if !item.is_visible(user) {
        trace!(key = %item.key, "menu item hidden by permissions");
        return None;
    }

    let children = filter_tree(&item.children, user);

    if !item.is_navigable() && children.is_empty() {
        trace!(key = %item.key, "menu folder pruned, no visible children");
        return None;
    }

    Some(MenuItem {
        key: item.key.clone(),
        label: item.label.clone(),
        path: item.path.clone(),
        icon: item.icon.clone(),
        required_permissions: item.required_permissions.clone(),
        required_all_permissions: item.required_all_permissions.clone(),
        children,
    })
}
