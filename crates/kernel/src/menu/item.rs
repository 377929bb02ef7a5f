//! Menu item definition and per-item visibility.

use serde::{Deserialize, Serialize};

use crate::models::UserInfo;
use crate::permissions::check_permission;

/// A node of the navigation tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// Unique among siblings.
    pub key: String,
    /// Display text.
    pub label: String,
    /// Route; `None` makes the item a pure folder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Visible if the user holds any of these.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_permissions: Option<Vec<String>>,
    /// Visible only if the user holds all of these.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_all_permissions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuItem>,
}

impl MenuItem {
    /// Create an unguarded item with no children.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            path: None,
            icon: None,
            required_permissions: None,
            required_all_permissions: None,
            children: Vec::new(),
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn requires_any<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_permissions = Some(tokens.into_iter().map(Into::into).collect());
        self
    }

    pub fn requires_all<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_all_permissions = Some(tokens.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_children(mut self, children: Vec<MenuItem>) -> Self {
        self.children = children;
        self
    }

    /// Whether the item is a navigable route rather than a folder.
    pub fn is_navigable(&self) -> bool {
        self.path.is_some()
    }

    /// Whether the item itself passes its permission checks. Children are
    /// not considered.
    pub fn is_visible(&self, user: Option<&UserInfo>) -> bool {
        let any_ok = match non_empty(&self.required_permissions) {
            Some(tokens) => tokens.iter().any(|t| check_permission(user, t)),
            None => true,
        };

        let all_ok = match non_empty(&self.required_all_permissions) {
            Some(tokens) => tokens.iter().all(|t| check_permission(user, t)),
            None => true,
        };

        any_ok && all_ok
    }
}

/// Free-function form of [`MenuItem::is_visible`].
pub fn is_item_visible(item: &MenuItem, user: Option<&UserInfo>) -> bool {
    item.is_visible(user)
}

/// An empty list counts as undeclared.
fn non_empty(tokens: &Option<Vec<String>>) -> Option<&[String]> {
    tokens.as_deref().filter(|t| !t.is_empty())
}
