//! Menu registry - owns the static menu tree and resolves request paths.
//!
//! The tree is loaded once from YAML or JSON (or the built-in school
//! administration menu) and never changes afterwards. Per-user views are
//! derived with [`MenuRegistry::filtered_for`].

use std::collections::{HashMap, HashSet};
use std::path::Path;

use tracing::{debug, info};

use super::filter::filter_tree;
use super::item::MenuItem;
use super::lookup::{breadcrumb, count_items, find_by_path};
use crate::error::MenuError;
use crate::models::UserInfo;

const BUILTIN_MENU: &str = include_str!("default_menu.yaml");
const ROOT_PARENT: &str = "<root>";

/// Result of resolving a request path against the menu.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The matched menu item.
    pub item: MenuItem,
    /// Path parameters extracted (e.g., {"id": "1042"})
    pub params: HashMap<String, String>,
    /// Items from the root down to the matched item.
    pub trail: Vec<MenuItem>,
}

/// Registry holding one immutable menu tree.
#[derive(Debug, Clone, Default)]
pub struct MenuRegistry {
    items: Vec<MenuItem>,
    /// Item paths ordered for pattern matching: fewer `:param` segments
    /// first, tree order otherwise.
    routes: Vec<String>,
}

impl MenuRegistry {
    /// Build a registry from an already constructed tree.
    pub fn from_items(items: Vec<MenuItem>) -> Result<Self, MenuError> {
        validate_siblings(&items, ROOT_PARENT)?;
        let registry = Self::assemble(items);
        info!(items = registry.len(), "menu registry loaded");
        Ok(registry)
    }

    /// The built-in school administration menu.
    pub fn builtin() -> Result<Self, MenuError> {
        Self::from_yaml_str(BUILTIN_MENU)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, MenuError> {
        let items: Vec<MenuItem> = serde_yml::from_str(yaml)?;
        Self::from_items(items)
    }

    pub fn from_json_str(json: &str) -> Result<Self, MenuError> {
        let items: Vec<MenuItem> = serde_json::from_str(json)?;
        Self::from_items(items)
    }

    /// Load a menu file, picking the format from its extension.
    pub fn from_path(path: &Path) -> Result<Self, MenuError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let parse: fn(&str) -> Result<Self, MenuError> = match extension.as_deref() {
            Some("yaml" | "yml") => Self::from_yaml_str,
            Some("json") => Self::from_json_str,
            _ => {
                return Err(MenuError::UnsupportedFormat {
                    path: path.to_path_buf(),
                });
            }
        };

        let contents = std::fs::read_to_string(path).map_err(|source| MenuError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), "parsing menu config");
        parse(&contents)
    }

    fn assemble(items: Vec<MenuItem>) -> Self {
        let mut routes = Vec::new();
        collect_paths(&items, &mut routes);
        // Stable sort keeps tree order among equally specific routes.
        routes.sort_by_key(|path| param_count(path));

        Self { items, routes }
    }

    /// The full, unfiltered tree.
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// The tree as seen by `user`.
    pub fn filtered_for(&self, user: Option<&UserInfo>) -> Self {
        let items = filter_tree(&self.items, user);
        debug!(
            visible = count_items(&items),
            total = self.len(),
            "menu filtered for user"
        );
        Self::assemble(items)
    }

    /// Item with exactly this path.
    pub fn find(&self, path: &str) -> Option<&MenuItem> {
        find_by_path(&self.items, path)
    }

    /// Root-to-item chain for this path, empty if unknown.
    pub fn breadcrumb(&self, path: &str) -> Vec<&MenuItem> {
        breadcrumb(&self.items, path)
    }

    /// Resolve a concrete request path.
    ///
    /// Exact paths win; otherwise item paths containing `:name` segments
    /// are tried, least parameterized first.
    pub fn resolve(&self, path: &str) -> Option<RouteMatch> {
        if let Some(item) = self.find(path) {
            return Some(self.route_match(item, path, HashMap::new()));
        }

        for pattern in self.routes.iter().filter(|p| param_count(p) > 0) {
            if let Some(params) = match_pattern(pattern, path)
                && let Some(item) = self.find(pattern)
            {
                return Some(self.route_match(item, pattern, params));
            }
        }
        None
    }

    fn route_match(
        &self,
        item: &MenuItem,
        item_path: &str,
        params: HashMap<String, String>,
    ) -> RouteMatch {
        RouteMatch {
            item: item.clone(),
            params,
            trail: self.breadcrumb(item_path).into_iter().cloned().collect(),
        }
    }

    /// Total node count.
    pub fn len(&self) -> usize {
        count_items(&self.items)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn validate_siblings(items: &[MenuItem], parent: &str) -> Result<(), MenuError> {
    let mut seen = HashSet::new();

    for item in items {
        if item.key.trim().is_empty() {
            return Err(MenuError::EmptyKey {
                parent: parent.to_string(),
            });
        }
        if !seen.insert(item.key.as_str()) {
            return Err(MenuError::DuplicateKey {
                parent: parent.to_string(),
                key: item.key.clone(),
            });
        }
        if let Some(path) = &item.path
            && !path.starts_with('/')
        {
            return Err(MenuError::InvalidPath {
                key: item.key.clone(),
                path: path.clone(),
            });
        }
        validate_siblings(&item.children, &item.key)?;
    }

    Ok(())
}

fn collect_paths(items: &[MenuItem], out: &mut Vec<String>) {
    for item in items {
        if let Some(path) = &item.path {
            out.push(path.clone());
        }
        collect_paths(&item.children, out);
    }
}

fn param_count(pattern: &str) -> usize {
    pattern.split('/').filter(|s| s.starts_with(':')).count()
}

/// Match a route pattern against a path, extracting parameters.
///
/// Pattern: "/students/:id/remarks"
/// Path: "/students/1042/remarks"
/// Result: Some({"id": "1042"})
fn match_pattern(pattern: &str, path: &str) -> Option<HashMap<String, String>> {
    let pattern_parts: Vec<&str> = pattern.split('/').collect();
    let path_parts: Vec<&str> = path.split('/').collect();

    if pattern_parts.len() != path_parts.len() {
        return None;
    }

    let mut params = HashMap::new();
    for (pat, actual) in pattern_parts.iter().zip(&path_parts) {
        match pat.strip_prefix(':') {
            Some(name) if !actual.is_empty() => {
                params.insert(name.to_string(), actual.to_string());
            }
            Some(_) => return None,
            None if pat != actual => return None,
            None => {}
        }
    }

    Some(params)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn match_pattern_exact() {
        let params = match_pattern("/lockers", "/lockers").unwrap();
        assert!(params.is_empty());
    }

    #[test]
    fn match_pattern_with_params() {
        let params = match_pattern("/classrooms/:room/seats/:seat", "/classrooms/B12/seats/4").unwrap();
        assert_eq!(params.get("room"), Some(&"B12".to_string()));
        assert_eq!(params.get("seat"), Some(&"4".to_string()));
    }

    #[test]
    fn match_pattern_no_match() {
        assert!(match_pattern("/students/:id", "/students").is_none());
        assert!(match_pattern("/students/:id", "/students/").is_none());
        assert!(match_pattern("/students/:id", "/staff/3").is_none());
        assert!(match_pattern("/students/:id", "/students/3/remarks").is_none());
    }

    #[test]
    fn builtin_menu_parses() {
        let registry = MenuRegistry::builtin().unwrap();
        assert!(!registry.is_empty());
        assert!(registry.find("/students").is_some());
        assert!(registry.find("/approvals/withdrawals").is_some());
    }

    #[test]
    fn registry_from_yaml() {
        let yaml = r#"
- key: dashboard
  label: Dashboard
  path: /
- key: people
  label: People
  children:
    - key: students
      label: Students
      path: /students
"#;
        let registry = MenuRegistry::from_yaml_str(yaml).unwrap();
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.breadcrumb("/students").len(), 2);
    }

    #[test]
    fn duplicate_sibling_keys_rejected() {
        let json = r#"[
            {"key": "a", "label": "A", "path": "/a"},
            {"key": "a", "label": "Again", "path": "/again"}
        ]"#;
        let err = MenuRegistry::from_json_str(json).unwrap_err();
        assert!(matches!(err, MenuError::DuplicateKey { ref key, .. } if key == "a"));
    }

    #[test]
    fn same_key_under_different_parents_allowed() {
        let json = r#"[
            {"key": "x", "label": "X", "children": [{"key": "list", "label": "L", "path": "/x"}]},
            {"key": "y", "label": "Y", "children": [{"key": "list", "label": "L", "path": "/y"}]}
        ]"#;
        assert!(MenuRegistry::from_json_str(json).is_ok());
    }

    #[test]
    fn relative_path_rejected() {
        let json = r#"[{"key": "a", "label": "A", "path": "students"}]"#;
        let err = MenuRegistry::from_json_str(json).unwrap_err();
        assert!(matches!(err, MenuError::InvalidPath { .. }));
    }

    #[test]
    fn empty_key_rejected() {
        let json = r#"[{"key": "p", "label": "P", "children": [{"key": " ", "label": "?"}]}]"#;
        let err = MenuRegistry::from_json_str(json).unwrap_err();
        assert!(matches!(err, MenuError::EmptyKey { ref parent } if parent == "p"));
    }

    #[test]
    fn unsupported_extension() {
        let err = MenuRegistry::from_path(Path::new("menu.toml")).unwrap_err();
        assert!(matches!(err, MenuError::UnsupportedFormat { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = MenuRegistry::from_path(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, MenuError::Io { .. }));
    }

    #[test]
    fn resolve_prefers_exact_then_fewest_params() {
        let json = r#"[
            {"key": "students", "label": "Students", "path": "/students", "children": [
                {"key": "new", "label": "New", "path": "/students/new"},
                {"key": "detail", "label": "Detail", "path": "/students/:id"},
                {"key": "any", "label": "Any", "path": "/:section/:id"}
            ]}
        ]"#;
        let registry = MenuRegistry::from_json_str(json).unwrap();

        let exact = registry.resolve("/students/new").unwrap();
        assert_eq!(exact.item.key, "new");
        assert!(exact.params.is_empty());

        let detail = registry.resolve("/students/1042").unwrap();
        assert_eq!(detail.item.key, "detail");
        assert_eq!(detail.params.get("id"), Some(&"1042".to_string()));
        let trail: Vec<_> = detail.trail.iter().map(|i| i.key.as_str()).collect();
        assert_eq!(trail, vec!["students", "detail"]);

        let fallback = registry.resolve("/staff/7").unwrap();
        assert_eq!(fallback.item.key, "any");

        assert!(registry.resolve("/a/b/c").is_none());
    }
}
