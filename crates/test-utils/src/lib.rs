//! Campus test utilities.
//!
//! Helpers for integration testing: user payload builders shaped like the
//! authentication service's output, menu tree fixtures, and JSON
//! assertion utilities.

use serde_json::{Value as JsonValue, json};

/// Create a regular staff user with the given direct rights.
pub fn test_user(rights: &[&str]) -> TestUser {
    TestUser {
        id: json!(1001),
        rights: rights.iter().map(|s| s.to_string()).collect(),
        operation_right: Vec::new(),
        core_user: json!(0),
        tool_user: json!(0),
        topics: json!({}),
    }
}

/// Create a core (super) user. The flag is sent as the string "1", the way
/// the backend often serializes it.
pub fn core_user() -> TestUser {
    test_user(&[]).with_core_flag(json!("1"))
}

/// Payload for "nobody is logged in".
pub fn anonymous() -> JsonValue {
    JsonValue::Null
}

/// A user payload builder.
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: JsonValue,
    pub rights: Vec<String>,
    pub operation_right: Vec<JsonValue>,
    pub core_user: JsonValue,
    pub tool_user: JsonValue,
    pub topics: JsonValue,
}

impl TestUser {
    /// Set a custom ID (number or string).
    pub fn with_id(mut self, id: JsonValue) -> Self {
        self.id = id;
        self
    }

    /// Add a direct right.
    pub fn with_right(mut self, right: &str) -> Self {
        self.rights.push(right.to_string());
        self
    }

    /// Add an operation code sent as a string.
    pub fn with_operation_code(mut self, code: &str) -> Self {
        self.operation_right.push(json!(code));
        self
    }

    /// Add an operation code sent as a number.
    pub fn with_numeric_operation_code(mut self, code: u64) -> Self {
        self.operation_right.push(json!(code));
        self
    }

    /// Set the raw core-user flag (any JSON representation).
    pub fn with_core_flag(mut self, flag: JsonValue) -> Self {
        self.core_user = flag;
        self
    }

    /// Set the raw tool-user flag.
    pub fn with_tool_flag(mut self, flag: JsonValue) -> Self {
        self.tool_user = flag;
        self
    }

    /// Add a topic label.
    pub fn with_topic(mut self, id: &str, name: &str) -> Self {
        if let Some(obj) = self.topics.as_object_mut() {
            obj.insert(id.to_string(), json!(name));
        }
        self
    }

    /// Render the payload as the auth service would send it.
    pub fn to_json(&self) -> JsonValue {
        json!({
            "id": self.id,
            "rights": self.rights,
            "operation_right": self.operation_right,
            "core_user": self.core_user,
            "tool_user": self.tool_user,
            "topics": self.topics,
        })
    }
}

/// Menu tree fixtures in wire format.
pub mod menus {
    use serde_json::{Value, json};

    /// Unguarded navigable item.
    pub fn leaf(key: &str, path: &str) -> Value {
        json!({ "key": key, "label": key, "path": path })
    }

    /// Navigable item visible if the user holds any of `tokens`.
    pub fn guarded(key: &str, path: &str, tokens: &[&str]) -> Value {
        json!({ "key": key, "label": key, "path": path, "requiredPermissions": tokens })
    }

    /// Navigable item visible only if the user holds all of `tokens`.
    pub fn guarded_all(key: &str, path: &str, tokens: &[&str]) -> Value {
        json!({ "key": key, "label": key, "path": path, "requiredAllPermissions": tokens })
    }

    /// Folder without a path.
    pub fn folder(key: &str, children: Vec<Value>) -> Value {
        json!({ "key": key, "label": key, "children": children })
    }

    /// A mixed tree touching every grant source.
    pub fn school_tree() -> Value {
        json!([
            leaf("dashboard", "/"),
            folder(
                "people",
                vec![
                    guarded("students", "/students", &["view_students", "edit_students"]),
                    guarded("self-signup", "/students/self-signup", &["view_self_signup_classes"]),
                    guarded("search", "/students/search", &["view_free_search"]),
                ]
            ),
            folder(
                "approvals",
                vec![
                    guarded("withdrawals", "/approvals/withdrawals", &["view_withdrawal"]),
                    guarded("warnings", "/approvals/warnings", &["view_warning_overview"]),
                ]
            ),
            folder(
                "me",
                vec![
                    guarded("my-card", "/me/card", &["view_my_card"]),
                    guarded_all("profile", "/me/profile", &["view_profile", "edit_profile"]),
                ]
            ),
        ])
    }

    /// Keys of a JSON item list, in order.
    pub fn keys(items: &Value) -> Vec<String> {
        items
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|i| i["key"].as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Assertion helpers for JSON content.
pub mod assert {
    use serde_json::Value;

    /// Assert that a JSON value has a specific key.
    pub fn has_key(value: &Value, key: &str) {
        assert!(
            value.get(key).is_some(),
            "Expected JSON to have key '{key}', got: {value}"
        );
    }

    /// Assert that a JSON value equals expected.
    pub fn json_eq(actual: &Value, expected: &Value) {
        assert_eq!(
            actual,
            expected,
            "JSON mismatch:\nactual: {}\nexpected: {}",
            serde_json::to_string_pretty(actual).unwrap_or_default(),
            serde_json::to_string_pretty(expected).unwrap_or_default()
        );
    }

    /// Assert that a JSON array of menu items contains an item with `key`
    /// at top level.
    pub fn has_item(items: &Value, key: &str) {
        let keys = super::menus::keys(items);
        assert!(
            keys.iter().any(|k| k == key),
            "Expected menu to contain '{key}', got: {keys:?}"
        );
    }

    /// Assert that a JSON array of menu items has no top-level `key`.
    pub fn lacks_item(items: &Value, key: &str) {
        let keys = super::menus::keys(items);
        assert!(
            keys.iter().all(|k| k != key),
            "Expected menu NOT to contain '{key}', got: {keys:?}"
        );
    }
}
