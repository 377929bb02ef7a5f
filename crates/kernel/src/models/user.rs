//! User payload as issued by the authentication service.
//!
//! The backend serializes flags and codes loosely: booleans may arrive as
//! `0`/`1`, `"0"`/`"1"` or `true`/`false`, and operation codes as numbers or
//! strings. [`RawUserInfo`] accepts whatever arrives; [`UserInfo::from_raw`]
//! is the single place that turns it into clean types. Malformed fields
//! degrade to empty/false rather than failing.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use tracing::warn;

use crate::error::MenuError;

/// Wire shape of the user payload. Every field is optional and untyped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawUserInfo {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub rights: Value,
    #[serde(default)]
    pub operation_right: Value,
    #[serde(default)]
    pub core_user: Value,
    #[serde(default)]
    pub tool_user: Value,
    #[serde(default)]
    pub topics: Value,
}

/// Normalized user, valid for the lifetime of a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserInfo {
    pub id: String,
    /// Permission flags granted directly to the user.
    pub rights: BTreeSet<String>,
    /// Operation category codes, always compared as strings.
    pub operation_rights: BTreeSet<String>,
    /// Super-user: bypasses every other check.
    pub core_user: bool,
    pub tool_user: bool,
    /// Topic id -> display name. Used for labels only.
    pub topics: BTreeMap<String, String>,
}

impl UserInfo {
    /// Normalize a raw payload.
    pub fn from_raw(raw: RawUserInfo) -> Self {
        Self {
            id: scalar_text(&raw.id).unwrap_or_default(),
            rights: string_set(&raw.rights, false),
            operation_rights: string_set(&raw.operation_right, true),
            core_user: coerce_flag(&raw.core_user),
            tool_user: coerce_flag(&raw.tool_user),
            topics: topic_map(&raw.topics),
        }
    }

    /// Parse and normalize a JSON user payload.
    pub fn from_json(json: &str) -> Result<Self, MenuError> {
        let raw: RawUserInfo = serde_json::from_str(json)?;
        Ok(Self::from_raw(raw))
    }

    /// Whether a right was granted directly (exact match).
    pub fn has_right(&self, right: &str) -> bool {
        self.rights.contains(right)
    }

    /// Whether the user holds an operation category code.
    pub fn has_operation_right(&self, code: &str) -> bool {
        self.operation_rights.contains(code)
    }

    /// Display name for a topic, if the user has it.
    pub fn topic_name(&self, topic_id: &str) -> Option<&str> {
        self.topics.get(topic_id).map(String::as_str)
    }
}

impl From<RawUserInfo> for UserInfo {
    fn from(raw: RawUserInfo) -> Self {
        Self::from_raw(raw)
    }
}

/// Interpret a session user value: `null` means nobody is logged in.
///
/// Objects are normalized; any other JSON type is treated as no user.
pub fn parse_session_user(value: Value) -> Option<UserInfo> {
    match value {
        Value::Null => None,
        // Every RawUserInfo field is a defaulted Value, so any object decodes.
        Value::Object(_) => Some(UserInfo::from_raw(
            serde_json::from_value(value).unwrap_or_default(),
        )),
        other => {
            warn!(
                kind = json_kind(&other),
                "user payload is not an object, treating as anonymous"
            );
            None
        }
    }
}

/// Coerce a loosely typed flag: true only for `1`, `"1"` or `true`.
pub fn coerce_flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_i64() == Some(1) || n.as_f64() == Some(1.0),
        Value::String(s) => s.trim() == "1",
        _ => false,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(number_text(n)),
        _ => None,
    }
}

/// Decimal text for a number; whole floats render as integers (`11.0` -> "11").
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}

/// Collect array entries into a set. `coerce_numbers` also accepts numeric
/// entries, rendered as their decimal text.
fn string_set(value: &Value, coerce_numbers: bool) -> BTreeSet<String> {
    let Value::Array(entries) = value else {
        return BTreeSet::new();
    };

    entries
        .iter()
        .filter_map(|entry| match entry {
            Value::String(s) if coerce_numbers => Some(s.trim().to_string()),
            Value::String(s) => Some(s.clone()),
            Value::Number(n) if coerce_numbers => Some(number_text(n)),
            _ => None,
        })
        .collect()
}

fn topic_map(value: &Value) -> BTreeMap<String, String> {
    let Value::Object(entries) = value else {
        return BTreeMap::new();
    };

    entries
        .iter()
        .filter_map(|(id, name)| scalar_text(name).map(|name| (id.clone(), name)))
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
