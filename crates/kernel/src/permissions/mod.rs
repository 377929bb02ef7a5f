//! Permission evaluation.
//!
//! Grants come from four places: the core-user flag, direct rights,
//! operation category codes, and the unconditional basic allow-list.
//! [`check_permission`] folds all of them into a single pure decision.

pub mod catalog;

use std::collections::{BTreeMap, BTreeSet};

use crate::models::UserInfo;

use self::catalog::{
    FREE_SEARCH, SELF_SIGNUP_GRANTING_RIGHTS, TOOL_USER_RIGHT, is_basic_permission,
    is_self_signup_token, known_tokens, operation_category,
};

/// Decide whether `user` may use `token`.
///
/// - No user: always false.
/// - Core users: always true, including unknown tokens.
/// - Direct rights match exactly.
/// - Operation-gated tokens require the category code and nothing else.
/// - Free search requires the `tool_user` right.
/// - Self-signup class screens require `edit_classes` or `sales_admin`.
/// - Basic tokens are granted to every authenticated user.
pub fn check_permission(user: Option<&UserInfo>, token: &str) -> bool {
    let Some(user) = user else {
        return false;
    };

    if user.core_user {
        return true;
    }

    if user.has_right(token) {
        return true;
    }

    if let Some(category) = operation_category(token) {
        return user.has_operation_right(category.required_code());
    }

    if token == FREE_SEARCH {
        return user.has_right(TOOL_USER_RIGHT);
    }

    if is_self_signup_token(token) {
        return SELF_SIGNUP_GRANTING_RIGHTS
            .iter()
            .any(|right| user.has_right(right));
    }

    is_basic_permission(token)
}

/// Evaluate several tokens at once.
pub fn check_all<'a, I>(user: Option<&UserInfo>, tokens: I) -> BTreeMap<String, bool>
where
    I: IntoIterator<Item = &'a str>,
{
    tokens
        .into_iter()
        .map(|token| (token.to_string(), check_permission(user, token)))
        .collect()
}

/// Every token the user effectively holds: direct rights plus each catalog
/// token the evaluator grants.
pub fn effective_permissions(user: Option<&UserInfo>) -> BTreeSet<String> {
    let Some(u) = user else {
        return BTreeSet::new();
    };

    let mut granted = u.rights.clone();
    granted.extend(
        known_tokens()
            .filter(|token| check_permission(user, token))
            .map(str::to_string),
    );
    granted
}

impl UserInfo {
    /// Shorthand for [`check_permission`] on an authenticated user.
    pub fn has_permission(&self, token: &str) -> bool {
        check_permission(Some(self), token)
    }
}
