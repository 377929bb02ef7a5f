//! Permission check endpoints.

use std::collections::BTreeMap;

use axum::{Json, Router, extract::rejection::JsonRejection, routing::post};
use serde::Deserialize;
use serde_json::Value;

use super::{UserRequest, json_body};
use crate::error::AppResult;
use crate::models::parse_session_user;
use crate::permissions::{check_all, effective_permissions};
use crate::state::AppState;

/// Create the permissions router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/permissions/check", post(check_tokens))
        .route("/api/permissions/effective", post(effective))
}

#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    #[serde(default)]
    pub user: Value,
    #[serde(default)]
    pub tokens: Vec<String>,
}

/// Decision per requested token.
async fn check_tokens(
    body: Result<Json<CheckRequest>, JsonRejection>,
) -> AppResult<Json<BTreeMap<String, bool>>> {
    let request = json_body(body)?;
    let user = parse_session_user(request.user);

    Ok(Json(check_all(
        user.as_ref(),
        request.tokens.iter().map(String::as_str),
    )))
}

/// Sorted list of everything the user holds.
async fn effective(
    body: Result<Json<UserRequest>, JsonRejection>,
) -> AppResult<Json<Vec<String>>> {
    let user = json_body(body)?.into_user();

    Ok(Json(effective_permissions(user.as_ref()).into_iter().collect()))
}
