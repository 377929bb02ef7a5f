//! Menu route handlers.

use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::{UserRequest, json_body};
use crate::error::{AppError, AppResult};
use crate::menu::MenuItem;
use crate::models::parse_session_user;
use crate::state::AppState;

/// Create the menu router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/menu", post(filtered_menu))
        .route("/api/menu/resolve", post(resolve_path))
        .route("/api/menu/breadcrumb", get(breadcrumb))
}

/// Body for resolving a path on the user's menu.
#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    #[serde(default)]
    pub user: Value,
    pub path: String,
}

/// Resolved item with its params and root-to-item trail.
#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub item: MenuItem,
    pub params: HashMap<String, String>,
    pub breadcrumb: Vec<MenuItem>,
}

#[derive(Debug, Deserialize)]
pub struct BreadcrumbQuery {
    pub path: String,
}

/// Menu tree visible to the user in the body.
async fn filtered_menu(
    State(state): State<AppState>,
    body: Result<Json<UserRequest>, JsonRejection>,
) -> AppResult<Json<Vec<MenuItem>>> {
    let user = json_body(body)?.into_user();
    let menu = state.menus().filtered_for(user.as_ref());

    debug!(
        user = user.as_ref().map_or("anonymous", |u| u.id.as_str()),
        roots = menu.items().len(),
        "served filtered menu"
    );

    Ok(Json(menu.items().to_vec()))
}

/// Resolve a request path against the user's visible menu.
async fn resolve_path(
    State(state): State<AppState>,
    body: Result<Json<ResolveRequest>, JsonRejection>,
) -> AppResult<Json<ResolveResponse>> {
    let request = json_body(body)?;
    let user = parse_session_user(request.user);

    let route = state
        .menus()
        .filtered_for(user.as_ref())
        .resolve(&request.path)
        .ok_or(AppError::NotFound)?;

    Ok(Json(ResolveResponse {
        item: route.item,
        params: route.params,
        breadcrumb: route.trail,
    }))
}

/// Breadcrumb on the unfiltered tree.
async fn breadcrumb(
    State(state): State<AppState>,
    Query(query): Query<BreadcrumbQuery>,
) -> Json<Vec<MenuItem>> {
    let trail = state
        .menus()
        .breadcrumb(&query.path)
        .into_iter()
        .cloned()
        .collect();

    Json(trail)
}
