//! HTTP route handlers.

pub mod health;
pub mod menu;
pub mod permissions;

use axum::Json;
use axum::Router;
use axum::extract::rejection::JsonRejection;
use serde::Deserialize;
use serde_json::Value;

use crate::error::AppError;
use crate::models::{UserInfo, parse_session_user};
use crate::state::AppState;

/// All API routes, without state or middleware layers.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(menu::router())
        .merge(permissions::router())
}

/// Request body carrying the session user as issued by the auth service.
#[derive(Debug, Deserialize)]
pub struct UserRequest {
    /// Raw user payload; `null` or absent means not logged in.
    #[serde(default)]
    pub user: Value,
}

impl UserRequest {
    pub fn into_user(self) -> Option<UserInfo> {
        parse_session_user(self.user)
    }
}

/// Unwrap a JSON body, turning extractor rejections into 400s.
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}
