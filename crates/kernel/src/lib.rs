//! Campus Admin Kernel Library
//!
//! Permission evaluation and per-user menu filtering for the school
//! administration console, plus the JSON API serving them.
//! The main entry point for running the server is the `campus` binary.

pub mod config;
pub mod error;
pub mod menu;
pub mod models;
pub mod permissions;
pub mod routes;
pub mod state;

pub use config::Config;
pub use error::{AppError, MenuError};
pub use menu::{MenuItem, MenuRegistry, filter_tree};
pub use models::UserInfo;
pub use permissions::check_permission;
pub use state::AppState;
