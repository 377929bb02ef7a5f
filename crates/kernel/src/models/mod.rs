//! Session-scoped models.

pub mod user;

pub use user::{RawUserInfo, UserInfo, coerce_flag, parse_session_user};
