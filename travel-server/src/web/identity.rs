//! Caller identity.
//!
//! Authentication happens upstream; the authenticating proxy forwards the
//! user's id in the `x-user-id` header.

use axum::http::HeaderMap;
use tracing::debug;

use crate::domain::UserId;

use super::routes::AppError;

/// Header carrying the authenticated user's id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The caller's id, if any. Malformed ids count as anonymous.
pub fn optional_user(headers: &HeaderMap) -> Option<UserId> {
    let raw = headers.get(USER_ID_HEADER)?.to_str().ok()?;
    match UserId::parse(raw) {
        Ok(user) => Some(user),
        Err(e) => {
            debug!(header = raw, error = %e, "ignoring malformed user id");
            None
        }
    }
}

/// The caller's id, or `Unauthorized`.
pub fn require_user(headers: &HeaderMap) -> Result<UserId, AppError> {
    optional_user(headers).ok_or(AppError::Unauthorized)
}
