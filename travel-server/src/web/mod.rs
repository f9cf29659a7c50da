//! Web layer for the travel planner.
//!
//! Provides HTTP endpoints for planning trips, saving itineraries and
//! managing preferences.

mod dto;
mod identity;
mod routes;
mod state;

pub use dto::*;
pub use identity::{USER_ID_HEADER, optional_user, require_user};
pub use routes::{AppError, create_router};
pub use state::AppState;
