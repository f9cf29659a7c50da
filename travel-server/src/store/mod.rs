//! Persistence of user preferences and saved itineraries.

mod error;
mod json;

pub use error::StoreError;
pub use json::JsonStore;
