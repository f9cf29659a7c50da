//! Domain types for the travel planner.
//!
//! This module contains the data model shared by the planner, the store
//! and the web layer. Types that carry invariants (user ids, the mode
//! table) enforce them at construction time.

mod history;
mod leg;
mod mode;
mod preferences;
mod route;
mod user;

pub use history::{HistoryRecord, NewHistoryRecord};
pub use leg::Leg;
pub use mode::{ModeProfile, ModeTable, ModeTableError, TransportMode, UnknownMode};
pub use preferences::{EffectivePreferences, PreferenceOverride, Preferences};
pub use route::{RouteOption, ScoredOption};
pub use user::{InvalidUserId, UserId};
