//! Multimodal travel planner server.
//!
//! Answers "how do I get from this city to that one?" with a ranked list of
//! flight, train, bus, car and flight+car options, scored against the
//! traveller's preferences.

pub mod config;
pub mod domain;
pub mod planner;
pub mod store;
pub mod web;
