//! User identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid user id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid user id: {reason}")]
pub struct InvalidUserId {
    reason: &'static str,
}

/// Identifier of an authenticated user.
///
/// # Examples
///
/// ```
/// use travel_server::domain::UserId;
///
/// let id = UserId::parse("42").unwrap();
/// assert_eq!(id.get(), 42);
///
/// assert!(UserId::parse("").is_err());
/// assert!(UserId::parse("0").is_err());
/// assert!(UserId::parse("abc").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    /// Parse a user id from its decimal form.
    ///
    /// Ids are positive integers; surrounding whitespace is ignored.
    pub fn parse(s: &str) -> Result<Self, InvalidUserId> {
        let s = s.trim();
        if s.is_empty() {
            return Err(InvalidUserId {
                reason: "must not be empty",
            });
        }

        let id: u64 = s.parse().map_err(|_| InvalidUserId {
            reason: "must be a decimal integer",
        })?;

        Self::new(id).ok_or(InvalidUserId {
            reason: "must be positive",
        })
    }

    /// Wrap a raw id. Returns `None` for zero.
    pub fn new(id: u64) -> Option<Self> {
        (id > 0).then_some(UserId(id))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserId({})", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
