//! Store error types.

/// Errors that can occur when reading or writing the JSON store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the data file failed
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    /// The data file is not valid store JSON
    #[error("JSON error: {message}")]
    Json { message: String },

    /// A writer panicked while holding the lock
    #[error("store lock poisoned")]
    Poisoned,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StoreError::Io {
            path: "data/travel.json".into(),
            message: "permission denied".into(),
        };
        assert_eq!(
            err.to_string(),
            "I/O error on data/travel.json: permission denied"
        );

        let err = StoreError::Json {
            message: "expected value at line 1 column 1".into(),
        };
        assert!(err.to_string().starts_with("JSON error"));

        assert_eq!(StoreError::Poisoned.to_string(), "store lock poisoned");
    }
}
