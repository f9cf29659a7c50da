//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Variable holding the listen address.
pub const BIND_ADDR_VAR: &str = "TRAVEL_BIND_ADDR";
/// Variable holding the store file path.
pub const DATA_PATH_VAR: &str = "TRAVEL_DATA_PATH";
/// Variable holding the static assets directory.
pub const STATIC_DIR_VAR: &str = "TRAVEL_STATIC_DIR";
/// Variable holding a fixed random seed.
pub const RNG_SEED_VAR: &str = "TRAVEL_RNG_SEED";

/// A configuration value could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value {value:?} for {var}: {message}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub message: String,
}

/// Settings for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on
    pub bind_addr: SocketAddr,

    /// JSON file backing preferences and history
    pub data_path: PathBuf,

    /// Directory served for unmatched paths
    pub static_dir: String,

    /// When set, every request draws from a generator seeded with this
    pub rng_seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            data_path: PathBuf::from("data/travel.json"),
            static_dir: "public".to_string(),
            rng_seed: None,
        }
    }
}

impl ServerConfig {
    /// Read the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read the configuration through `lookup`, falling back to defaults
    /// for unset or empty variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(raw) = get(BIND_ADDR_VAR) {
            config.bind_addr = raw.trim().parse().map_err(|e| ConfigError {
                var: BIND_ADDR_VAR,
                value: raw.clone(),
                message: format!("{e}"),
            })?;
        }
        if let Some(raw) = get(DATA_PATH_VAR) {
            config.data_path = PathBuf::from(raw);
        }
        if let Some(raw) = get(STATIC_DIR_VAR) {
            config.static_dir = raw;
        }
        if let Some(raw) = get(RNG_SEED_VAR) {
            let seed = raw.trim().parse().map_err(|e| ConfigError {
                var: RNG_SEED_VAR,
                value: raw.clone(),
                message: format!("{e}"),
            })?;
            config.rng_seed = Some(seed);
        }

        Ok(config)
    }
}
