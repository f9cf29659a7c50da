use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use travel_server::config::ServerConfig;
use travel_server::domain::ModeTable;
use travel_server::planner::{PlannerConfig, us_cities};
use travel_server::store::JsonStore;
use travel_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let store = match JsonStore::open(config.data_path.clone()) {
        Ok(store) => store,
        Err(e) => {
            error!(error = %e, path = %config.data_path.display(), "failed to open store");
            return ExitCode::FAILURE;
        }
    };

    let distances = us_cities();
    info!(pairs = distances.len(), "loaded city distances");

    let state = AppState::new(
        ModeTable::default(),
        distances,
        store,
        PlannerConfig::default(),
        config.rng_seed,
    );
    let app = create_router(state, &config.static_dir);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, addr = %config.bind_addr, "failed to bind");
            return ExitCode::FAILURE;
        }
    };
    info!(addr = %config.bind_addr, "travel planner listening");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server error");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
