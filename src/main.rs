// src/main.rs

use std::net::SocketAddr;

use stacks_counter_relay::{api, config::Config, AppState};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn run_http_server(state: AppState) {
    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.port));
    let app = api::create_router(state);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("❌ Failed to bind {}: {}", addr, e);
            return;
        }
    };
    info!("🚀 HTTP Server listening on {}", addr);
    if let Err(e) = axum::serve(listener, app).await {
        error!("HTTP server error: {}", e);
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stacks_counter_relay=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("❌ Failed to load configuration: {:#}", e);
            return;
        }
    };
    info!(
        network = %config.stacks_network,
        api = %config.stacks_api_url,
        contract = %format!("{}.{}", config.contract_address, config.contract_name),
        "Configuration loaded"
    );
    if config.deepseek_api_key.is_none() {
        info!("DEEPSEEK_API_KEY not set; /chat will report an error");
    }

    let app_state = match AppState::new(config) {
        Ok(state) => state,
        Err(e) => {
            error!("❌ Failed to initialize HTTP clients: {}", e);
            return;
        }
    };

    run_http_server(app_state).await;
}
