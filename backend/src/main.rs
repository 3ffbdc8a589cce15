//! Main entry point for the EDA backend.
//!
//! This file loads configuration, initializes logging, rehydrates the demo
//! session from storage and serves the axum router.

use eda_backend::config::Config;
use eda_backend::errors::StartupError;
use eda_backend::services::dispatcher::dispatch_session;
use eda_backend::{build_router, build_state};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("eda-backend: {err}");
            std::process::exit(2);
        }
    };
    init_tracing(config.log_json);

    if let Err(err) = run(config).await {
        error!(error = %err, "eda-backend stopped");
        std::process::exit(1);
    }
}

fn init_tracing(log_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn run(config: Config) -> Result<(), StartupError> {
    let state = build_state(&config)?;

    let session = state.auth.initialize().await;
    info!(
        authenticated = session.is_authenticated,
        redirect = dispatch_session(&session).path(),
        "session initialized"
    );

    let app = build_router(state);
    let listener = TcpListener::bind(config.addr).await?;
    info!("listening on {}", config.addr);

    axum::serve(listener, app).await?;
    Ok(())
}
