pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

use crate::application::RiskAnalysisUseCase;
use crate::infrastructure::config::ConfigService;
use crate::infrastructure::llm_clients::GeminiClient;
use crate::interfaces::http::{start_server, HttpState};
use actix_web::web;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Loads configuration and serves the form API until shutdown.
pub async fn run() -> std::io::Result<()> {
    init_tracing();

    let config = ConfigService::load().map_err(|err| {
        error!(error = %err, "Failed to load configuration");
        std::io::Error::new(std::io::ErrorKind::InvalidInput, err.to_string())
    })?;

    let llm_client = Arc::new(GeminiClient::new(config.llm.timeout_secs));
    let risk_analysis = RiskAnalysisUseCase::new(llm_client);
    let state = web::Data::new(HttpState::new(config.llm.clone(), risk_analysis));

    let server = start_server(state, &config.server).map_err(|err| {
        error!(
            error = %err,
            host = %config.server.host,
            port = config.server.port,
            "Failed to bind HTTP server"
        );
        err
    })?;

    info!(
        "Serving API on http://{}:{}/api",
        config.server.host, config.server.port
    );
    server.await
}
