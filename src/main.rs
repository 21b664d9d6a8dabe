//! Request Admission Pipeline
//!
//! Gatekeepers that inspect every inbound HTTP request before it reaches
//! application logic, built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────────┐
//!                    │               ADMISSION PIPELINE                  │
//!                    │                                                   │
//!   Client Request   │  ┌───────────┐   ┌───────────┐   ┌────────────┐  │
//!   ─────────────────┼─▶│    IP     │──▶│   Rate    │──▶│ Integrity  │──┼─▶ Application
//!                    │  │gatekeeper │   │ governor  │   │  sentinel  │  │   handler
//!                    │  └─────┬─────┘   └─────┬─────┘   └─────┬──────┘  │
//!                    │        │ 403           │ 429           │ never   │
//!                    │        ▼               ▼               ▼ blocks  │
//!                    │  ┌───────────┐   ┌─────────────────────────────┐ │
//!                    │  │reputation │   │    shared counter store     │ │
//!                    │  │  oracle   │   │  (rate:* / integrity:* keys)│ │
//!                    │  └───────────┘   └─────────────────────────────┘ │
//!                    │                                                   │
//!                    │  ┌────────────────────────────────────────────┐  │
//!                    │  │  Cross-cutting: config, observability      │  │
//!                    │  └────────────────────────────────────────────┘  │
//!                    └──────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{routing::get, Router};
use clap::Parser;
use tokio::net::TcpListener;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use admission_gate::config::loader::load_config;
use admission_gate::config::AdmissionConfig;
use admission_gate::observability::{logging, metrics};
use admission_gate::oracle::{NoopVerifier, StaticIpOracle};
use admission_gate::store::MemoryStore;
use admission_gate::AdmissionPipeline;

#[derive(Parser)]
#[command(name = "admission-gate", about = "Request admission pipeline demo server")]
struct Cli {
    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AdmissionConfig::default(),
    };

    logging::init(&config.observability.log_level);
    tracing::info!("admission-gate v0.1.0 starting");

    if config.observability.metrics_enabled {
        let metrics_addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::install_exporter(metrics_addr)?;
        tracing::info!(address = %metrics_addr, "Metrics exporter listening");
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        rate_limit_enabled = config.rate_limit.enabled,
        block_on_no_ip = config.ip_blocker.block_on_no_ip,
        log_integrity_enabled = config.log_integrity.enabled,
        "Configuration loaded"
    );

    let oracle = Arc::new(StaticIpOracle::from_config(&config.ip_blocker));
    let verifier = Arc::new(NoopVerifier);
    let store = Arc::new(MemoryStore::new());

    let pipeline = AdmissionPipeline::new(&config, oracle, verifier, store);

    // Trivial downstream handler; real deployments mount their own router.
    let app = pipeline
        .apply(Router::new().route("/", get(|| async { "OK" })).fallback(|| async { "OK" }))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "HTTP server starting");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
