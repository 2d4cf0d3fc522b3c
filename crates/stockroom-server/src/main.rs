// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

use stockroom_server::{build_router, validate_startup_config, ApiConfig, AppState, Database};
use stockroom_store::{seed_demo_data, StoreError};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("register SIGTERM");
        let mut sigint = signal(SignalKind::interrupt()).expect("register SIGINT");
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
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

#[tokio::main]
async fn main() -> Result<(), String> {
    let api_cfg = ApiConfig::from_env();
    init_tracing(api_cfg.log_json);
    validate_startup_config(&api_cfg)?;

    let db = Database::open(&api_cfg.database_path)
        .map_err(|e| format!("open database {}: {e}", api_cfg.database_path))?;
    if api_cfg.seed_on_start {
        match db.call(seed_demo_data).await {
            Ok(report) => info!(
                categories = report.categories,
                products = report.products,
                "seeded demo data"
            ),
            Err(StoreError::NotEmpty) => info!("database not empty; skipping seed"),
            Err(e) => warn!("startup seed failed: {e}"),
        }
    }

    let bind_addr = api_cfg.bind_addr.clone();
    let drain = api_cfg.shutdown_drain;
    let state = AppState::with_config(db, api_cfg);
    let app = build_router(state);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| format!("bind {bind_addr} failed: {e}"))?;
    info!("stockroom-server listening on {bind_addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            wait_for_shutdown_signal().await;
            info!(drain_ms = drain.as_millis() as u64, "shutdown signal received");
            tokio::time::sleep(drain).await;
        })
        .await
        .map_err(|e| format!("server failed: {e}"))
}
