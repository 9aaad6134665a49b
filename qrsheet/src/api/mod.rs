//! HTTP API over the workbook
//!
//! - `GET  /api/meta`           stress names and Sheet2 column partition
//! - `GET  /api/stress/:name`   catalog rows for one stress
//! - `POST /api/save`           echo stub; nothing is persisted
//!
//! Every request re-reads the workbook. The router state is configuration only.

pub mod error;
pub mod handlers;
mod middleware;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn;
use axum::routing::{get, post};
use tokio::net::TcpListener;

use crate::catalog::CatalogService;
use crate::config::Config;
use crate::workbook::WorkbookSource;

pub use error::ApiError;
pub use handlers::SaveReceipt;

#[derive(Debug, Clone)]
pub struct AppState {
    pub catalog: CatalogService,
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            catalog: CatalogService::new(
                WorkbookSource::new(config.workbook.clone()),
                config.sheets.clone(),
            ),
            max_body_bytes: config.max_body_bytes,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/meta", get(handlers::meta_handler))
        .route("/api/stress/:name", get(handlers::stress_handler))
        .route("/api/save", post(handlers::save_handler))
        .fallback(handlers::not_found_handler)
        .layer(from_fn(middleware::cors_middleware))
        .layer(from_fn(middleware::request_logging_middleware))
        .layer(DefaultBodyLimit::max(state.max_body_bytes))
        .with_state(state)
}

/// Bind and serve until Ctrl-C
pub async fn serve(config: Config) -> Result<()> {
    let state = AppState::new(&config);
    check_workbook(&state.catalog).await;

    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    log::info!(
        "qrsheet listening on {} (workbook: {})",
        config.bind,
        config.workbook.display()
    );

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server failed")
}

/// Report the workbook's state at startup; the server starts either way
async fn check_workbook(catalog: &CatalogService) {
    let catalog = catalog.clone();
    let check = tokio::task::spawn_blocking(move || catalog.meta()).await;
    match check {
        Ok(Ok(meta)) => {
            log::info!(
                "Workbook ready: {} stresses, {} Sheet2 columns",
                meta.stresses.len(),
                meta.sheet2.all_fields.len()
            );
            let missing = meta.sheet2.missing_header_fields();
            if !missing.is_empty() {
                log::warn!("Sheet2 lacks header fields: {}", missing.join(", "));
            }
        }
        Ok(Err(err)) => log::warn!("Workbook not readable at startup: {}", err),
        Err(err) => log::warn!("Workbook check aborted: {}", err),
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    log::info!("Shutting down");
}
