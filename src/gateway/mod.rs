//! HTTP gateway
//!
//! Thin glue over the store: JSON binding, route wiring, and the HTTP status
//! mapping for store errors. All ledger semantics live in [`crate::store`].

pub mod handlers;
pub mod state;
pub mod types;

pub mod openapi;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::db::Database;
use state::AppState;

/// Start the HTTP gateway server. Runs until the process is stopped.
pub async fn run_server(host: &str, port: u16, db: Arc<Database>) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(db));

    let api_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/accounts",
            post(handlers::create_account).get(handlers::list_accounts),
        )
        .route("/accounts/{id}", get(handlers::get_account))
        .route("/accounts/{id}/entries", get(handlers::list_entries))
        .route("/accounts/{id}/transfers", get(handlers::list_transfers))
        .route("/entries/{id}", get(handlers::get_entry))
        .route("/transfers", post(handlers::create_transfer))
        .route("/transfers/{id}", get(handlers::get_transfer));

    let app = Router::new()
        .nest("/api/v1", api_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()));

    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", addr, e))?;

    tracing::info!("Gateway listening on http://{}", addr);
    tracing::info!("API docs at http://{}/docs", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
