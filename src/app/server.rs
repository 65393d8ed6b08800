use crate::app::{handlers, middleware, pages};
use crate::core::AppState;
use crate::utils::error::Result;
use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/healthz", get(handlers::healthz))
        .route(
            "/api/rankings",
            get(handlers::rankings::get_ranking)
                .post(handlers::rankings::create_ranking)
                .put(handlers::rankings::update_ranking)
                .delete(handlers::rankings::delete_ranking),
        )
        .route(
            "/api/products",
            post(handlers::products::add_product)
                .put(handlers::products::reorder_products)
                .delete(handlers::products::remove_product),
        )
        .route("/api/lookup", get(handlers::lookup::lookup_product))
        .layer(from_fn_with_state(
            state.clone(),
            middleware::request_tracing,
        ))
        .layer(DefaultBodyLimit::max(state.max_body_bytes))
        .with_state(state)
}

/// Serves until ctrl-c.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!("🚀 Listening on http://{}", addr);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, draining connections");
}
