//! Axum application setup.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use super::handlers;
use super::state::AppState;

/// Create the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration for local development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/datasets", get(handlers::list_datasets))
        .route("/datasets/:name", get(handlers::get_dataset))
        .route("/reload", post(handlers::reload));

    Router::new()
        .route("/", get(handlers::dashboard))
        .route("/datasets/:name", get(handlers::dataset_page))
        .route("/:file", get(handlers::dictionary_file))
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(state)
}

/// Start the web server; returns once `shutdown` resolves.
pub async fn run_server(
    state: AppState,
    port: u16,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], port));

    tracing::info!(%addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
