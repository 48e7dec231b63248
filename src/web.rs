//! Web server for the price finder UI
//!
//! Serves the single-page UI and the JSON search endpoint.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::error::FinderError;
use crate::finder::PriceFinder;
use crate::models::SearchResult;

/// Shared application state
#[derive(Clone)]
struct AppState {
    finder: Arc<dyn PriceFinder>,
}

/// POST /api/search body
#[derive(Debug, Deserialize)]
struct SearchRequest {
    cards: String,
}

#[derive(Serialize)]
struct SearchResponse {
    best_prices: SearchResult,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    finder: &'static str,
}

/// Error response, rendered as `{"detail": "..."}`
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl From<FinderError> for ApiError {
    fn from(err: FinderError) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            log::error!("Search failed: {}", self.detail);
        } else {
            log::info!("Rejected search request ({}): {}", self.status, self.detail);
        }
        let body = Json(serde_json::json!({ "detail": self.detail }));
        (self.status, body).into_response()
    }
}

/// GET / - Serve the web UI (single HTML page)
async fn index_handler() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

/// GET /api/health
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        finder: state.finder.name(),
    })
}

/// POST /api/search {"cards": "..."}
async fn search_handler(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Json(request) = payload?;
    log::info!(
        "Search request: {} line(s) via {} finder",
        request.cards.lines().count(),
        state.finder.name()
    );

    let best_prices = state.finder.find(&request.cards).await?;
    Ok(Json(SearchResponse { best_prices }))
}

/// Any origin, method and header, with credentials.
///
/// Wildcards are not allowed together with credentials, so the request's
/// own values are mirrored back instead.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Build the web server router
pub fn create_router(finder: Arc<dyn PriceFinder>) -> Router {
    let state = AppState { finder };

    Router::new()
        .route("/", get(index_handler))
        .route("/api/health", get(health_handler))
        .route("/api/search", post(search_handler))
        .layer(cors_layer())
        .with_state(state)
}

/// Start the web server and run until Ctrl-C
pub async fn serve(
    addr: SocketAddr,
    finder: Arc<dyn PriceFinder>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(finder);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Web UI listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown signal received");
}

#[cfg(test)]
#[path = "web_tests.rs"]
mod tests;
