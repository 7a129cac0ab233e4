//! HTTP surface of the sales dashboard.

mod errors;
mod handlers;
mod models;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

pub use errors::ApiError;
pub use handlers::AppState;
pub use models::{HealthResponse, SalesMetadata, SalesResponse};

/// Builds the application router.
///
/// - `GET /api/sales` lists filtered, sorted, paginated sales with aggregates.
/// - `GET /api/sales/filter-options` returns the filter vocabularies.
/// - `POST /api/sales/refresh` reloads the dataset on next use.
/// - `GET /api/health` reports whether the record source is readable.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/sales", get(handlers::list_sales))
        .route("/api/sales/filter-options", get(handlers::filter_options))
        .route("/api/sales/refresh", post(handlers::refresh))
        .route("/api/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
