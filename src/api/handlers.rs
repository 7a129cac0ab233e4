//! HTTP request handlers and shared application state.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::debug;

use crate::api::errors::ApiError;
use crate::api::models::{HealthResponse, SalesResponse};
use crate::catalog::FilterCatalogSnapshot;
use crate::filters::{FilterRequest, PageLimits, RawFilterParams};
use crate::service::SalesQuery;

/// Shared application state passed to every handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub sales: SalesQuery,
    pub page_limits: PageLimits
}

/// `GET /api/sales`
///
/// The query string is read as raw pairs so repeated facet keys (`regions=a&regions=b`)
/// and `regions[]` style keys both work.
pub async fn list_sales(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<SalesResponse>, ApiError> {
    let request = FilterRequest::from_raw(RawFilterParams::from_pairs(pairs), state.page_limits);

    debug!("Listing sales: {request:?}");

    let envelope = state.sales.query(&request).await?;

    Ok(Json(SalesResponse::from(envelope)))
}

/// `GET /api/sales/filter-options`
pub async fn filter_options(State(state): State<AppState>) -> Result<Json<FilterCatalogSnapshot>, ApiError> {
    let snapshot = state.sales.filter_options().await?;

    Ok(Json(FilterCatalogSnapshot::clone(&snapshot)))
}

/// `POST /api/sales/refresh`
pub async fn refresh(State(state): State<AppState>) -> StatusCode {
    state.sales.refresh().await;
    StatusCode::ACCEPTED
}

/// `GET /api/health`
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let records = state.sales.health().await?;

    Ok(Json(HealthResponse { ok: true, records }))
}
