use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::middleware::AuthOrganizer;
use crate::AppState;

use super::backend_error;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/venues", get(search_venues))
        .route("/venues/{id}", get(get_venue))
}

#[derive(Debug, Deserialize)]
pub struct VenuesQuery {
    pub query: Option<String>,
    pub page: Option<u32>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<u32>,
}

// GET /api/venues — тонкий прокси поиска по сервису площадок
async fn search_venues(
    State(state): State<Arc<AppState>>,
    user: AuthOrganizer,
    Query(params): Query<VenuesQuery>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let query_val = params.query.as_deref().unwrap_or_default();
    let page = params.page.unwrap_or(1).max(1);
    let page_size = params.page_size.unwrap_or(20).clamp(1, 50);

    let limit: i64 = page_size as i64;
    let offset: i64 = ((page - 1) * page_size) as i64;

    let venues = state
        .venues
        .search_venues(&user.token, query_val, limit, offset)
        .await
        .map_err(backend_error)?;

    let count = venues.len();
    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "venues": venues,
            "count": count,
        })),
    ))
}

// GET /api/venues/{id}
async fn get_venue(
    State(state): State<Arc<AppState>>,
    user: AuthOrganizer,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    if id <= 0 {
        return Err((StatusCode::BAD_REQUEST, "id должен быть > 0".to_string()));
    }

    let venue = state
        .venues
        .get_venue(&user.token, id)
        .await
        .map_err(backend_error)?;

    Ok((StatusCode::OK, Json(venue)))
}
