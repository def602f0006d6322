use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::middleware::AuthOrganizer;
use crate::models::{GridError, SeatStats, VenuePayload};
use crate::store::{DraftError, VenueDraft};
use crate::AppState;

use super::backend_error;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/drafts", post(create_draft))
        .route("/drafts/{id}", get(get_draft).delete(discard_draft))
        .route("/drafts/{id}/dimensions", patch(set_dimensions))
        .route("/drafts/{id}/rows/{row}", patch(set_row_label))
        .route("/drafts/{id}/seats/{row}/{col}", patch(cycle_seat))
        .route("/drafts/{id}/stats", get(get_stats))
        .route("/drafts/{id}/submit", post(submit_draft))
        .route("/venues/{id}/classify", post(open_classification))
}

/* ---------- helpers ---------- */

fn draft_error(e: DraftError) -> (StatusCode, String) {
    match e {
        DraftError::NotFound => (StatusCode::NOT_FOUND, "Черновик не найден".to_string()),
        DraftError::ClassificationNotAllowed => (
            StatusCode::CONFLICT,
            "Разметка мест недоступна в режиме планировки".to_string(),
        ),
        DraftError::Grid(err) => grid_error(err),
    }
}

fn grid_error(e: GridError) -> (StatusCode, String) {
    match e {
        GridError::EmptyDimensions { .. } => (
            StatusCode::BAD_REQUEST,
            "Размеры сетки должны быть больше нуля".to_string(),
        ),
        GridError::RowOutOfBounds { .. } => {
            (StatusCode::BAD_REQUEST, "Ряд вне сетки".to_string())
        }
        GridError::SeatOutOfBounds { .. } => {
            (StatusCode::BAD_REQUEST, "Место вне сетки".to_string())
        }
        // кривая схема могла прийти только от сервиса площадок
        GridError::MalformedSeatMatrix { .. } | GridError::MalformedRowLabels { .. } => (
            StatusCode::BAD_GATEWAY,
            "Сервис площадок вернул некорректную схему зала".to_string(),
        ),
    }
}

/// Черновик вместе с живой статистикой и вместимостью, которую отправит
/// submit прямо сейчас.
#[derive(Debug, Serialize)]
struct DraftResponse {
    #[serde(flatten)]
    draft: VenueDraft,
    stats: SeatStats,
    capacity: u32,
}

impl From<VenueDraft> for DraftResponse {
    fn from(draft: VenueDraft) -> Self {
        let stats = draft.grid.stats();
        let capacity = draft.submit_capacity();
        DraftResponse {
            draft,
            stats,
            capacity,
        }
    }
}

/* ---------- DRAFTS ---------- */

// POST /api/drafts
#[derive(Debug, Deserialize, Validate)]
struct CreateDraftRequest {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    pub address: Option<String>,
    // максимумы из формы консоли: 26 рядов, 50 мест в ряду
    #[validate(range(min = 1, max = 26))]
    pub rows: u32,
    #[validate(range(min = 1, max = 50))]
    pub cols: u32,
}

async fn create_draft(
    State(state): State<Arc<AppState>>,
    _user: AuthOrganizer,
    Json(req): Json<CreateDraftRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    if let Err(e) = req.validate() {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("Некорректные параметры формы: {}", e),
        ));
    }

    let draft = state
        .drafts
        .create_layout(req.name, req.address, req.rows, req.cols)
        .await
        .map_err(draft_error)?;

    tracing::info!("Opened layout draft {} ({}x{})", draft.id, draft.grid.rows, draft.grid.cols);
    Ok((StatusCode::CREATED, Json(DraftResponse::from(draft))))
}

// POST /api/venues/{id}/classify
async fn open_classification(
    State(state): State<Arc<AppState>>,
    user: AuthOrganizer,
    Path(venue_id): Path<i64>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    if !state.config.features.enable_classification {
        return Err((
            StatusCode::FORBIDDEN,
            "Разметка мест отключена".to_string(),
        ));
    }
    if venue_id <= 0 {
        return Err((StatusCode::BAD_REQUEST, "id должен быть > 0".to_string()));
    }

    let venue = state
        .venues
        .get_venue(&user.token, venue_id)
        .await
        .map_err(backend_error)?;

    let grid = venue.seat_map.ok_or((
        StatusCode::CONFLICT,
        "У площадки нет схемы зала".to_string(),
    ))?;

    let draft = state
        .drafts
        .open_classification(venue.id, venue.name, venue.address, grid)
        .await
        .map_err(draft_error)?;

    tracing::info!("Opened classification draft {} for venue {}", draft.id, venue_id);
    Ok((StatusCode::CREATED, Json(DraftResponse::from(draft))))
}

// GET /api/drafts/{id}
async fn get_draft(
    State(state): State<Arc<AppState>>,
    _user: AuthOrganizer,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let draft = state.drafts.get(id).await.map_err(draft_error)?;
    Ok((StatusCode::OK, Json(DraftResponse::from(draft))))
}

// DELETE /api/drafts/{id}
async fn discard_draft(
    State(state): State<Arc<AppState>>,
    _user: AuthOrganizer,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    state.drafts.remove(id).await.map_err(draft_error)?;
    Ok((
        StatusCode::OK,
        Json(serde_json::json!({"message": "Черновик удалён"})),
    ))
}

// PATCH /api/drafts/{id}/dimensions
#[derive(Debug, Deserialize, Validate)]
struct DimensionsRequest {
    #[validate(range(min = 1, max = 26))]
    pub rows: u32,
    #[validate(range(min = 1, max = 50))]
    pub cols: u32,
}

async fn set_dimensions(
    State(state): State<Arc<AppState>>,
    _user: AuthOrganizer,
    Path(id): Path<Uuid>,
    Json(req): Json<DimensionsRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    if let Err(e) = req.validate() {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("Некорректные размеры сетки: {}", e),
        ));
    }

    // смена размеров пересоздаёт сетку, прежняя разметка теряется
    let draft = state
        .drafts
        .set_dimensions(id, req.rows, req.cols)
        .await
        .map_err(draft_error)?;

    Ok((StatusCode::OK, Json(DraftResponse::from(draft))))
}

// PATCH /api/drafts/{id}/rows/{row}
#[derive(Debug, Deserialize)]
struct RowLabelRequest {
    pub label: String,
}

async fn set_row_label(
    State(state): State<Arc<AppState>>,
    _user: AuthOrganizer,
    Path((id, row)): Path<(Uuid, u32)>,
    Json(req): Json<RowLabelRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let label = req.label.trim();
    if label.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Подпись ряда не должна быть пустой".to_string(),
        ));
    }

    let draft = state
        .drafts
        .set_row_label(id, row, label)
        .await
        .map_err(draft_error)?;

    Ok((StatusCode::OK, Json(DraftResponse::from(draft))))
}

/* ---------- SEATS ---------- */

// PATCH /api/drafts/{id}/seats/{row}/{col}
async fn cycle_seat(
    State(state): State<Arc<AppState>>,
    _user: AuthOrganizer,
    Path((id, row, col)): Path<(Uuid, u32, u32)>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    if !state.config.features.enable_classification {
        return Err((
            StatusCode::FORBIDDEN,
            "Разметка мест отключена".to_string(),
        ));
    }

    let (seat_type, stats) = state
        .drafts
        .cycle_seat(id, row, col)
        .await
        .map_err(draft_error)?;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "row": row,
            "col": col,
            "type": seat_type,
            "stats": stats,
        })),
    ))
}

// GET /api/drafts/{id}/stats
async fn get_stats(
    State(state): State<Arc<AppState>>,
    _user: AuthOrganizer,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let draft = state.drafts.get(id).await.map_err(draft_error)?;
    Ok((StatusCode::OK, Json(draft.grid.stats())))
}

/* ---------- SUBMIT ---------- */

// POST /api/drafts/{id}/submit
async fn submit_draft(
    State(state): State<Arc<AppState>>,
    user: AuthOrganizer,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let draft = state.drafts.get(id).await.map_err(draft_error)?;

    // снимок сетки уходит как есть; формула вместимости зависит от режима
    // формы: площадь при планировке, число размеченных мест при классификации
    let payload = VenuePayload {
        name: draft.name.clone(),
        address: draft.address.clone(),
        capacity: draft.submit_capacity(),
        seat_map: draft.grid.clone(),
    };

    let (status, venue) = match draft.venue_id {
        None => {
            let venue = state
                .venues
                .create_venue(&user.token, &payload)
                .await
                .map_err(backend_error)?;
            (StatusCode::CREATED, venue)
        }
        Some(venue_id) => {
            let venue = state
                .venues
                .update_venue(&user.token, venue_id, &payload)
                .await
                .map_err(backend_error)?;
            (StatusCode::OK, venue)
        }
    };

    // форма закрыта, черновик больше не нужен
    let _ = state.drafts.remove(id).await;

    tracing::info!(
        "Draft {} submitted as venue {} (capacity {})",
        id,
        venue.id,
        payload.capacity
    );

    Ok((
        status,
        Json(serde_json::json!({
            "message": "Площадка сохранена",
            "venue": venue,
        })),
    ))
}
