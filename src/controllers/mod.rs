pub mod drafts;
pub mod venues;

use axum::http::StatusCode;
use axum::Router;
use std::sync::Arc;

use crate::services::VenueServiceError;

pub fn routes() -> Router<Arc<crate::AppState>> {
    Router::new()
        .merge(drafts::routes())
        .merge(venues::routes())
}

/* ---------- helpers ---------- */

// Ответы сервиса площадок переводим в наши статусы: 404 пробрасываем,
// остальные ошибки бэкенда не должны выглядеть как наши 500
pub(crate) fn backend_error(e: VenueServiceError) -> (StatusCode, String) {
    match e {
        VenueServiceError::Unavailable => (
            StatusCode::SERVICE_UNAVAILABLE,
            "Сервис площадок временно недоступен".to_string(),
        ),
        VenueServiceError::Transport(err) => {
            tracing::error!("venue service transport error: {:?}", err);
            (
                StatusCode::BAD_GATEWAY,
                "Не удалось связаться с сервисом площадок".to_string(),
            )
        }
        VenueServiceError::Backend { status, message } => {
            if status == 404 {
                return (StatusCode::NOT_FOUND, "Площадка не найдена".to_string());
            }
            tracing::error!("venue service returned {}: {}", status, message);
            (
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                "Сервис площадок вернул ошибку".to_string(),
            )
        }
    }
}
