use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, StatusCode},
};
use std::sync::Arc;

/// Организатор, прошедший в консоль с токеном платформы.
///
/// Консоль токен не проверяет и не хранит — он пробрасывается как есть в
/// сервис площадок, который и принимает решение об авторизации. Здесь
/// отсекаются только анонимные запросы.
#[derive(Debug, Clone)]
pub struct AuthOrganizer {
    pub token: String,
}

// Bearer token extractor
impl FromRequestParts<Arc<crate::AppState>> for AuthOrganizer {
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &Arc<crate::AppState>,
    ) -> Result<Self, Self::Rejection> {
        // Получаем заголовок Authorization
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(StatusCode::UNAUTHORIZED)?;

        // Проверяем что это Bearer auth
        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(StatusCode::UNAUTHORIZED)?
            .trim();

        if token.is_empty() {
            return Err(StatusCode::UNAUTHORIZED);
        }

        Ok(AuthOrganizer {
            token: token.to_string(),
        })
    }
}
