pub mod config;
pub mod controllers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod store;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::services::VenueServiceClient;
use crate::store::DraftStore;

// Shared state для всего приложения
pub struct AppState {
    pub config: config::Config,
    pub venues: VenueServiceClient,
    pub drafts: DraftStore,
}

impl AppState {
    pub fn new(config: config::Config) -> anyhow::Result<Arc<Self>> {
        let venues = VenueServiceClient::from_config(&config.backend, &config.circuit_breaker)?;
        let drafts = DraftStore::new(config.drafts.ttl_minutes);

        Ok(Arc::new(Self {
            config,
            venues,
            drafts,
        }))
    }
}

/// Собирает роутер консоли. Вынесено из main, чтобы интеграционные тесты
/// поднимали ровно то же приложение.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Billetter Venue Console v1.0" }))
        .route("/health", get(|| async { "OK" }))
        // Mount the routes from the controllers module
        .nest("/api", controllers::routes())
        // Pass the application state to the router
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // консоль живёт в браузере на другом origin
        .layer(CorsLayer::permissive())
}
