use serde::Deserialize;
use std::env;

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub backend: BackendConfig,
    pub drafts: DraftConfig,
    pub circuit_breaker: CircuitBreakerConfig,
    pub features: FeatureFlags,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
}

// Настройки удалённого сервиса площадок
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

// Настройки черновиков форм
#[derive(Debug, Clone, Deserialize)]
pub struct DraftConfig {
    pub ttl_minutes: i64,
    pub cleanup_interval_seconds: u64,
}

// Настройки Circuit Breaker
#[derive(Debug, Clone, Deserialize)]
pub struct CircuitBreakerConfig {
    pub failure_threshold: u32,
    pub timeout_seconds: u64,
}

// Feature flags для включения/выключения функциональности
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    pub enable_classification: bool,
    pub enable_draft_cleanup: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            app: AppConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "8000".to_string())
                    .parse()
                    .expect("PORT must be a valid number"),
                environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
                rust_log: env::var("RUST_LOG")
                    .unwrap_or_else(|_| "venue_console=debug,tower_http=debug".to_string()),
            },
            backend: BackendConfig {
                base_url: env::var("VENUE_SERVICE_URL").expect("VENUE_SERVICE_URL must be set"),
                timeout_seconds: env::var("VENUE_SERVICE_TIMEOUT_SECONDS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()
                    .expect("VENUE_SERVICE_TIMEOUT_SECONDS must be a valid number"),
            },
            drafts: DraftConfig {
                ttl_minutes: env::var("DRAFT_TTL_MINUTES")
                    .unwrap_or_else(|_| "120".to_string())
                    .parse()
                    .expect("DRAFT_TTL_MINUTES must be a valid number"),
                cleanup_interval_seconds: env::var("DRAFT_CLEANUP_INTERVAL_SECONDS")
                    .unwrap_or_else(|_| "300".to_string())
                    .parse()
                    .expect("DRAFT_CLEANUP_INTERVAL_SECONDS must be a valid number"),
            },
            circuit_breaker: CircuitBreakerConfig {
                failure_threshold: env::var("CIRCUIT_BREAKER_FAILURE_THRESHOLD")
                    .unwrap_or_else(|_| "5".to_string())
                    .parse()
                    .expect("CIRCUIT_BREAKER_FAILURE_THRESHOLD must be a valid number"),
                timeout_seconds: env::var("CIRCUIT_BREAKER_TIMEOUT_SECONDS")
                    .unwrap_or_else(|_| "60".to_string())
                    .parse()
                    .expect("CIRCUIT_BREAKER_TIMEOUT_SECONDS must be a valid number"),
            },
            features: FeatureFlags {
                enable_classification: env::var("ENABLE_CLASSIFICATION")
                    .unwrap_or_else(|_| "true".to_string())
                    .parse()
                    .expect("ENABLE_CLASSIFICATION must be true or false"),
                enable_draft_cleanup: env::var("ENABLE_DRAFT_CLEANUP")
                    .unwrap_or_else(|_| "true".to_string())
                    .parse()
                    .expect("ENABLE_DRAFT_CLEANUP must be true or false"),
            },
        }
    }
}
