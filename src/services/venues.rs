//! venues.rs
//!
//! Сервисный слой для взаимодействия с удалённым сервисом площадок.
//!
//! Ключевые компоненты:
//! 1.  **CircuitBreaker**: защита от постоянных запросов к лежащему бэкенду.
//!     Консоль — тонкий клиент, без бэкенда она всё равно ничего не
//!     сохранит, поэтому при серии сбоев запросы блокируются сразу.
//! 2.  **VenueServiceClient**: инкапсулирует все вызовы API площадок:
//!     поиск, чтение, создание и обновление. Токен организатора
//!     пробрасывается в каждый запрос как есть — проверяет его бэкенд.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::Context;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::{BackendConfig, CircuitBreakerConfig};
use crate::models::{Venue, VenuePayload, VenueSummary};

/// Состояния автоматического выключателя.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    /// Нормальный режим, запросы разрешены.
    Closed,
    /// Бэкенд считается лежащим, запросы блокируются до истечения паузы.
    Open,
    /// Пробный режим: пропускается один запрос для проверки восстановления.
    HalfOpen,
}

#[derive(Debug)]
struct BreakerInner {
    state: CircuitState,
    failures: u32,
    opened_at: Option<Instant>,
}

#[derive(Debug)]
pub struct CircuitBreaker {
    inner: Mutex<BreakerInner>,
    failure_threshold: u32,
    cooldown: Duration,
}

impl CircuitBreaker {
    pub fn new(failure_threshold: u32, cooldown_seconds: u64) -> Self {
        Self {
            inner: Mutex::new(BreakerInner {
                state: CircuitState::Closed,
                failures: 0,
                opened_at: None,
            }),
            failure_threshold,
            cooldown: Duration::from_secs(cooldown_seconds),
        }
    }

    /// Разрешён ли следующий запрос. Из Open по истечении паузы переходит
    /// в HalfOpen и пропускает один пробный запрос.
    pub fn can_execute(&self) -> bool {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        match inner.state {
            CircuitState::Closed | CircuitState::HalfOpen => true,
            CircuitState::Open => {
                let waited = inner
                    .opened_at
                    .map(|t| t.elapsed() >= self.cooldown)
                    .unwrap_or(true);
                if waited {
                    inner.state = CircuitState::HalfOpen;
                    info!("Circuit breaker transitioning to HalfOpen state");
                }
                waited
            }
        }
    }

    pub fn record_success(&self) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if inner.state == CircuitState::HalfOpen {
            info!("Circuit breaker recovered - transitioning to Closed state");
        }
        inner.state = CircuitState::Closed;
        inner.failures = 0;
        inner.opened_at = None;
    }

    pub fn record_failure(&self) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        match inner.state {
            CircuitState::Closed => {
                inner.failures += 1;
                if inner.failures >= self.failure_threshold {
                    inner.state = CircuitState::Open;
                    inner.opened_at = Some(Instant::now());
                    error!(
                        "Circuit breaker OPENED - {} failures reached threshold {}",
                        inner.failures, self.failure_threshold
                    );
                }
            }
            CircuitState::HalfOpen => {
                inner.state = CircuitState::Open;
                inner.opened_at = Some(Instant::now());
                warn!("Circuit breaker test failed - returning to Open state");
            }
            CircuitState::Open => {}
        }
    }

    pub fn state(&self) -> CircuitState {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).state
    }
}

#[derive(Debug, Error)]
pub enum VenueServiceError {
    /// Выключатель разомкнут, запрос даже не отправлялся.
    #[error("venue service is temporarily unavailable")]
    Unavailable,
    #[error("venue service request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("venue service returned {status}: {message}")]
    Backend { status: u16, message: String },
}

impl VenueServiceError {
    /// Считается ли ошибка сбоем бэкенда для выключателя.
    /// Клиентские 4xx — это наши ошибки, цепь из-за них не размыкаем.
    fn trips_breaker(&self) -> bool {
        match self {
            VenueServiceError::Transport(_) => true,
            VenueServiceError::Backend { status, .. } => *status >= 500,
            VenueServiceError::Unavailable => false,
        }
    }
}

/// Клиент API сервиса площадок.
#[derive(Clone)]
pub struct VenueServiceClient {
    base_url: String,
    http_client: reqwest::Client,
    circuit_breaker: Arc<CircuitBreaker>,
}

impl VenueServiceClient {
    /// Создает и конфигурирует клиент на основе настроек приложения.
    pub fn from_config(
        backend: &BackendConfig,
        breaker: &CircuitBreakerConfig,
    ) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(backend.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            base_url: backend.base_url.trim_end_matches('/').to_string(),
            http_client,
            circuit_breaker: Arc::new(CircuitBreaker::new(
                breaker.failure_threshold,
                breaker.timeout_seconds,
            )),
        })
    }

    /// Выполняет операцию, пропуская её через выключатель.
    async fn execute<F, T>(&self, operation: F) -> Result<T, VenueServiceError>
    where
        F: std::future::Future<Output = Result<T, VenueServiceError>>,
    {
        if !self.circuit_breaker.can_execute() {
            warn!("Circuit breaker is OPEN - blocking venue service request");
            return Err(VenueServiceError::Unavailable);
        }

        match operation.await {
            Ok(result) => {
                self.circuit_breaker.record_success();
                Ok(result)
            }
            Err(e) => {
                if e.trips_breaker() {
                    error!("Venue service request failed: {:?}", e);
                    self.circuit_breaker.record_failure();
                }
                Err(e)
            }
        }
    }

    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, VenueServiceError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json::<T>().await?)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(VenueServiceError::Backend {
                status: status.as_u16(),
                message,
            })
        }
    }

    pub async fn search_venues(
        &self,
        token: &str,
        query: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<VenueSummary>, VenueServiceError> {
        let operation = async {
            let response = self
                .http_client
                .get(format!("{}/api/v1/venues", self.base_url))
                .bearer_auth(token)
                .query(&[
                    ("query", query.to_string()),
                    ("limit", limit.to_string()),
                    ("offset", offset.to_string()),
                ])
                .send()
                .await?;
            Self::decode(response).await
        };

        self.execute(operation).await
    }

    pub async fn get_venue(&self, token: &str, id: i64) -> Result<Venue, VenueServiceError> {
        let operation = async {
            let response = self
                .http_client
                .get(format!("{}/api/v1/venues/{}", self.base_url, id))
                .bearer_auth(token)
                .send()
                .await?;
            Self::decode(response).await
        };

        self.execute(operation).await
    }

    /// Создание площадки: сюда приходит снимок планировочной формы,
    /// capacity уже посчитана по площади сетки.
    pub async fn create_venue(
        &self,
        token: &str,
        payload: &VenuePayload,
    ) -> Result<Venue, VenueServiceError> {
        info!(
            "Creating venue '{}' with capacity {}",
            payload.name, payload.capacity
        );

        let operation = async {
            let response = self
                .http_client
                .post(format!("{}/api/v1/venues", self.base_url))
                .bearer_auth(token)
                .json(payload)
                .send()
                .await?;
            Self::decode(response).await
        };

        self.execute(operation).await
    }

    /// Обновление площадки после классификации: capacity здесь — число
    /// размеченных мест, не площадь.
    pub async fn update_venue(
        &self,
        token: &str,
        id: i64,
        payload: &VenuePayload,
    ) -> Result<Venue, VenueServiceError> {
        info!(
            "Updating venue {} with capacity {}",
            id, payload.capacity
        );

        let operation = async {
            let response = self
                .http_client
                .put(format!("{}/api/v1/venues/{}", self.base_url, id))
                .bearer_auth(token)
                .json(payload)
                .send()
                .await?;
            Self::decode(response).await
        };

        self.execute(operation).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breaker_opens_after_threshold() {
        let breaker = CircuitBreaker::new(3, 60);
        assert!(breaker.can_execute());

        breaker.record_failure();
        breaker.record_failure();
        assert_eq!(breaker.state(), CircuitState::Closed);

        breaker.record_failure();
        assert_eq!(breaker.state(), CircuitState::Open);
        assert!(!breaker.can_execute());
    }

    #[test]
    fn breaker_half_open_after_cooldown_then_recovers() {
        let breaker = CircuitBreaker::new(1, 0);
        breaker.record_failure();
        assert_eq!(breaker.state(), CircuitState::Open);

        // пауза нулевая: следующий запрос пробный
        assert!(breaker.can_execute());
        assert_eq!(breaker.state(), CircuitState::HalfOpen);

        breaker.record_success();
        assert_eq!(breaker.state(), CircuitState::Closed);
    }

    #[test]
    fn failed_probe_reopens_the_breaker() {
        let breaker = CircuitBreaker::new(1, 0);
        breaker.record_failure();
        assert!(breaker.can_execute()); // HalfOpen
        breaker.record_failure();
        assert_eq!(breaker.state(), CircuitState::Open);
    }

    #[test]
    fn success_resets_failure_count() {
        let breaker = CircuitBreaker::new(2, 60);
        breaker.record_failure();
        breaker.record_success();
        breaker.record_failure();
        // после сброса одна ошибка порога не достигает
        assert_eq!(breaker.state(), CircuitState::Closed);
    }

    #[test]
    fn client_errors_do_not_trip_breaker() {
        let not_found = VenueServiceError::Backend {
            status: 404,
            message: "no such venue".into(),
        };
        let server_error = VenueServiceError::Backend {
            status: 502,
            message: "bad gateway".into(),
        };
        assert!(!not_found.trips_breaker());
        assert!(server_error.trips_breaker());
    }
}
