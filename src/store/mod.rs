//! Хранилище открытых форм площадок.
//!
//! Каждая форма (черновик) монопольно владеет своей сеткой: все мутации
//! выполняются целиком под write-блокировкой, параллельного изменения
//! одного черновика не бывает. Черновики живут только в памяти — на
//! бэкенд уходит финальный снимок при submit.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::models::{GridError, GridMode, SeatGrid, SeatStats, SeatType};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("draft not found")]
    NotFound,
    #[error("seat classification is not available on a layout draft")]
    ClassificationNotAllowed,
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Одна открытая форма площадки.
#[derive(Debug, Clone, Serialize)]
pub struct VenueDraft {
    pub id: Uuid,
    pub name: String,
    pub address: Option<String>,
    /// `Some` — форма открыта по существующей площадке (режим классификации).
    #[serde(rename = "venueId")]
    pub venue_id: Option<i64>,
    /// Флаг возможностей формы: планировка не умеет размечать места.
    #[serde(rename = "canClassify")]
    pub can_classify: bool,
    pub grid: SeatGrid,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl VenueDraft {
    pub fn mode(&self) -> GridMode {
        if self.can_classify {
            GridMode::Classification
        } else {
            GridMode::Layout
        }
    }

    /// Вместимость, которую форма отправит на бэкенд прямо сейчас.
    pub fn submit_capacity(&self) -> u32 {
        self.grid.capacity(self.mode())
    }
}

pub struct DraftStore {
    drafts: RwLock<HashMap<Uuid, VenueDraft>>,
    ttl: Duration,
}

impl DraftStore {
    pub fn new(ttl_minutes: i64) -> Self {
        Self {
            drafts: RwLock::new(HashMap::new()),
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    /// Открывает форму создания площадки: планировочный режим, пустая сетка.
    pub async fn create_layout(
        &self,
        name: String,
        address: Option<String>,
        rows: u32,
        cols: u32,
    ) -> Result<VenueDraft, DraftError> {
        let grid = SeatGrid::create(rows, cols)?;
        let now = Utc::now();
        let draft = VenueDraft {
            id: Uuid::new_v4(),
            name,
            address,
            venue_id: None,
            can_classify: false,
            grid,
            created_at: now,
            updated_at: now,
        };

        self.drafts.write().await.insert(draft.id, draft.clone());
        Ok(draft)
    }

    /// Открывает форму классификации по сетке существующей площадки.
    /// Чужая сетка приводится к инвариантам модели (подписи пересчитываются).
    pub async fn open_classification(
        &self,
        venue_id: i64,
        name: String,
        address: Option<String>,
        mut grid: SeatGrid,
    ) -> Result<VenueDraft, DraftError> {
        grid.normalize()?;
        let now = Utc::now();
        let draft = VenueDraft {
            id: Uuid::new_v4(),
            name,
            address,
            venue_id: Some(venue_id),
            can_classify: true,
            grid,
            created_at: now,
            updated_at: now,
        };

        self.drafts.write().await.insert(draft.id, draft.clone());
        Ok(draft)
    }

    pub async fn get(&self, id: Uuid) -> Result<VenueDraft, DraftError> {
        self.drafts
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(DraftError::NotFound)
    }

    /// Смена размеров пересоздаёт сетку целиком: прежняя разметка теряется.
    pub async fn set_dimensions(
        &self,
        id: Uuid,
        rows: u32,
        cols: u32,
    ) -> Result<VenueDraft, DraftError> {
        let grid = SeatGrid::create(rows, cols)?;
        let mut drafts = self.drafts.write().await;
        let draft = drafts.get_mut(&id).ok_or(DraftError::NotFound)?;
        draft.grid = grid;
        draft.updated_at = Utc::now();
        Ok(draft.clone())
    }

    pub async fn set_row_label(
        &self,
        id: Uuid,
        row: u32,
        label: &str,
    ) -> Result<VenueDraft, DraftError> {
        let mut drafts = self.drafts.write().await;
        let draft = drafts.get_mut(&id).ok_or(DraftError::NotFound)?;
        draft.grid.set_row_label(row, label)?;
        draft.updated_at = Utc::now();
        Ok(draft.clone())
    }

    /// Переключение типа места. Доступно только формам классификации.
    pub async fn cycle_seat(
        &self,
        id: Uuid,
        row: u32,
        col: u32,
    ) -> Result<(SeatType, SeatStats), DraftError> {
        let mut drafts = self.drafts.write().await;
        let draft = drafts.get_mut(&id).ok_or(DraftError::NotFound)?;
        if !draft.can_classify {
            return Err(DraftError::ClassificationNotAllowed);
        }
        let seat_type = draft.grid.cycle_seat(row, col)?;
        draft.updated_at = Utc::now();
        Ok((seat_type, draft.grid.stats()))
    }

    pub async fn remove(&self, id: Uuid) -> Result<VenueDraft, DraftError> {
        self.drafts
            .write()
            .await
            .remove(&id)
            .ok_or(DraftError::NotFound)
    }

    /// Удаляет брошенные формы, к которым давно не прикасались.
    pub async fn purge_expired(&self) -> usize {
        let cutoff = Utc::now() - self.ttl;
        let mut drafts = self.drafts.write().await;
        let before = drafts.len();
        drafts.retain(|_, d| d.updated_at > cutoff);
        let purged = before - drafts.len();
        if purged > 0 {
            info!("Purged {} expired venue drafts", purged);
        }
        purged
    }
}
