use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::grid::SeatGrid;

/// Площадка, как её отдаёт сервис площадок.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    pub capacity: u32,
    #[serde(rename = "seatMap", default)]
    pub seat_map: Option<SeatGrid>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<NaiveDateTime>,
}

/// Тело запроса create/update площадки. `seat_map` вкладывается как есть,
/// `capacity` вычисляется формой в момент отправки.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenuePayload {
    pub name: String,
    pub address: Option<String>,
    pub capacity: u32,
    #[serde(rename = "seatMap")]
    pub seat_map: SeatGrid,
}

/// Строка в результатах поиска площадок.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueSummary {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    pub capacity: u32,
}
