use serde::{Deserialize, Serialize};

/// Классификация одного места в схеме зала.
///
/// `Empty` — проход или пустая клетка, не продаётся.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatType {
    Empty,
    Regular,
    Vip,
}

impl SeatType {
    /// Следующий тип в фиксированном цикле regular -> vip -> empty -> regular.
    pub fn next(self) -> SeatType {
        match self {
            SeatType::Regular => SeatType::Vip,
            SeatType::Vip => SeatType::Empty,
            SeatType::Empty => SeatType::Regular,
        }
    }

    pub fn is_bookable(self) -> bool {
        !matches!(self, SeatType::Empty)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub row: u32,
    pub col: u32,
    #[serde(rename = "type")]
    pub seat_type: SeatType,
    pub label: String,
}

impl Seat {
    pub fn empty(row: u32, col: u32, row_label: &str) -> Self {
        Seat {
            row,
            col,
            seat_type: SeatType::Empty,
            label: format!("{}{}", row_label, col + 1),
        }
    }
}
