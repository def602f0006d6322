//! grid.rs
//!
//! Модель схемы зала: прямоугольная сетка мест с подписями рядов.
//!
//! Ключевые свойства:
//! 1.  Сетка всегда плотная: `rows x cols` клеток, ни одной пропущенной.
//! 2.  Подпись места всегда пересчитывается из текущей подписи ряда,
//!     устаревшая подпись никогда не переживает правку ряда.
//! 3.  Вместимость нигде не хранится — она выводится из сетки, и формула
//!     зависит от режима формы (планировка или классификация).
//!
//! Все операции локальны и синхронны, ошибки возможны только при нарушении
//! предусловий (выход за границы, нулевые размеры).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::seat::{Seat, SeatType};

/// Режим формы, владеющей сеткой. Определяет формулу вместимости.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridMode {
    /// Определение размеров зала: классификации ещё нет, считается площадь.
    Layout,
    /// Разметка мест: считаются только классифицированные (не empty) клетки.
    Classification,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid dimensions must be positive, got {rows}x{cols}")]
    EmptyDimensions { rows: u32, cols: u32 },
    #[error("row {row} is out of bounds for a grid with {rows} rows")]
    RowOutOfBounds { row: u32, rows: u32 },
    #[error("seat ({row}, {col}) is out of bounds for a {rows}x{cols} grid")]
    SeatOutOfBounds {
        row: u32,
        col: u32,
        rows: u32,
        cols: u32,
    },
    #[error("seat matrix does not match the declared {rows}x{cols} shape")]
    MalformedSeatMatrix { rows: u32, cols: u32 },
    #[error("expected {rows} row labels, got {got}")]
    MalformedRowLabels { rows: u32, got: usize },
}

/// Подпись ряда по умолчанию: A..Z, затем AA, AB, ... (биективная base-26).
pub fn default_row_label(index: u32) -> String {
    let mut label = String::new();
    let mut n = index + 1;
    while n > 0 {
        n -= 1;
        label.insert(0, (b'A' + (n % 26) as u8) as char);
        n /= 26;
    }
    label
}

/// Схема зала. Сериализованная форма — ровно тот `seatMap`, который
/// уходит внутри запроса create/update площадки.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatGrid {
    pub rows: u32,
    pub cols: u32,
    pub seats: Vec<Vec<Seat>>,
    #[serde(rename = "rowLabels")]
    pub row_labels: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeatStats {
    pub regular: u32,
    pub vip: u32,
    pub empty: u32,
    /// Доступные к продаже места: regular + vip, проходы не считаются.
    pub total: u32,
}

impl SeatGrid {
    /// Создаёт плотную сетку, все клетки `empty`, подписи рядов по умолчанию.
    pub fn create(rows: u32, cols: u32) -> Result<SeatGrid, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::EmptyDimensions { rows, cols });
        }

        let row_labels: Vec<String> = (0..rows).map(default_row_label).collect();
        let seats = (0..rows)
            .map(|r| {
                (0..cols)
                    .map(|c| Seat::empty(r, c, &row_labels[r as usize]))
                    .collect()
            })
            .collect();

        Ok(SeatGrid {
            rows,
            cols,
            seats,
            row_labels,
        })
    }

    /// Меняет подпись ряда и пересчитывает подписи всех его мест.
    /// Типы мест и остальные ряды не трогает.
    pub fn set_row_label(&mut self, row: u32, label: &str) -> Result<(), GridError> {
        if row >= self.rows {
            return Err(GridError::RowOutOfBounds {
                row,
                rows: self.rows,
            });
        }

        let label = label.to_uppercase();
        self.row_labels[row as usize] = label;
        self.relabel_row(row as usize);
        Ok(())
    }

    /// Переключает тип места по циклу regular -> vip -> empty -> regular.
    /// Возвращает новый тип.
    pub fn cycle_seat(&mut self, row: u32, col: u32) -> Result<SeatType, GridError> {
        if row >= self.rows || col >= self.cols {
            return Err(GridError::SeatOutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }

        let seat = &mut self.seats[row as usize][col as usize];
        seat.seat_type = seat.seat_type.next();
        Ok(seat.seat_type)
    }

    pub fn seat(&self, row: u32, col: u32) -> Result<&Seat, GridError> {
        if row >= self.rows || col >= self.cols {
            return Err(GridError::SeatOutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(&self.seats[row as usize][col as usize])
    }

    pub fn stats(&self) -> SeatStats {
        let mut stats = SeatStats {
            regular: 0,
            vip: 0,
            empty: 0,
            total: 0,
        };
        for seat in self.seats.iter().flatten() {
            match seat.seat_type {
                SeatType::Regular => stats.regular += 1,
                SeatType::Vip => stats.vip += 1,
                SeatType::Empty => stats.empty += 1,
            }
        }
        stats.total = stats.regular + stats.vip;
        stats
    }

    /// Вместимость зала. В режиме планировки — площадь сетки, классификация
    /// игнорируется; в режиме классификации — количество размеченных мест.
    pub fn capacity(&self, mode: GridMode) -> u32 {
        match mode {
            GridMode::Layout => self.rows * self.cols,
            GridMode::Classification => self
                .seats
                .iter()
                .flatten()
                .filter(|s| s.seat_type.is_bookable())
                .count() as u32,
        }
    }

    /// Проверяет форму сетки, полученной извне (например, из бэкенда при
    /// редактировании существующей площадки).
    pub fn validate(&self) -> Result<(), GridError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GridError::EmptyDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.seats.len() != self.rows as usize
            || self.seats.iter().any(|r| r.len() != self.cols as usize)
        {
            return Err(GridError::MalformedSeatMatrix {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.row_labels.len() != self.rows as usize {
            return Err(GridError::MalformedRowLabels {
                rows: self.rows,
                got: self.row_labels.len(),
            });
        }
        Ok(())
    }

    /// Приводит чужую сетку к инвариантам модели: проверяет форму и заново
    /// проставляет координаты и подписи мест из позиции в матрице. Типы
    /// мест сохраняются как есть.
    pub fn normalize(&mut self) -> Result<(), GridError> {
        self.validate()?;
        for (r, row) in self.seats.iter_mut().enumerate() {
            let row_label = &self.row_labels[r];
            for (c, seat) in row.iter_mut().enumerate() {
                seat.row = r as u32;
                seat.col = c as u32;
                seat.label = format!("{}{}", row_label, c as u32 + 1);
            }
        }
        Ok(())
    }

    fn relabel_row(&mut self, row: usize) {
        let row_label = &self.row_labels[row];
        for (c, seat) in self.seats[row].iter_mut().enumerate() {
            seat.label = format!("{}{}", row_label, c as u32 + 1);
        }
    }
}
