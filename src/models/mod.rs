pub mod grid;
pub mod seat;
pub mod venue;

pub use grid::{GridError, GridMode, SeatGrid, SeatStats};
pub use seat::{Seat, SeatType};
pub use venue::{Venue, VenuePayload, VenueSummary};
