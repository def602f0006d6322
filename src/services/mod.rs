pub mod venues;

pub use venues::{VenueServiceClient, VenueServiceError};
