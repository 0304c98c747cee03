pub mod budget;
pub mod client;
pub mod types;

pub use budget::ApiBudget;
pub use client::{PlacesClient, PlacesError};
