pub mod error;
pub mod hotels;

pub use error::AppError;
