//! Orders

pub mod errors;
pub mod records;
mod repository;

pub use errors::OrdersRepositoryError;
pub use repository::*;
