//! Payments

pub mod amount;
pub mod errors;
pub mod models;
mod service;

pub use errors::{PaymentsServiceError, WebhookError};
pub use service::*;
