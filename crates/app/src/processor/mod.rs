//! Payment processor integration

mod errors;
pub mod events;
mod models;
pub mod signature;
mod stripe;

pub use errors::ProcessorError;
pub use events::{EventKind, ProcessorEvent};
pub use models::*;
pub use signature::{SignatureError, WebhookVerifier};
pub use stripe::*;
