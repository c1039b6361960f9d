//! Authentication

mod errors;
pub mod identity;
mod models;
mod service;

pub use errors::*;
pub use identity::{IdentityProviderClient, IdentityProviderConfig, IdentityProviderError};
pub use models::*;
pub use service::*;
