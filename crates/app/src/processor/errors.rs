//! Payment processor errors.

use thiserror::Error;

/// Errors that can occur when calling the payment processor.
#[derive(Debug, Error)]
pub enum ProcessorError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The processor answered with a non-2xx status.
    #[error("{message}")]
    Rejected {
        /// HTTP status returned by the processor.
        status: u16,

        /// Processor error message, or the raw body when it had none.
        message: String,
    },

    /// The processor answered 2xx with a body we could not use.
    #[error("unexpected response from payment processor: {0}")]
    UnexpectedResponse(String),
}
