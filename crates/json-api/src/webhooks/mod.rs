//! Processor Webhooks

mod handlers;

pub(crate) use handlers::*;
