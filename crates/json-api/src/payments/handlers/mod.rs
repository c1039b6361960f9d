//! Payment Handlers

pub(crate) mod create_intent;
