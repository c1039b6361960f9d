//! Payrelay Domain Concerns

pub mod orders;
pub mod payments;
