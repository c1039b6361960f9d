//! Payment initiation and reconciliation domain, plus its integrations.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod processor;
pub mod secrets;

#[cfg(test)]
mod test;
