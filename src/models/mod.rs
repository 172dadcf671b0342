//! Database models shared across the apartment repository.

pub mod apartment;
#[cfg(feature = "server")]
pub mod config;
