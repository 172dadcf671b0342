//! Domain aggregates exposed by the apartment service layer.

pub mod apartment;
pub mod types;
