//! Request payloads accepted by the apartment routes.

pub mod apartments;
