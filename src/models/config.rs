//! Configuration model loaded from external sources.

use std::path::PathBuf;

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// Root directory served under `/uploads`.
    pub upload_dir: PathBuf,
    /// Origins allowed by CORS. Empty means any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}
