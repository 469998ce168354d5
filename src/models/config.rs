//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Server settings shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    /// Directory holding one SQLite database per domain/environment.
    pub database_dir: String,
}
