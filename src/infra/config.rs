//! Centralized configuration (environment variables + defaults).

use std::path::PathBuf;

/// Default listen port when `PORT` is unset or not a valid port.
pub const DEFAULT_PORT: u16 = 3000;

/// Listen port (optional `PORT` override).
pub fn port() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT)
}

/// On-disk location of the SQLite store. Fixed, relative to the working directory.
pub fn database_path() -> PathBuf {
    PathBuf::from("data").join("supplement.db")
}

/// Directory holding the built client bundle.
pub fn static_dir() -> PathBuf {
    PathBuf::from("client").join("dist")
}

/// Default tracing filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "info,tower_http=info,axum=info"
}
