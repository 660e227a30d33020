//! Startup failures
//!
//! The per-tick loop never fails; everything here is raised while loading
//! configuration or wiring the geometry collaborator, and reported once.

/// Errors raised while setting up a game
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("geometry collaborator unavailable: {0}")]
    GeometryUnavailable(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
}
