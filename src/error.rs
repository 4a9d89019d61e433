//! Error types for the simulation core

use thiserror::Error;

/// Errors raised by the simulation core and its configuration layer
#[derive(Error, Debug)]
pub enum SimError {
    /// Bounds with zero or negative area
    #[error("invalid bounds: x [{x_min}, {x_max}], y [{y_min}, {y_max}]")]
    InvalidBounds {
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
    },
    /// Zero-length segment has no defined normal
    #[error("degenerate segment: both endpoints at ({x}, {y})")]
    DegenerateSegment { x: f64, y: f64 },
    /// Configuration rejected by validation
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("config file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SimResult<T> = Result<T, SimError>;
