//! # Error Types
//!
//! Custom error types for Motion Bridge using `thiserror`.

use thiserror::Error;

/// Main error type for Motion Bridge
#[derive(Debug, Error)]
pub enum MotionBridgeError {
    /// Virtual device registration or write errors
    #[error("virtual device error: {0}")]
    Device(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Motion Bridge
pub type Result<T> = std::result::Result<T, MotionBridgeError>;
