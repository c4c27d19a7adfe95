//! Error types for chorus-tui
//!
//! Wraps store errors and terminal IO errors for unified handling.

use thiserror::Error;

/// TUI-specific errors
#[derive(Error, Debug)]
pub enum TuiError {
    /// Store, config or effect error
    #[error("Chorus error: {0}")]
    Chorus(#[from] libchorus::ChorusError),

    /// Terminal/IO error
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Result type for TUI operations
pub type Result<T> = std::result::Result<T, TuiError>;
