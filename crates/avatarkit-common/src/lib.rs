//! # AvatarKit Common
//!
//! Common error types and logging configuration for AvatarKit tools.
//!
//! ## Features
//!
//! - Unified error type with categories
//! - Logging configuration and setup
//! - Result extension trait

use thiserror::Error;

pub mod logging;

pub use logging::{init_logging, LogConfig, LogFormat};

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Unified error type for AvatarKit.
#[derive(Error, Debug)]
pub enum AvatarKitError {
    /// Markup could not be used as an avatar document.
    #[error("Parse error: {message}")]
    Parse {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Configuration file or option errors.
    #[error("Config error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Output encoding or serialization errors.
    #[error("Render error: {message}")]
    Render {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// I/O errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Resource not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl AvatarKitError {
    /// Create a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            source: None,
        }
    }

    /// Create a parse error with source.
    pub fn parse_with_source<E: std::error::Error + Send + Sync + 'static>(
        message: impl Into<String>,
        source: E,
    ) -> Self {
        Self::Parse {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a config error with source.
    pub fn config_with_source<E: std::error::Error + Send + Sync + 'static>(
        message: impl Into<String>,
        source: E,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get the error category for reporting.
    pub fn category(&self) -> &'static str {
        match self {
            AvatarKitError::Parse { .. } => "parse",
            AvatarKitError::Config { .. } => "config",
            AvatarKitError::Render { .. } => "render",
            AvatarKitError::Io(_) => "io",
            AvatarKitError::NotFound(_) => "not_found",
            AvatarKitError::InvalidArgument(_) => "invalid_argument",
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            AvatarKitError::InvalidArgument(_) | AvatarKitError::Config { .. } => 2,
            _ => 1,
        }
    }
}

/// Result type alias for AvatarKit operations.
pub type Result<T> = std::result::Result<T, AvatarKitError>;

/// Extension trait for Result.
pub trait ResultExt<T> {
    /// Wrap the error as a render error with context.
    fn context(self, message: impl Into<String>) -> Result<T>;
}

impl<T, E: std::error::Error + Send + Sync + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| AvatarKitError::Render {
            message: format!("{}: {}", message.into(), e),
            source: Some(Box::new(e)),
        })
    }
}
