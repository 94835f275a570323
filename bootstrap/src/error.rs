//! Bootstrap error types.

use tessera_core::{attrs, Attributes, BoxError, Describe};
use thiserror::Error;

/// Result type for bootstrap operations.
pub type BootstrapResult<T> = Result<T, BootstrapError>;

/// Errors raised while starting or stopping an application.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Init unit '{unit}' failed to initialize")]
    Init {
        unit: String,
        #[source]
        source: BoxError,
    },

    #[error("Bootstrap callback failed")]
    Callback {
        #[source]
        source: BoxError,
    },

    #[error("Init unit '{unit}' failed to clean up")]
    Cleanup {
        unit: String,
        #[source]
        source: BoxError,
    },

    #[error("Invalid configuration: {field}: {reason}")]
    InvalidConfig { field: String, reason: String },

    #[error("Failed to parse configuration")]
    Config(#[from] serde_json::Error),

    #[error("Failed to install log subscriber")]
    Logging {
        #[source]
        source: BoxError,
    },
}

impl BootstrapError {
    pub fn init(unit: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Init {
            unit: unit.into(),
            source: source.into(),
        }
    }

    pub fn callback(source: impl Into<BoxError>) -> Self {
        Self::Callback {
            source: source.into(),
        }
    }

    pub fn cleanup(unit: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Cleanup {
            unit: unit.into(),
            source: source.into(),
        }
    }

    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn logging(source: impl Into<BoxError>) -> Self {
        Self::Logging {
            source: source.into(),
        }
    }
}

impl Describe for BootstrapError {
    fn name(&self) -> &'static str {
        match self {
            Self::Init { .. } => "InitError",
            Self::Callback { .. } => "CallbackError",
            Self::Cleanup { .. } => "CleanupError",
            Self::InvalidConfig { .. } | Self::Config(_) => "ConfigError",
            Self::Logging { .. } => "LoggingError",
        }
    }

    fn details(&self) -> Attributes {
        match self {
            Self::Init { unit, .. } | Self::Cleanup { unit, .. } => attrs! { "unit" => unit.as_str() },
            Self::InvalidConfig { field, .. } => attrs! { "field" => field.as_str() },
            Self::Config(e) => attrs! { "line" => e.line() as i64, "column" => e.column() as i64 },
            Self::Callback { .. } | Self::Logging { .. } => Attributes::new(),
        }
    }
}
