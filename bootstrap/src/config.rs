//! Bootstrap and logging configuration.

use serde::{Deserialize, Serialize};

use crate::error::{BootstrapError, BootstrapResult};

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Multi-line, human-readable.
    #[default]
    Pretty,
    /// Single-line, human-readable.
    Compact,
    /// One JSON object per event.
    Json,
}

/// Configuration for the log subscriber.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Application name attached to the startup event.
    pub name: String,
    /// `EnvFilter` directive, e.g. `"info"` or `"tessera_model=trace,info"`.
    pub level: String,
    pub format: LogFormat,
    /// Include the event target (module path) in output.
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            name: "tessera".to_string(),
            level: "info".to_string(),
            format: LogFormat::Pretty,
            with_target: true,
        }
    }
}

impl LogConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_target(mut self, with_target: bool) -> Self {
        self.with_target = with_target;
        self
    }

    pub fn validate(&self) -> BootstrapResult<()> {
        if self.name.is_empty() {
            return Err(BootstrapError::invalid_config("log.name", "must not be empty"));
        }
        if self.level.trim().is_empty() {
            return Err(BootstrapError::invalid_config("log.level", "must not be empty"));
        }
        Ok(())
    }
}

/// Top-level bootstrap configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    pub log: LogConfig,
    /// When set, only units with these names are started.
    pub units: Option<Vec<String>>,
}

impl BootstrapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON document.
    pub fn from_json(source: &str) -> BootstrapResult<Self> {
        let config: Self = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_log(mut self, log: LogConfig) -> Self {
        self.log = log;
        self
    }

    pub fn with_units<I, S>(mut self, units: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.units = Some(units.into_iter().map(Into::into).collect());
        self
    }

    pub fn validate(&self) -> BootstrapResult<()> {
        self.log.validate()?;
        if let Some(units) = &self.units {
            if units.iter().any(|unit| unit.is_empty()) {
                return Err(BootstrapError::invalid_config("units", "unit names must not be empty"));
            }
        }
        Ok(())
    }

    /// Whether the unit filter admits `name`.
    pub fn allows(&self, name: &str) -> bool {
        self.units
            .as_ref()
            .map_or(true, |units| units.iter().any(|unit| unit == name))
    }
}
