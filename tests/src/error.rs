//! Error types for the scenario runner.

use tessera_model::ModelError;
use thiserror::Error;

/// Result type for scenario operations.
pub type ScenarioResult<T> = Result<T, ScenarioError>;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("Scenario '{scenario}': failed to build record")]
    Setup {
        scenario: String,
        #[source]
        source: ModelError,
    },

    #[error("Step '{step}': {message}")]
    AssertionFailed { step: String, message: String },

    #[error("Scenario '{scenario}': rollback failed")]
    Rollback {
        scenario: String,
        #[source]
        source: ModelError,
    },
}

impl ScenarioError {
    pub fn setup(scenario: impl Into<String>, source: ModelError) -> Self {
        Self::Setup {
            scenario: scenario.into(),
            source,
        }
    }

    pub fn assertion_failed(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            step: step.into(),
            message: message.into(),
        }
    }

    pub fn rollback(scenario: impl Into<String>, source: ModelError) -> Self {
        Self::Rollback {
            scenario: scenario.into(),
            source,
        }
    }
}
