//! Assertion types and builders for verifying step results.

use tessera_model::{Modification, OperationKind};

use crate::error::{ScenarioError, ScenarioResult};

/// Expectations about one step: its outcome and what it recorded.
#[derive(Default)]
pub struct Assertion {
    // Outcome assertions
    pub error: Option<String>,
    pub error_pattern: Option<String>,

    // Log assertions
    pub recorded: Option<usize>,
    pub operations: Option<Vec<OperationKind>>,
    pub association: Option<String>,

    // Custom assertion function
    #[allow(clippy::type_complexity)]
    pub custom: Option<Box<dyn Fn(&[Modification]) -> bool>>,
}

impl std::fmt::Debug for Assertion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assertion")
            .field("error", &self.error)
            .field("error_pattern", &self.error_pattern)
            .field("recorded", &self.recorded)
            .field("operations", &self.operations)
            .field("association", &self.association)
            .field("custom", &self.custom.is_some())
            .finish()
    }
}

impl Assertion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Verify a step outcome and the modifications it recorded.
    ///
    /// `result` carries the rendered error chain on failure.
    pub fn verify(
        &self,
        step: &str,
        result: &Result<(), String>,
        recorded: &[Modification],
    ) -> ScenarioResult<()> {
        if let Some(ref expected) = self.error {
            match result {
                Err(msg) if msg.contains(expected) => {}
                Err(msg) => {
                    return Err(ScenarioError::assertion_failed(
                        step,
                        format!("expected error containing '{}', got: {}", expected, msg),
                    ))
                }
                Ok(()) => {
                    return Err(ScenarioError::assertion_failed(
                        step,
                        format!("expected error containing '{}', but step succeeded", expected),
                    ))
                }
            }
        }

        if let Some(ref pattern) = self.error_pattern {
            let re = regex_lite::Regex::new(pattern).map_err(|e| {
                ScenarioError::assertion_failed(step, format!("invalid regex pattern: {}", e))
            })?;
            match result {
                Err(msg) if re.is_match(msg) => {}
                Err(msg) => {
                    return Err(ScenarioError::assertion_failed(
                        step,
                        format!("expected error matching '{}', got: {}", pattern, msg),
                    ))
                }
                Ok(()) => {
                    return Err(ScenarioError::assertion_failed(
                        step,
                        format!("expected error matching '{}', but step succeeded", pattern),
                    ))
                }
            }
        }

        if self.error.is_none() && self.error_pattern.is_none() {
            if let Err(msg) = result {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("step failed: {}", msg),
                ));
            }
        }

        if let Some(expected) = self.recorded {
            if recorded.len() != expected {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!(
                        "expected {} modification(s), got {}: {:?}",
                        expected,
                        recorded.len(),
                        recorded
                    ),
                ));
            }
        }

        if let Some(ref expected) = self.operations {
            let actual: Vec<OperationKind> = recorded.iter().map(|m| m.operation()).collect();
            if &actual != expected {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected operations {:?}, got {:?}", expected, actual),
                ));
            }
        }

        if let Some(ref expected) = self.association {
            if let Some(other) = recorded
                .iter()
                .find(|m| m.association_name() != Some(expected.as_str()))
            {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected only '{}' modifications, got {}", expected, other),
                ));
            }
        }

        if let Some(ref custom) = self.custom {
            if !custom(recorded) {
                return Err(ScenarioError::assertion_failed(
                    step,
                    "custom assertion failed",
                ));
            }
        }

        Ok(())
    }
}

/// Builder for fluent assertion construction.
pub struct AssertionBuilder {
    assertion: Assertion,
}

impl AssertionBuilder {
    pub fn new() -> Self {
        Self {
            assertion: Assertion::new(),
        }
    }

    pub fn build(self) -> Assertion {
        self.assertion
    }

    // ========== Log assertions ==========

    /// Assert that the step recorded exactly N modifications.
    pub fn recorded(mut self, n: usize) -> Self {
        self.assertion.recorded = Some(n);
        self
    }

    /// Assert that the step recorded nothing.
    pub fn silent(self) -> Self {
        self.recorded(0)
    }

    /// Assert the operation kinds recorded, in order.
    pub fn operations(mut self, ops: &[OperationKind]) -> Self {
        self.assertion.operations = Some(ops.to_vec());
        self
    }

    /// Assert that every recorded modification targets the named
    /// association.
    pub fn on(mut self, association: impl Into<String>) -> Self {
        self.assertion.association = Some(association.into());
        self
    }

    // ========== Error assertions ==========

    /// Assert that the step fails with an error containing the given string.
    pub fn error(mut self, contains: impl Into<String>) -> Self {
        self.assertion.error = Some(contains.into());
        self
    }

    /// Assert that the step fails with an error matching the given regex.
    pub fn error_matches(mut self, pattern: impl Into<String>) -> Self {
        self.assertion.error_pattern = Some(pattern.into());
        self
    }

    // ========== Advanced ==========

    pub fn assert_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&[Modification]) -> bool + 'static,
    {
        self.assertion.custom = Some(Box::new(f));
        self
    }
}

impl Default for AssertionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_add() -> Modification {
        Modification::ListAdd {
            association: "addresses".into(),
            index: 0,
        }
    }

    #[test]
    fn test_recorded_count_mismatch() {
        let assertion = AssertionBuilder::new().recorded(2).build();
        let err = assertion.verify("push", &Ok(()), &[list_add()]).unwrap_err();
        assert!(err.to_string().contains("expected 2 modification(s), got 1"));
    }

    #[test]
    fn test_expected_error() {
        let assertion = AssertionBuilder::new().error("IndexOutOfRange").build();
        assert!(assertion
            .verify("set", &Err("IndexOutOfRange: Index out of range: 3 (length 0)".into()), &[])
            .is_ok());
        assert!(assertion.verify("set", &Ok(()), &[]).is_err());
    }

    #[test]
    fn test_association_filter() {
        let assertion = AssertionBuilder::new().on("rights").build();
        assert!(assertion.verify("push", &Ok(()), &[list_add()]).is_err());
    }
}
