//! Field validation.
//!
//! `Validator` is the seam between schemas/records and the engine that
//! checks values. `RuleValidator` is the engine shipped with Tessera; it
//! interprets `Rule`s, coercing loosely typed input where the rule allows.

use std::collections::BTreeMap;
use std::fmt;

use regex_lite::Regex;
use tessera_core::{Attributes, Value};
use thiserror::Error;

use crate::rule::{Rule, ValueType};

/// Why a single value failed its rule.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FailureReason {
    #[error("value is required")]
    Required,

    #[error("expected {expected}, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("value {value} is out of range{range_desc}")]
    OutOfRange { value: String, range_desc: String },

    #[error("length {length} is outside [{min}..{max}]")]
    Length {
        length: usize,
        min: String,
        max: String,
    },

    #[error("value does not match pattern {pattern}")]
    PatternMismatch { pattern: String },

    #[error("invalid pattern {pattern}: {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("value {value} is not one of the allowed values")]
    NotAllowed { value: String },
}

/// A failure attributed to one field of a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFailure {
    pub field: String,
    pub reason: FailureReason,
}

impl FieldFailure {
    pub fn new(field: impl Into<String>, reason: FailureReason) -> Self {
        Self {
            field: field.into(),
            reason,
        }
    }
}

impl fmt::Display for FieldFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// A keyed batch of values to validate, each with its rule.
pub type Batch<'r> = BTreeMap<String, (Value, &'r Rule)>;

/// Validates values against rules.
pub trait Validator {
    /// Validate one value, returning the validated (possibly coerced) value.
    fn validate(&self, value: &Value, rule: &Rule) -> Result<Value, FailureReason>;

    /// Validate a keyed batch. Either every value passes and the validated
    /// set is returned, or every failure is reported.
    fn validate_batch(&self, batch: Batch<'_>) -> Result<Attributes, Vec<FieldFailure>> {
        let mut validated = Attributes::new();
        let mut failures = Vec::new();

        for (field, (value, rule)) in batch {
            match self.validate(&value, rule) {
                Ok(value) => {
                    validated.insert(field, value);
                }
                Err(reason) => failures.push(FieldFailure::new(field, reason)),
            }
        }

        if failures.is_empty() {
            Ok(validated)
        } else {
            Err(failures)
        }
    }
}

/// Validator interpreting `Rule`s.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleValidator;

impl RuleValidator {
    pub fn new() -> Self {
        Self
    }
}

impl Validator for RuleValidator {
    fn validate(&self, value: &Value, rule: &Rule) -> Result<Value, FailureReason> {
        if value.is_null() {
            if let Some(default) = &rule.default {
                return Ok(default.clone());
            }
            if rule.required && !rule.nullable {
                return Err(FailureReason::Required);
            }
            return Ok(Value::Null);
        }

        let value = if rule.convert {
            coerce(value, rule.value_type)
        } else {
            value.clone()
        };

        if !rule.value_type.accepts(&value) {
            return Err(FailureReason::TypeMismatch {
                expected: rule.value_type.name(),
                actual: value.type_name(),
            });
        }

        validate_range(&value, &rule.min, &rule.max)?;
        validate_length(&value, rule.length_min, rule.length_max)?;

        if let Some(pattern) = &rule.pattern {
            validate_pattern(&value, pattern)?;
        }

        if let Some(allowed) = &rule.allowed_values {
            if !allowed.contains(&value) {
                return Err(FailureReason::NotAllowed {
                    value: value.to_string(),
                });
            }
        }

        Ok(value)
    }
}

/// Convert loosely typed input toward the expected type. Values that
/// cannot be converted are returned unchanged and fail the type check.
fn coerce(value: &Value, expected: ValueType) -> Value {
    match (expected, value) {
        (ValueType::Int, Value::Float(f)) if is_integral(*f) => Value::Int(*f as i64),
        (ValueType::Int, Value::String(s)) => match s.trim().parse::<i64>() {
            Ok(i) => Value::Int(i),
            Err(_) => value.clone(),
        },
        (ValueType::Float, Value::String(s)) => match s.trim().parse::<f64>() {
            Ok(f) => Value::Float(f),
            Err(_) => value.clone(),
        },
        (ValueType::Bool, Value::String(s)) => match s.as_str() {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => value.clone(),
        },
        _ => value.clone(),
    }
}

/// A float that converts to `i64` without rounding or saturating.
fn is_integral(f: f64) -> bool {
    f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64
}

/// Validate range constraints (min/max) for a value.
fn validate_range(
    value: &Value,
    min: &Option<Value>,
    max: &Option<Value>,
) -> Result<(), FailureReason> {
    if let Some(min_val) = min {
        if !value.gte(min_val) {
            let range_desc = match max {
                Some(max_val) => format!(" [{}..{}]", min_val, max_val),
                None => format!(" [>= {}]", min_val),
            };
            return Err(FailureReason::OutOfRange {
                value: value.to_string(),
                range_desc,
            });
        }
    }

    if let Some(max_val) = max {
        if !value.lte(max_val) {
            let range_desc = match min {
                Some(min_val) => format!(" [{}..{}]", min_val, max_val),
                None => format!(" [<= {}]", max_val),
            };
            return Err(FailureReason::OutOfRange {
                value: value.to_string(),
                range_desc,
            });
        }
    }

    Ok(())
}

fn validate_length(
    value: &Value,
    min: Option<usize>,
    max: Option<usize>,
) -> Result<(), FailureReason> {
    if min.is_none() && max.is_none() {
        return Ok(());
    }

    let length = match value {
        Value::String(s) => s.chars().count(),
        Value::List(items) => items.len(),
        Value::Map(map) => map.len(),
        _ => return Ok(()),
    };

    let too_short = min.map_or(false, |min| length < min);
    let too_long = max.map_or(false, |max| length > max);
    if too_short || too_long {
        return Err(FailureReason::Length {
            length,
            min: min.map_or_else(|| "0".to_string(), |m| m.to_string()),
            max: max.map_or_else(|| "*".to_string(), |m| m.to_string()),
        });
    }

    Ok(())
}

fn validate_pattern(value: &Value, pattern: &str) -> Result<(), FailureReason> {
    let Some(text) = value.as_str() else {
        return Ok(());
    };

    let regex = Regex::new(pattern).map_err(|e| FailureReason::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })?;

    if regex.is_match(text) {
        Ok(())
    } else {
        Err(FailureReason::PatternMismatch {
            pattern: pattern.to_string(),
        })
    }
}
