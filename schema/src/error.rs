//! Schema error types.

use tessera_core::{attrs, Attributes, Describe, Value};
use thiserror::Error;

use crate::validator::FieldFailure;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur while building schemas or applying them to records.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Validation failed for {} field(s): {}", failures.len(), summarize(failures))]
    Validation { failures: Vec<FieldFailure> },

    #[error("Cannot populate an instance from abstract schema: {schema}")]
    AbstractSchema { schema: String },

    #[error("Duplicate field name: {field} in schema {schema}")]
    DuplicateField { schema: String, field: String },

    #[error("Field name must not be empty in schema {schema}")]
    EmptyFieldName { schema: String },

    #[error("Schema name must not be empty")]
    EmptySchemaName,
}

impl SchemaError {
    pub fn validation(failures: Vec<FieldFailure>) -> Self {
        Self::Validation { failures }
    }

    pub fn abstract_schema(schema: impl Into<String>) -> Self {
        Self::AbstractSchema {
            schema: schema.into(),
        }
    }

    pub fn duplicate_field(schema: impl Into<String>, field: impl Into<String>) -> Self {
        Self::DuplicateField {
            schema: schema.into(),
            field: field.into(),
        }
    }

    pub fn empty_field_name(schema: impl Into<String>) -> Self {
        Self::EmptyFieldName {
            schema: schema.into(),
        }
    }

    /// Per-field failures carried by a validation error.
    pub fn failures(&self) -> &[FieldFailure] {
        match self {
            Self::Validation { failures } => failures,
            _ => &[],
        }
    }
}

impl Describe for SchemaError {
    fn name(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "ValidationError",
            Self::AbstractSchema { .. } => "AbstractSchemaError",
            Self::DuplicateField { .. } => "DuplicateFieldError",
            Self::EmptyFieldName { .. } | Self::EmptySchemaName => "EmptyNameError",
        }
    }

    fn details(&self) -> Attributes {
        match self {
            Self::Validation { failures } => {
                let failures = failures
                    .iter()
                    .map(|f| {
                        Value::from(attrs! {
                            "field" => f.field.as_str(),
                            "reason" => f.reason.to_string(),
                        })
                    })
                    .collect::<Vec<_>>();
                attrs! { "failures" => failures }
            }
            Self::AbstractSchema { schema } | Self::EmptyFieldName { schema } => {
                attrs! { "schema" => schema.as_str() }
            }
            Self::DuplicateField { schema, field } => {
                attrs! { "schema" => schema.as_str(), "field" => field.as_str() }
            }
            Self::EmptySchemaName => Attributes::new(),
        }
    }
}

fn summarize(failures: &[FieldFailure]) -> String {
    failures
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
