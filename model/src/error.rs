//! Model error types.

use tessera_core::{attrs, Attributes, Describe};
use tessera_schema::{FailureReason, FieldFailure, SchemaError};
use thiserror::Error;

use crate::kind::AssociationKind;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised by records, associations and observers.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Validation and schema failures.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Index out of range: {index} (length {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Abstract method not implemented: {method}")]
    NotImplemented { method: String },

    #[error("Unknown field: {field}")]
    UnknownField { field: String },

    #[error("Cannot modify read-only field: {field}")]
    ReadOnlyField { field: String },

    #[error("Unknown association: {name}")]
    UnknownAssociation { name: String },

    #[error("Association {name} is a {actual}, expected a {expected}")]
    AssociationKindMismatch {
        name: String,
        expected: AssociationKind,
        actual: AssociationKind,
    },

    #[error("Association name must not be empty")]
    EmptyAssociationName,

    #[error("Observed instance was dropped")]
    InstanceDropped,

    #[error("Cannot undo {modification} against {target}")]
    TargetMismatch { modification: String, target: String },

    #[error("Failed to undo modification #{position} ({description})")]
    Undo {
        position: usize,
        description: String,
        #[source]
        source: Box<ModelError>,
    },
}

impl ModelError {
    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    pub fn not_implemented(method: impl Into<String>) -> Self {
        Self::NotImplemented {
            method: method.into(),
        }
    }

    pub fn unknown_field(field: impl Into<String>) -> Self {
        Self::UnknownField {
            field: field.into(),
        }
    }

    pub fn read_only_field(field: impl Into<String>) -> Self {
        Self::ReadOnlyField {
            field: field.into(),
        }
    }

    pub fn unknown_association(name: impl Into<String>) -> Self {
        Self::UnknownAssociation { name: name.into() }
    }

    pub fn association_kind_mismatch(
        name: impl Into<String>,
        expected: AssociationKind,
        actual: AssociationKind,
    ) -> Self {
        Self::AssociationKindMismatch {
            name: name.into(),
            expected,
            actual,
        }
    }

    /// A single-field validation failure.
    pub fn invalid_field(field: impl Into<String>, reason: FailureReason) -> Self {
        Self::Schema(SchemaError::validation(vec![FieldFailure::new(field, reason)]))
    }

    pub fn target_mismatch(modification: impl Into<String>, target: impl Into<String>) -> Self {
        Self::TargetMismatch {
            modification: modification.into(),
            target: target.into(),
        }
    }

    pub fn undo(position: usize, description: impl Into<String>, source: ModelError) -> Self {
        Self::Undo {
            position,
            description: description.into(),
            source: Box::new(source),
        }
    }

    /// Returns true for validation failures.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Schema(SchemaError::Validation { .. }))
    }
}

impl Describe for ModelError {
    fn name(&self) -> &'static str {
        match self {
            Self::Schema(e) => e.name(),
            Self::IndexOutOfRange { .. } => "IndexOutOfRange",
            Self::NotImplemented { .. } => "NotImplementedError",
            Self::UnknownField { .. } => "UnknownFieldError",
            Self::ReadOnlyField { .. } => "ReadOnlyFieldError",
            Self::UnknownAssociation { .. } => "UnknownAssociationError",
            Self::AssociationKindMismatch { .. } => "AssociationKindMismatch",
            Self::EmptyAssociationName => "EmptyNameError",
            Self::InstanceDropped => "InstanceDropped",
            Self::TargetMismatch { .. } => "TargetMismatch",
            Self::Undo { .. } => "UndoError",
        }
    }

    fn details(&self) -> Attributes {
        match self {
            Self::Schema(e) => e.details(),
            Self::IndexOutOfRange { index, len } => {
                attrs! { "index" => *index as i64, "length" => *len as i64 }
            }
            Self::NotImplemented { method } => attrs! { "method" => method.as_str() },
            Self::UnknownField { field } | Self::ReadOnlyField { field } => {
                attrs! { "field" => field.as_str() }
            }
            Self::UnknownAssociation { name } => attrs! { "association" => name.as_str() },
            Self::AssociationKindMismatch {
                name,
                expected,
                actual,
            } => attrs! {
                "association" => name.as_str(),
                "expected" => expected.to_string(),
                "actual" => actual.to_string(),
            },
            Self::EmptyAssociationName | Self::InstanceDropped => Attributes::new(),
            Self::TargetMismatch {
                modification,
                target,
            } => attrs! {
                "modification" => modification.as_str(),
                "target" => target.as_str(),
            },
            Self::Undo {
                position,
                description,
                ..
            } => attrs! {
                "position" => *position as i64,
                "modification" => description.as_str(),
            },
        }
    }

    fn described_source(&self) -> Option<&dyn Describe> {
        match self {
            Self::Schema(e) => e.described_source(),
            Self::Undo { source, .. } => Some(&**source as &dyn Describe),
            _ => None,
        }
    }
}
