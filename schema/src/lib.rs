//! Tessera Schema
//!
//! Typed, inheritable record schemas.
//!
//! Responsibilities:
//! - Describe fields (name, validation rule, read-only flag)
//! - Resolve field lookup and collection across a parent chain
//! - Populate and validate record storage through `FieldStore`
//! - Provide the `Validator` seam and the rule-based engine behind it

mod error;
mod field;
mod rule;
mod schema;
mod validator;

pub use error::{SchemaError, SchemaResult};
pub use field::FieldDescriptor;
pub use rule::{Rule, ValueType};
pub use schema::{FieldStore, Schema, SchemaBuilder};
pub use validator::{Batch, FailureReason, FieldFailure, RuleValidator, Validator};
