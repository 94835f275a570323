//! Inheritable record schemas.

use std::sync::Arc;

use tessera_core::{Attributes, Value};
use tracing::debug;

use crate::error::{SchemaError, SchemaResult};
use crate::field::FieldDescriptor;
use crate::validator::{Batch, RuleValidator, Validator};

/// Storage a schema can populate and validate.
///
/// Implemented by record data stores; plain `Attributes` maps implement it
/// too, which is handy for validating raw input before building a record.
pub trait FieldStore {
    /// Current value of a field, if set.
    fn read_field(&self, name: &str) -> Option<Value>;

    /// Overwrite a field.
    fn write_field(&mut self, name: &str, value: Value);
}

impl FieldStore for Attributes {
    fn read_field(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }

    fn write_field(&mut self, name: &str, value: Value) {
        self.insert(name.to_string(), value);
    }
}

/// An ordered, inheritable set of field descriptors.
///
/// Immutable after construction and shared between every record built from
/// it (`Arc<Schema>`).
#[derive(Debug)]
pub struct Schema {
    name: String,
    is_abstract: bool,
    parent: Option<Arc<Schema>>,
    fields: Vec<FieldDescriptor>,
}

impl Schema {
    /// Start building a schema.
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    pub fn parent(&self) -> Option<&Arc<Schema>> {
        self.parent.as_ref()
    }

    /// Fields declared directly on this schema, in declaration order.
    pub fn local_fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Check if this schema or one of its ancestors declares a field.
    pub fn has_field(&self, name: &str) -> bool {
        self.get_field(name).is_some()
    }

    /// Get a field by name. On override, the most derived definition wins.
    pub fn get_field(&self, name: &str) -> Option<&FieldDescriptor> {
        match self.fields.iter().find(|f| f.name() == name) {
            Some(field) => Some(field),
            None => self.parent.as_ref().and_then(|p| p.get_field(name)),
        }
    }

    /// Collect every field of this schema and its ancestors.
    ///
    /// Parent fields come first in their declaration order. A field
    /// redefined here replaces the parent entry in place; new fields are
    /// appended.
    pub fn collect_fields(&self) -> Vec<&FieldDescriptor> {
        let mut fields = match &self.parent {
            Some(parent) => parent.collect_fields(),
            None => Vec::new(),
        };

        for field in &self.fields {
            match fields.iter().position(|f| f.name() == field.name()) {
                Some(index) => fields[index] = field,
                None => fields.push(field),
            }
        }

        fields
    }

    /// Write every resolved field from `raw` into `target`.
    ///
    /// Fields missing from `raw` are written as null, undeclared keys are
    /// dropped.
    pub fn populate<S: FieldStore + ?Sized>(&self, target: &mut S, raw: &Attributes) -> SchemaResult<()> {
        if self.is_abstract {
            return Err(SchemaError::abstract_schema(&self.name));
        }

        let fields = self.collect_fields();
        debug!(schema = %self.name, fields = fields.len(), "populating instance");

        for field in fields {
            let value = raw.get(field.name()).cloned().unwrap_or(Value::Null);
            target.write_field(field.name(), value);
        }

        Ok(())
    }

    /// Validate `target` with the default rule validator.
    pub fn validate<S: FieldStore + ?Sized>(&self, target: &mut S) -> SchemaResult<()> {
        self.validate_with(target, &RuleValidator)
    }

    /// Validate every resolved field of `target` as one batch.
    ///
    /// On success, validated values are written back for fields that are
    /// not read-only and whose value changed. On failure nothing is written.
    pub fn validate_with<S, V>(&self, target: &mut S, validator: &V) -> SchemaResult<()>
    where
        S: FieldStore + ?Sized,
        V: Validator + ?Sized,
    {
        let fields = self.collect_fields();

        let batch: Batch<'_> = fields
            .iter()
            .map(|field| {
                let value = target.read_field(field.name()).unwrap_or(Value::Null);
                (field.name().to_string(), (value, field.rule()))
            })
            .collect();

        let mut validated = validator.validate_batch(batch).map_err(|failures| {
            debug!(schema = %self.name, failures = failures.len(), "validation failed");
            SchemaError::validation(failures)
        })?;

        for field in fields {
            if field.is_read_only() {
                continue;
            }
            let Some(value) = validated.remove(field.name()) else {
                continue;
            };
            if target.read_field(field.name()).as_ref() != Some(&value) {
                target.write_field(field.name(), value);
            }
        }

        Ok(())
    }
}

/// Builder for a schema.
#[derive(Debug)]
pub struct SchemaBuilder {
    name: String,
    is_abstract: bool,
    parent: Option<Arc<Schema>>,
    fields: Vec<FieldDescriptor>,
}

impl SchemaBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_abstract: false,
            parent: None,
            fields: Vec::new(),
        }
    }

    /// Inherit the fields of `parent`.
    pub fn extends(mut self, parent: Arc<Schema>) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Mark as abstract.
    pub fn abstract_schema(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Add a field.
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Finish building this schema.
    pub fn build(self) -> SchemaResult<Arc<Schema>> {
        if self.name.is_empty() {
            return Err(SchemaError::EmptySchemaName);
        }

        for (i, field) in self.fields.iter().enumerate() {
            if field.name().is_empty() {
                return Err(SchemaError::empty_field_name(&self.name));
            }
            if self.fields[..i].iter().any(|f| f.name() == field.name()) {
                return Err(SchemaError::duplicate_field(&self.name, field.name()));
            }
        }

        Ok(Arc::new(Schema {
            name: self.name,
            is_abstract: self.is_abstract,
            parent: self.parent,
            fields: self.fields,
        }))
    }
}
