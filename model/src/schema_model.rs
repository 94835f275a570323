//! Association-free records driven entirely by a schema.

use std::sync::Arc;

use tessera_core::{Attributes, Value};
use tessera_schema::{Schema, Validator};

use crate::error::{ModelError, ModelResult};
use crate::record::{CoreAccess, Model, ModelCore};

/// A record whose fields are exactly the fields of its schema.
///
/// Fields are reachable only through [`get`](Self::get) and
/// [`set`](Self::set), so a read-only field keeps its populated value:
///
/// ```compile_fail
/// use tessera_model::{CoreAccess, Model, SchemaModel};
///
/// fn overwrite_id(model: &SchemaModel) {
///     model.core(CoreAccess::new()).data().set("id", 99);
/// }
/// ```
#[derive(Debug)]
pub struct SchemaModel {
    schema: Arc<Schema>,
    core: ModelCore,
}

impl SchemaModel {
    /// Populate a new record from `raw`. Fails for abstract schemas.
    pub fn new(schema: Arc<Schema>, raw: Option<Attributes>) -> ModelResult<Self> {
        let mut core = ModelCore::new();
        schema.populate(&mut core, &raw.unwrap_or_default())?;
        Ok(Self { schema, core })
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn get(&self, field: &str) -> ModelResult<Value> {
        if !self.schema.has_field(field) {
            return Err(ModelError::unknown_field(field));
        }
        Ok(self.core.data().get(field).unwrap_or_default())
    }

    /// Write a declared, writable field.
    pub fn set(&self, field: &str, value: impl Into<Value>) -> ModelResult<()> {
        match self.schema.get_field(field) {
            None => Err(ModelError::unknown_field(field)),
            Some(descriptor) if descriptor.is_read_only() => Err(ModelError::read_only_field(field)),
            Some(_) => {
                self.core.data().set(field, value);
                Ok(())
            }
        }
    }

    /// Validate every field, writing coerced values back.
    pub fn validate(&mut self) -> ModelResult<()> {
        self.schema.validate(&mut self.core)?;
        Ok(())
    }

    pub fn validate_with<V: Validator + ?Sized>(&mut self, validator: &V) -> ModelResult<()> {
        self.schema.validate_with(&mut self.core, validator)?;
        Ok(())
    }
}

impl Model for SchemaModel {
    fn core(&self, _: CoreAccess) -> &ModelCore {
        &self.core
    }
}
