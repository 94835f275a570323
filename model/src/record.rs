//! Records: a data store plus named associations.

use std::collections::BTreeMap;
use std::rc::Rc;

use tessera_core::{Attributes, Value};
use tessera_schema::{FieldStore, Rule, Validator};
use tracing::debug;

use crate::association::{
    Association, AssociationSnapshot, ListAssociation, MapAssociation, SetAssociation,
};
use crate::data::ModelData;
use crate::error::{ModelError, ModelResult};
use crate::kind::AssociationKind;

/// The private state of one record.
///
/// Owns the data store and the association registry. Implementers reach it
/// through [`Model::core`]; observers use it to subscribe.
#[derive(Debug, Default)]
pub struct ModelCore {
    data: Rc<ModelData>,
    associations: BTreeMap<String, Association>,
}

impl ModelCore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The record's data store.
    pub fn data(&self) -> &Rc<ModelData> {
        &self.data
    }

    /// Declare an association.
    ///
    /// Declaring a name again replaces the earlier association, so a derived
    /// record can override what its parent declared.
    pub fn create_association(
        &mut self,
        name: impl Into<String>,
        kind: AssociationKind,
    ) -> ModelResult<Association> {
        let name = name.into();
        if name.is_empty() {
            return Err(ModelError::EmptyAssociationName);
        }

        let association = Association::new(kind);
        if let Some(previous) = self.associations.insert(name.clone(), association.clone()) {
            debug!(association = %name, from = %previous.kind(), to = %kind, "association overridden");
        }
        Ok(association)
    }

    /// Look up an association by name.
    pub fn association(&self, name: &str) -> ModelResult<&Association> {
        self.associations
            .get(name)
            .ok_or_else(|| ModelError::unknown_association(name))
    }

    pub fn list(&self, name: &str) -> ModelResult<&ListAssociation> {
        let association = self.association(name)?;
        association.as_list().ok_or_else(|| {
            ModelError::association_kind_mismatch(name, AssociationKind::List, association.kind())
        })
    }

    pub fn map(&self, name: &str) -> ModelResult<&MapAssociation> {
        let association = self.association(name)?;
        association.as_map().ok_or_else(|| {
            ModelError::association_kind_mismatch(name, AssociationKind::Map, association.kind())
        })
    }

    pub fn set(&self, name: &str) -> ModelResult<&SetAssociation> {
        let association = self.association(name)?;
        association.as_set().ok_or_else(|| {
            ModelError::association_kind_mismatch(name, AssociationKind::Set, association.kind())
        })
    }

    /// Every declared association, by name.
    pub fn associations(&self) -> &BTreeMap<String, Association> {
        &self.associations
    }

    /// Validate `raw[field]` against `rule` and store the result.
    pub fn populate_field<V: Validator + ?Sized>(
        &self,
        validator: &V,
        raw: &Attributes,
        field: &str,
        rule: &Rule,
    ) -> ModelResult<()> {
        let value = raw.get(field).cloned().unwrap_or(Value::Null);
        let validated = validator
            .validate(&value, rule)
            .map_err(|reason| ModelError::invalid_field(field, reason))?;
        self.data.set(field, validated);
        Ok(())
    }

    /// Copy of the full field and association state.
    pub fn snapshot(&self) -> ModelSnapshot {
        ModelSnapshot {
            data: self.data.snapshot(),
            associations: self
                .associations
                .iter()
                .map(|(name, association)| (name.clone(), association.snapshot()))
                .collect(),
        }
    }
}

impl FieldStore for ModelCore {
    fn read_field(&self, name: &str) -> Option<Value> {
        self.data.get(name)
    }

    fn write_field(&mut self, name: &str, value: Value) {
        self.data.set(name, value);
    }
}

/// Point-in-time copy of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSnapshot {
    pub data: Attributes,
    pub associations: BTreeMap<String, AssociationSnapshot>,
}

/// Permission to reach a record's [`ModelCore`] through [`Model::core`].
///
/// Only this crate creates one, so code holding a record can read and write
/// it only through the methods the record type chooses to expose.
///
/// ```compile_fail
/// use tessera_model::CoreAccess;
///
/// let access = CoreAccess::new();
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CoreAccess(());

impl CoreAccess {
    pub(crate) fn new() -> Self {
        Self(())
    }
}

/// Anything backed by a [`ModelCore`].
pub trait Model {
    /// The core this record owns. Called by observers and snapshots.
    fn core(&self, access: CoreAccess) -> &ModelCore;

    fn snapshot(&self) -> ModelSnapshot {
        self.core(CoreAccess::new()).snapshot()
    }
}

/// A record type built from raw input.
///
/// Implementers provide `populate`, which validates raw fields into the
/// data store and declares associations. Derived records call their parent's
/// `populate` first.
pub trait Record: Model + Sized {
    /// Fill a freshly allocated core from raw input.
    fn populate(core: &mut ModelCore, raw: &Attributes) -> ModelResult<()> {
        let _ = (core, raw);
        Err(ModelError::not_implemented("populate"))
    }

    /// Wrap a populated core.
    fn from_core(core: ModelCore) -> Self;

    /// Build a record. Missing input is treated as an empty map.
    fn create(raw: Option<Attributes>) -> ModelResult<Self> {
        let raw = raw.unwrap_or_default();
        let mut core = ModelCore::new();
        Self::populate(&mut core, &raw)?;
        Ok(Self::from_core(core))
    }
}
