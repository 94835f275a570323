//! Per-record field storage.

use std::cell::RefCell;

use tessera_core::{Attributes, Value};

use crate::emitter::{Emitter, Subscription};
use crate::error::{ModelError, ModelResult};

/// Notification emitted on every field write.
#[derive(Debug, Clone, PartialEq)]
pub struct DataEvent {
    /// Name of the written field.
    pub field: String,
    /// Value before the write; `None` when the field was absent.
    pub previous: Option<Value>,
}

/// The field name -> value store of one record.
#[derive(Debug, Default)]
pub struct ModelData {
    values: RefCell<Attributes>,
    emitter: Emitter<DataEvent>,
}

impl ModelData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a field is set.
    pub fn has(&self, field: &str) -> bool {
        self.values.borrow().contains_key(field)
    }

    /// Current value of a field.
    pub fn get(&self, field: &str) -> Option<Value> {
        self.values.borrow().get(field).cloned()
    }

    /// Current value of a field that is expected to be set.
    pub fn require(&self, field: &str) -> ModelResult<Value> {
        self.get(field)
            .ok_or_else(|| ModelError::unknown_field(field))
    }

    /// Set a field and emit an update carrying the previous value.
    ///
    /// The update is emitted on every write, including the first one.
    pub fn set(&self, field: impl Into<String>, value: impl Into<Value>) {
        let field = field.into();
        let previous = self.values.borrow_mut().insert(field.clone(), value.into());
        self.emitter.emit(&DataEvent { field, previous });
    }

    /// Remove a field. Emits an update only when the field was set.
    pub fn remove(&self, field: &str) -> Option<Value> {
        let previous = self.values.borrow_mut().remove(field);
        if previous.is_some() {
            self.emitter.emit(&DataEvent {
                field: field.to_string(),
                previous: previous.clone(),
            });
        }
        previous
    }

    /// Field names in key order.
    pub fn keys(&self) -> Vec<String> {
        self.values.borrow().keys().cloned().collect()
    }

    /// Copy of every field.
    pub fn snapshot(&self) -> Attributes {
        self.values.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.emitter.listener_count()
    }

    /// Register a listener for field updates.
    pub fn on_change(&self, listener: impl Fn(&DataEvent) + 'static) -> Subscription {
        self.emitter.subscribe(listener)
    }
}
