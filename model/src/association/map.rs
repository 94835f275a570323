use std::cell::RefCell;
use std::collections::BTreeMap;

use tessera_core::Value;

use super::AssociationEvent;
use crate::emitter::{Emitter, Subscription};

/// String-keyed association.
#[derive(Debug, Default)]
pub struct MapAssociation {
    entries: RefCell<BTreeMap<String, Value>>,
    emitter: Emitter<AssociationEvent>,
}

impl MapAssociation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Set `key`. Emits an add for a new key, an update otherwise.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let previous = self.entries.borrow_mut().insert(key.clone(), value.into());
        let event = match previous {
            Some(previous) => AssociationEvent::MapUpdate { key, previous },
            None => AssociationEvent::MapAdd { key },
        };
        self.emitter.emit(&event);
    }

    /// Remove `key`. Absent keys are ignored.
    pub fn remove(&self, key: &str) -> Option<Value> {
        let previous = self.entries.borrow_mut().remove(key)?;
        self.emitter.emit(&AssociationEvent::MapRemove {
            key: key.to_string(),
            previous: previous.clone(),
        });
        Some(previous)
    }

    pub fn clear(&self) {
        for key in self.keys() {
            self.remove(&key);
        }
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries.borrow().keys().cloned().collect()
    }

    pub fn values(&self) -> Vec<Value> {
        self.entries.borrow().values().cloned().collect()
    }

    pub fn entries(&self) -> Vec<(String, Value)> {
        self.entries
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn on_change(&self, listener: impl Fn(&AssociationEvent) + 'static) -> Subscription {
        self.emitter.subscribe(listener)
    }
}
