use std::cell::RefCell;

use tessera_core::Value;

use super::AssociationEvent;
use crate::emitter::{Emitter, Subscription};
use crate::error::{ModelError, ModelResult};

/// Ordered, indexable association.
#[derive(Debug, Default)]
pub struct ListAssociation {
    items: RefCell<Vec<Value>>,
    emitter: Emitter<AssociationEvent>,
}

impl ListAssociation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.items.borrow().get(index).cloned()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    /// Insert at `index`, shifting later elements right.
    pub fn insert(&self, index: usize, value: impl Into<Value>) -> ModelResult<()> {
        {
            let mut items = self.items.borrow_mut();
            if index > items.len() {
                return Err(ModelError::index_out_of_range(index, items.len()));
            }
            items.insert(index, value.into());
        }
        self.emitter.emit(&AssociationEvent::ListAdd { index });
        Ok(())
    }

    /// Append at the end.
    pub fn push(&self, value: impl Into<Value>) {
        let index = {
            let mut items = self.items.borrow_mut();
            items.push(value.into());
            items.len() - 1
        };
        self.emitter.emit(&AssociationEvent::ListAdd { index });
    }

    /// Replace the element at `index`.
    pub fn set(&self, index: usize, value: impl Into<Value>) -> ModelResult<()> {
        let previous = {
            let mut items = self.items.borrow_mut();
            let len = items.len();
            let slot = items
                .get_mut(index)
                .ok_or_else(|| ModelError::index_out_of_range(index, len))?;
            std::mem::replace(slot, value.into())
        };
        self.emitter
            .emit(&AssociationEvent::ListUpdate { index, previous });
        Ok(())
    }

    /// Remove the element at `index`. Out-of-range indexes are ignored.
    pub fn remove(&self, index: usize) -> Option<Value> {
        let previous = {
            let mut items = self.items.borrow_mut();
            if index >= items.len() {
                return None;
            }
            items.remove(index)
        };
        self.emitter.emit(&AssociationEvent::ListRemove {
            index,
            previous: previous.clone(),
        });
        Some(previous)
    }

    /// Remove every element, last first.
    pub fn clear(&self) {
        while let Some(last) = self.len().checked_sub(1) {
            self.remove(last);
        }
    }

    /// Copy of the current elements.
    pub fn values(&self) -> Vec<Value> {
        self.items.borrow().clone()
    }

    pub fn on_change(&self, listener: impl Fn(&AssociationEvent) + 'static) -> Subscription {
        self.emitter.subscribe(listener)
    }
}
