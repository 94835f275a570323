use std::cell::RefCell;

use tessera_core::Value;

use super::AssociationEvent;
use crate::emitter::{Emitter, Subscription};

/// Association with equality-based membership.
///
/// Membership uses [`Value::same`], so a NaN float can be found and removed
/// again. Iteration follows insertion order.
#[derive(Debug, Default)]
pub struct SetAssociation {
    members: RefCell<Vec<Value>>,
    emitter: Emitter<AssociationEvent>,
}

impl SetAssociation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, object: &Value) -> bool {
        self.members.borrow().iter().any(|member| member.same(object))
    }

    pub fn len(&self) -> usize {
        self.members.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.borrow().is_empty()
    }

    /// Add `object`. Returns false, emitting nothing, if already present.
    pub fn add(&self, object: impl Into<Value>) -> bool {
        let object = object.into();
        {
            let mut members = self.members.borrow_mut();
            if members.iter().any(|member| member.same(&object)) {
                return false;
            }
            members.push(object.clone());
        }
        self.emitter.emit(&AssociationEvent::SetAdd { object });
        true
    }

    /// Remove `object`. Returns false, emitting nothing, if absent.
    pub fn remove(&self, object: &Value) -> bool {
        let removed = {
            let mut members = self.members.borrow_mut();
            match members.iter().position(|member| member.same(object)) {
                Some(position) => members.remove(position),
                None => return false,
            }
        };
        self.emitter
            .emit(&AssociationEvent::SetRemove { object: removed });
        true
    }

    pub fn clear(&self) {
        for object in self.values() {
            self.remove(&object);
        }
    }

    pub fn values(&self) -> Vec<Value> {
        self.members.borrow().clone()
    }

    pub fn on_change(&self, listener: impl Fn(&AssociationEvent) + 'static) -> Subscription {
        self.emitter.subscribe(listener)
    }
}
