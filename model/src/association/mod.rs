//! Mutable collections attached to a record.
//!
//! Three kinds exist (list, map, set). Each emits typed add/update/remove
//! notifications that an observer turns into modifications.

mod list;
mod map;
mod set;

pub use list::ListAssociation;
pub use map::MapAssociation;
pub use set::SetAssociation;

use std::rc::{Rc, Weak};

use tessera_core::Value;

use crate::emitter::Subscription;
use crate::kind::{AssociationKind, OperationKind};

/// Notification emitted by an association.
#[derive(Debug, Clone, PartialEq)]
pub enum AssociationEvent {
    ListAdd { index: usize },
    ListUpdate { index: usize, previous: Value },
    ListRemove { index: usize, previous: Value },
    MapAdd { key: String },
    MapUpdate { key: String, previous: Value },
    MapRemove { key: String, previous: Value },
    SetAdd { object: Value },
    SetRemove { object: Value },
}

impl AssociationEvent {
    /// Kind of the association that emitted this event.
    pub fn kind(&self) -> AssociationKind {
        match self {
            Self::ListAdd { .. } | Self::ListUpdate { .. } | Self::ListRemove { .. } => {
                AssociationKind::List
            }
            Self::MapAdd { .. } | Self::MapUpdate { .. } | Self::MapRemove { .. } => {
                AssociationKind::Map
            }
            Self::SetAdd { .. } | Self::SetRemove { .. } => AssociationKind::Set,
        }
    }

    /// Operation this event reports.
    pub fn operation(&self) -> OperationKind {
        match self {
            Self::ListAdd { .. } | Self::MapAdd { .. } | Self::SetAdd { .. } => OperationKind::Add,
            Self::ListUpdate { .. } | Self::MapUpdate { .. } => OperationKind::Update,
            Self::ListRemove { .. } | Self::MapRemove { .. } | Self::SetRemove { .. } => {
                OperationKind::Remove
            }
        }
    }
}

/// Handle to one association of a record.
///
/// Cloning the handle shares the underlying collection.
#[derive(Debug, Clone)]
pub enum Association {
    List(Rc<ListAssociation>),
    Map(Rc<MapAssociation>),
    Set(Rc<SetAssociation>),
}

impl Association {
    /// Create an empty association of the given kind.
    pub fn new(kind: AssociationKind) -> Self {
        match kind {
            AssociationKind::List => Self::List(Rc::new(ListAssociation::new())),
            AssociationKind::Map => Self::Map(Rc::new(MapAssociation::new())),
            AssociationKind::Set => Self::Set(Rc::new(SetAssociation::new())),
        }
    }

    pub fn kind(&self) -> AssociationKind {
        match self {
            Self::List(_) => AssociationKind::List,
            Self::Map(_) => AssociationKind::Map,
            Self::Set(_) => AssociationKind::Set,
        }
    }

    pub fn as_list(&self) -> Option<&ListAssociation> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&MapAssociation> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&SetAssociation> {
        match self {
            Self::Set(set) => Some(set),
            _ => None,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        match self {
            Self::List(list) => list.len(),
            Self::Map(map) => map.len(),
            Self::Set(set) => set.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Register a listener for one operation kind.
    pub fn on(
        &self,
        operation: OperationKind,
        listener: impl Fn(&AssociationEvent) + 'static,
    ) -> Subscription {
        let filtered = move |event: &AssociationEvent| {
            if event.operation() == operation {
                listener(event);
            }
        };
        match self {
            Self::List(list) => list.on_change(filtered),
            Self::Map(map) => map.on_change(filtered),
            Self::Set(set) => set.on_change(filtered),
        }
    }

    /// Non-owning handle.
    pub fn downgrade(&self) -> WeakAssociation {
        match self {
            Self::List(list) => WeakAssociation::List(Rc::downgrade(list)),
            Self::Map(map) => WeakAssociation::Map(Rc::downgrade(map)),
            Self::Set(set) => WeakAssociation::Set(Rc::downgrade(set)),
        }
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> AssociationSnapshot {
        match self {
            Self::List(list) => AssociationSnapshot::List(list.values()),
            Self::Map(map) => AssociationSnapshot::Map(map.entries().into_iter().collect()),
            Self::Set(set) => AssociationSnapshot::Set(set.values()),
        }
    }
}

/// Non-owning handle to an association.
#[derive(Debug, Clone)]
pub enum WeakAssociation {
    List(Weak<ListAssociation>),
    Map(Weak<MapAssociation>),
    Set(Weak<SetAssociation>),
}

impl WeakAssociation {
    /// Get the association back if its record is still alive.
    pub fn upgrade(&self) -> Option<Association> {
        match self {
            Self::List(list) => list.upgrade().map(Association::List),
            Self::Map(map) => map.upgrade().map(Association::Map),
            Self::Set(set) => set.upgrade().map(Association::Set),
        }
    }
}

/// Point-in-time copy of an association's contents.
///
/// Set snapshots compare without regard to order.
#[derive(Debug, Clone)]
pub enum AssociationSnapshot {
    List(Vec<Value>),
    Map(std::collections::BTreeMap<String, Value>),
    Set(Vec<Value>),
}

impl PartialEq for AssociationSnapshot {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Set(a), Self::Set(b)) => {
                a.len() == b.len()
                    && a.iter().all(|value| b.iter().any(|other| value.same(other)))
            }
            _ => false,
        }
    }
}
