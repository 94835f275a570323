//! Closed kinds shared by associations, events and modifications.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of an association.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssociationKind {
    /// Ordered, indexable sequence.
    List,
    /// String-keyed map.
    Map,
    /// Unordered set with equality-based membership.
    Set,
}

impl AssociationKind {
    /// Whether associations of this kind emit `operation`.
    ///
    /// Sets have no update.
    pub fn supports(&self, operation: OperationKind) -> bool {
        !matches!((self, operation), (AssociationKind::Set, OperationKind::Update))
    }
}

impl fmt::Display for AssociationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssociationKind::List => write!(f, "list"),
            AssociationKind::Map => write!(f, "map"),
            AssociationKind::Set => write!(f, "set"),
        }
    }
}

/// Kind of a mutating operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Add,
    Update,
    Remove,
}

impl OperationKind {
    pub const ALL: [OperationKind; 3] = [
        OperationKind::Add,
        OperationKind::Update,
        OperationKind::Remove,
    ];
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Add => write!(f, "add"),
            OperationKind::Update => write!(f, "update"),
            OperationKind::Remove => write!(f, "remove"),
        }
    }
}

/// What a modification applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModificationKind {
    /// A field of the record data store.
    Data,
    /// A named association.
    Association,
}

impl fmt::Display for ModificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModificationKind::Data => write!(f, "data"),
            ModificationKind::Association => write!(f, "association"),
        }
    }
}
