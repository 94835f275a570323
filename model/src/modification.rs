//! Captured mutations and their inverses.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use tessera_core::Value;

use crate::association::{
    Association, AssociationEvent, ListAssociation, MapAssociation, SetAssociation,
};
use crate::data::{DataEvent, ModelData};
use crate::error::{ModelError, ModelResult};
use crate::kind::{AssociationKind, ModificationKind, OperationKind};

/// One recorded mutation of a record.
///
/// Each variant carries exactly what its `undo` needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Modification {
    /// A field write. `previous` is `None` when the field was absent.
    ///
    /// An absent value is omitted from JSON, so `"previous": null` always
    /// means the field held `Null`.
    DataUpdate {
        field: String,
        #[serde(
            default,
            skip_serializing_if = "Option::is_none",
            deserialize_with = "present"
        )]
        previous: Option<Value>,
    },
    ListAdd {
        association: String,
        index: usize,
    },
    ListUpdate {
        association: String,
        index: usize,
        previous: Value,
    },
    ListRemove {
        association: String,
        index: usize,
        previous: Value,
    },
    MapAdd {
        association: String,
        key: String,
    },
    MapUpdate {
        association: String,
        key: String,
        previous: Value,
    },
    MapRemove {
        association: String,
        key: String,
        previous: Value,
    },
    SetAdd {
        association: String,
        object: Value,
    },
    SetRemove {
        association: String,
        object: Value,
    },
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

/// The store a modification is undone against.
#[derive(Debug, Clone, Copy)]
pub enum UndoTarget<'a> {
    Data(&'a ModelData),
    Association(&'a Association),
}

impl UndoTarget<'_> {
    fn describe(&self) -> String {
        match self {
            UndoTarget::Data(_) => "data".to_string(),
            UndoTarget::Association(association) => format!("{} association", association.kind()),
        }
    }
}

impl Modification {
    pub fn from_data_event(event: &DataEvent) -> Self {
        Self::DataUpdate {
            field: event.field.clone(),
            previous: event.previous.clone(),
        }
    }

    pub fn from_association_event(association: &str, event: &AssociationEvent) -> Self {
        let association = association.to_string();
        match event.clone() {
            AssociationEvent::ListAdd { index } => Self::ListAdd { association, index },
            AssociationEvent::ListUpdate { index, previous } => Self::ListUpdate {
                association,
                index,
                previous,
            },
            AssociationEvent::ListRemove { index, previous } => Self::ListRemove {
                association,
                index,
                previous,
            },
            AssociationEvent::MapAdd { key } => Self::MapAdd { association, key },
            AssociationEvent::MapUpdate { key, previous } => Self::MapUpdate {
                association,
                key,
                previous,
            },
            AssociationEvent::MapRemove { key, previous } => Self::MapRemove {
                association,
                key,
                previous,
            },
            AssociationEvent::SetAdd { object } => Self::SetAdd {
                association,
                object,
            },
            AssociationEvent::SetRemove { object } => Self::SetRemove {
                association,
                object,
            },
        }
    }

    pub fn kind(&self) -> ModificationKind {
        match self {
            Self::DataUpdate { .. } => ModificationKind::Data,
            _ => ModificationKind::Association,
        }
    }

    pub fn operation(&self) -> OperationKind {
        match self {
            Self::ListAdd { .. } | Self::MapAdd { .. } | Self::SetAdd { .. } => OperationKind::Add,
            Self::DataUpdate { .. } | Self::ListUpdate { .. } | Self::MapUpdate { .. } => {
                OperationKind::Update
            }
            Self::ListRemove { .. } | Self::MapRemove { .. } | Self::SetRemove { .. } => {
                OperationKind::Remove
            }
        }
    }

    pub fn association_kind(&self) -> Option<AssociationKind> {
        match self {
            Self::DataUpdate { .. } => None,
            Self::ListAdd { .. } | Self::ListUpdate { .. } | Self::ListRemove { .. } => {
                Some(AssociationKind::List)
            }
            Self::MapAdd { .. } | Self::MapUpdate { .. } | Self::MapRemove { .. } => {
                Some(AssociationKind::Map)
            }
            Self::SetAdd { .. } | Self::SetRemove { .. } => Some(AssociationKind::Set),
        }
    }

    pub fn association_name(&self) -> Option<&str> {
        match self {
            Self::DataUpdate { .. } => None,
            Self::ListAdd { association, .. }
            | Self::ListUpdate { association, .. }
            | Self::ListRemove { association, .. }
            | Self::MapAdd { association, .. }
            | Self::MapUpdate { association, .. }
            | Self::MapRemove { association, .. }
            | Self::SetAdd { association, .. }
            | Self::SetRemove { association, .. } => Some(association),
        }
    }

    pub fn field(&self) -> Option<&str> {
        match self {
            Self::DataUpdate { field, .. } => Some(field),
            _ => None,
        }
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            Self::ListAdd { index, .. }
            | Self::ListUpdate { index, .. }
            | Self::ListRemove { index, .. } => Some(*index),
            _ => None,
        }
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            Self::MapAdd { key, .. } | Self::MapUpdate { key, .. } | Self::MapRemove { key, .. } => {
                Some(key)
            }
            _ => None,
        }
    }

    /// Value replaced or removed by the mutation.
    pub fn previous(&self) -> Option<&Value> {
        match self {
            Self::DataUpdate { previous, .. } => previous.as_ref(),
            Self::ListUpdate { previous, .. }
            | Self::ListRemove { previous, .. }
            | Self::MapUpdate { previous, .. }
            | Self::MapRemove { previous, .. } => Some(previous),
            _ => None,
        }
    }

    pub fn object(&self) -> Option<&Value> {
        match self {
            Self::SetAdd { object, .. } | Self::SetRemove { object, .. } => Some(object),
            _ => None,
        }
    }

    /// Reverse this mutation against `target`.
    pub fn undo(&self, target: UndoTarget<'_>) -> ModelResult<()> {
        match self {
            Self::DataUpdate { field, previous } => {
                let data = self.data_target(target)?;
                match previous {
                    Some(previous) => data.set(field.as_str(), previous.clone()),
                    None => {
                        data.remove(field);
                    }
                }
            }
            Self::ListAdd { index, .. } => {
                self.list_target(target)?.remove(*index);
            }
            Self::ListUpdate {
                index, previous, ..
            } => self.list_target(target)?.set(*index, previous.clone())?,
            Self::ListRemove {
                index, previous, ..
            } => self.list_target(target)?.insert(*index, previous.clone())?,
            Self::MapAdd { key, .. } => {
                self.map_target(target)?.remove(key);
            }
            Self::MapUpdate { key, previous, .. } | Self::MapRemove { key, previous, .. } => {
                self.map_target(target)?.set(key.as_str(), previous.clone());
            }
            Self::SetAdd { object, .. } => {
                self.set_target(target)?.remove(object);
            }
            Self::SetRemove { object, .. } => {
                self.set_target(target)?.add(object.clone());
            }
        }
        Ok(())
    }

    fn data_target<'a>(&self, target: UndoTarget<'a>) -> ModelResult<&'a ModelData> {
        match target {
            UndoTarget::Data(data) => Ok(data),
            other => Err(self.mismatch(&other)),
        }
    }

    fn list_target<'a>(&self, target: UndoTarget<'a>) -> ModelResult<&'a ListAssociation> {
        match target {
            UndoTarget::Association(Association::List(list)) => Ok(&**list),
            other => Err(self.mismatch(&other)),
        }
    }

    fn map_target<'a>(&self, target: UndoTarget<'a>) -> ModelResult<&'a MapAssociation> {
        match target {
            UndoTarget::Association(Association::Map(map)) => Ok(&**map),
            other => Err(self.mismatch(&other)),
        }
    }

    fn set_target<'a>(&self, target: UndoTarget<'a>) -> ModelResult<&'a SetAssociation> {
        match target {
            UndoTarget::Association(Association::Set(set)) => Ok(&**set),
            other => Err(self.mismatch(&other)),
        }
    }

    fn mismatch(&self, target: &UndoTarget<'_>) -> ModelError {
        ModelError::target_mismatch(self.to_string(), target.describe())
    }
}

impl fmt::Display for Modification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DataUpdate { field, .. } => write!(f, "data update {}", field),
            Self::ListAdd { association, index }
            | Self::ListUpdate {
                association, index, ..
            }
            | Self::ListRemove {
                association, index, ..
            } => write!(f, "list {} {}[{}]", self.operation(), association, index),
            Self::MapAdd { association, key }
            | Self::MapUpdate {
                association, key, ..
            }
            | Self::MapRemove {
                association, key, ..
            } => write!(f, "map {} {}[{}]", self.operation(), association, key),
            Self::SetAdd {
                association,
                object,
            }
            | Self::SetRemove {
                association,
                object,
            } => write!(f, "set {} {}({})", self.operation(), association, object),
        }
    }
}
