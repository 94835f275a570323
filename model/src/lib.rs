//! Records, associations and mutation tracking.
//!
//! A record owns a [`ModelData`] field store and named associations
//! ([`ListAssociation`], [`MapAssociation`], [`SetAssociation`]). Attach an
//! [`Observer`] to capture every mutation as a [`Modification`], then either
//! commit the log or roll it back to restore the earlier state.
//!
//! Everything here is single-threaded (`Rc`/`RefCell`). Schemas, which are
//! immutable, are shared through `Arc`.

mod association;
mod data;
mod emitter;
mod error;
mod kind;
mod modification;
mod observer;
mod record;
mod schema_model;

pub use association::{
    Association, AssociationEvent, AssociationSnapshot, ListAssociation, MapAssociation,
    SetAssociation, WeakAssociation,
};
pub use data::{DataEvent, ModelData};
pub use emitter::{Emitter, Subscription};
pub use error::{ModelError, ModelResult};
pub use kind::{AssociationKind, ModificationKind, OperationKind};
pub use modification::{Modification, UndoTarget};
pub use observer::{Observer, ObserverState};
pub use record::{CoreAccess, Model, ModelCore, ModelSnapshot, Record};
pub use schema_model::SchemaModel;
