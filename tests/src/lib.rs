//! Integration test support for Tessera.
//!
//! Provides the `Person`/`User` fixture records and a small scenario runner:
//! a scenario builds a record, attaches an observer, runs named steps (each
//! checked against the modifications it recorded) and ends with a commit or
//! a rollback.

mod assertion;
mod error;

pub use assertion::{Assertion, AssertionBuilder};
pub use error::{ScenarioError, ScenarioResult};
pub use runner::Runner;
pub use scenario::{Ending, Scenario, Step};

pub mod prelude {
    pub use crate::fixtures::{address, jane, jane_user, Person, User};
    pub use crate::{AssertionBuilder, Scenario, ScenarioError};
    pub use tessera_core::{attrs, Attributes, Value};
    pub use tessera_model::{
        AssociationKind, CoreAccess, Model, ModelError, Modification, ModificationKind,
        Observer, OperationKind, Record,
    };
}
