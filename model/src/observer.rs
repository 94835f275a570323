//! Mutation tracking for one record.
//!
//! An [`Observer`] subscribes to a record's data store and to every
//! association declared when it attaches. Each notification becomes a
//! [`Modification`] appended to the observer's log. The log is either handed
//! back with [`Observer::commit`] or replayed backwards with
//! [`Observer::rollback`].

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use crate::association::WeakAssociation;
use crate::data::ModelData;
use crate::emitter::Subscription;
use crate::error::{ModelError, ModelResult};
use crate::kind::OperationKind;
use crate::modification::{Modification, UndoTarget};
use crate::record::{CoreAccess, Model};

type Log = Rc<RefCell<Vec<Modification>>>;

/// Lifecycle of an observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserverState {
    Observing,
    /// Terminal; no further modifications are recorded.
    Detached,
}

/// Records every mutation of one record.
#[derive(Debug)]
pub struct Observer {
    data: Weak<ModelData>,
    associations: BTreeMap<String, WeakAssociation>,
    log: Log,
    subscriptions: Vec<Subscription>,
    state: ObserverState,
}

impl Observer {
    /// Attach to `model` and start recording.
    pub fn new<M: Model + ?Sized>(model: &M) -> Self {
        let core = model.core(CoreAccess::new());
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let mut subscriptions = Vec::new();

        {
            let log = Rc::clone(&log);
            subscriptions.push(core.data().on_change(move |event| {
                record(&log, Modification::from_data_event(event));
            }));
        }

        let mut associations = BTreeMap::new();
        for (name, association) in core.associations() {
            for operation in OperationKind::ALL {
                if !association.kind().supports(operation) {
                    continue;
                }
                let log = Rc::clone(&log);
                let name = name.clone();
                subscriptions.push(association.on(operation, move |event| {
                    record(&log, Modification::from_association_event(&name, event));
                }));
            }
            associations.insert(name.clone(), association.downgrade());
        }

        debug!(
            associations = associations.len(),
            subscriptions = subscriptions.len(),
            "observer attached"
        );

        Self {
            data: Rc::downgrade(core.data()),
            associations,
            log,
            subscriptions,
            state: ObserverState::Observing,
        }
    }

    pub fn state(&self) -> ObserverState {
        self.state
    }

    /// Copy of the log, oldest first.
    pub fn modifications(&self) -> Vec<Modification> {
        self.log.borrow().clone()
    }

    pub fn has_modifications(&self) -> bool {
        !self.log.borrow().is_empty()
    }

    pub fn len(&self) -> usize {
        self.log.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_modifications()
    }

    /// Stop recording. The log is kept.
    pub fn unobserve(&mut self) {
        if self.state == ObserverState::Detached {
            return;
        }
        for subscription in self.subscriptions.drain(..) {
            subscription.unsubscribe();
        }
        self.state = ObserverState::Detached;
        debug!("observer detached");
    }

    /// Detach and hand back the log.
    pub fn commit(mut self) -> Vec<Modification> {
        self.unobserve();
        let modifications = std::mem::take(&mut *self.log.borrow_mut());
        debug!(modifications = modifications.len(), "observer committed");
        modifications
    }

    /// Detach and undo every recorded modification, newest first.
    ///
    /// Stops at the first undo that fails; the error names its position in
    /// the log.
    pub fn rollback(mut self) -> ModelResult<()> {
        self.unobserve();
        let modifications = std::mem::take(&mut *self.log.borrow_mut());
        debug!(modifications = modifications.len(), "observer rolling back");

        for (position, modification) in modifications.iter().enumerate().rev() {
            self.undo(modification)
                .map_err(|err| ModelError::undo(position, modification.to_string(), err))?;
        }

        Ok(())
    }

    fn undo(&self, modification: &Modification) -> ModelResult<()> {
        trace!(%modification, "undoing");
        match modification.association_name() {
            None => {
                let data = self.data.upgrade().ok_or(ModelError::InstanceDropped)?;
                modification.undo(UndoTarget::Data(&data))
            }
            Some(name) => {
                let association = self
                    .associations
                    .get(name)
                    .ok_or_else(|| ModelError::unknown_association(name))?
                    .upgrade()
                    .ok_or(ModelError::InstanceDropped)?;
                modification.undo(UndoTarget::Association(&association))
            }
        }
    }
}

fn record(log: &Log, modification: Modification) {
    trace!(%modification, "recorded");
    log.borrow_mut().push(modification);
}
