//! Bootstrap sequencing with record-backed init units.

use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use tessera_bootstrap::{logging, Bootstrap, BootstrapConfig, BootstrapError, InitUnit};
use tessera_core::{render_chain, BoxError, Describe};
use tessera_tests::prelude::*;

/// Creates a user on init and rolls back its changes on cleanup.
struct Session {
    journal: Rc<RefCell<Vec<String>>>,
    observer: Option<Observer>,
    user: Rc<RefCell<Option<User>>>,
}

impl InitUnit for Session {
    fn name(&self) -> &str {
        "02_session"
    }

    fn init(&mut self) -> Result<(), BoxError> {
        let user = User::create(Some(jane_user()))?;
        self.observer = Some(Observer::new(&user));
        *self.user.borrow_mut() = Some(user);
        self.journal.borrow_mut().push("init session".into());
        Ok(())
    }

    fn cleanup(&mut self) -> Result<(), BoxError> {
        if let Some(observer) = self.observer.take() {
            observer.rollback()?;
        }
        self.journal.borrow_mut().push("cleanup session".into());
        Ok(())
    }

    fn has_cleanup(&self) -> bool {
        true
    }
}

struct Failing;

impl InitUnit for Failing {
    fn name(&self) -> &str {
        "01_config"
    }

    fn init(&mut self) -> Result<(), BoxError> {
        Err(Box::new(ModelError::index_out_of_range(3, 0)))
    }
}

#[test]
fn test_cleanup_rolls_back_callback_changes() {
    // GIVEN
    let journal = Rc::new(RefCell::new(Vec::new()));
    let user = Rc::new(RefCell::new(None));
    let mut bootstrap = Bootstrap::with_config(
        BootstrapConfig::from_json(r#"{ "log": { "name": "tessera-tests" } }"#).unwrap(),
    );
    bootstrap.register(Session {
        journal: Rc::clone(&journal),
        observer: None,
        user: Rc::clone(&user),
    });

    // WHEN
    let result = {
        let user = Rc::clone(&user);
        bootstrap.run(move || {
            let user = user.borrow();
            let user = user.as_ref().ok_or("session not initialized")?;
            user.person().set_first_name("Joan")?;
            user.add_right("admin")?;
            Ok(())
        })
    };

    // THEN
    assert!(result.is_ok());
    assert_eq!(*journal.borrow(), vec!["init session", "cleanup session"]);
    let user = user.borrow();
    let user = user.as_ref().unwrap();
    assert_eq!(user.person().first_name(), Some(Value::from("Jane")));
    assert!(user.rights().unwrap().is_empty());
}

#[test]
fn test_init_failure_keeps_model_error_chain() {
    // GIVEN
    let mut bootstrap = Bootstrap::new();
    bootstrap.register(Failing);

    // WHEN
    let err = bootstrap.run(|| Ok(())).unwrap_err();

    // THEN
    assert!(matches!(err, BootstrapError::Init { .. }));
    assert_eq!(err.name(), "InitError");
    assert_eq!(
        render_chain(&err),
        "InitError: Init unit '01_config' failed to initialize\n\
         Caused by: Index out of range: 3 (length 0)"
    );
    logging::log_error(&err);
}
