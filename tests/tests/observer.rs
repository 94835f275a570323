//! Observer integration tests against the `Person`/`User` fixtures.

use pretty_assertions::assert_eq;
use tessera_tests::prelude::*;

fn user() -> tessera_model::ModelResult<User> {
    User::create(Some(jane_user()))
}

mod commit {
    use super::*;
    use pretty_assertions::assert_eq;

    pub fn scenario() -> Scenario<User> {
        Scenario::new("commit", user)
            .step("rename", |u| u.person().set_first_name("Joan"), |a| {
                a.recorded(1).operations(&[OperationKind::Update])
            })
            .step(
                "add_address",
                |u| u.person().add_address(address("1", "Main St", "Springfield", "US")),
                |a| a.recorded(1).on("addresses").operations(&[OperationKind::Add]),
            )
            .step("grant_admin", |u| u.add_right("admin"), |a| a.recorded(1).on("rights"))
            .step("grant_admin_again", |u| u.add_right("admin"), |a| a.silent())
            .step("revoke_missing", |u| u.remove_right("editor"), |a| a.silent())
            .step(
                "mute_system",
                |u| u.set_notification("system", false),
                |a| a.recorded(1).on("notifications").operations(&[OperationKind::Update]),
            )
            .step(
                "bad_login",
                |u| u.set_login("x"),
                |a| a.error("ValidationError").silent(),
            )
            .commit(|a| {
                a.recorded(4).operations(&[
                    OperationKind::Update,
                    OperationKind::Add,
                    OperationKind::Add,
                    OperationKind::Update,
                ])
            })
    }

    #[test]
    fn test_commit_returns_every_modification_in_order() {
        let user = scenario().run().unwrap();
        assert_eq!(user.person().first_name(), Some(Value::from("Joan")));
        assert_eq!(user.notification("system").unwrap(), Some(false));
    }
}

mod rollback {
    use super::*;
    use pretty_assertions::assert_eq;

    pub fn scenario() -> Scenario<User> {
        Scenario::new("rollback", user)
            .step("rename", |u| u.person().set_last_name("Roe"), |a| a.recorded(1))
            .step("login", |u| u.set_login("jroe"), |a| a.recorded(1))
            .step(
                "two_addresses",
                |u| {
                    u.person().add_address(address("1", "Main St", "Springfield", "US"))?;
                    u.person().add_address(address("9", "Elm St", "Shelbyville", "US"))
                },
                |a| a.recorded(2),
            )
            .step(
                "drop_first_address",
                |u| u.person().remove_address(0).map(|_| ()),
                |a| a.recorded(1).operations(&[OperationKind::Remove]),
            )
            .step("rights", |u| {
                u.add_right("admin")?;
                u.add_right("editor")?;
                u.remove_right("admin")
            }, |a| a.recorded(3).on("rights"))
            .step("notifications", |u| {
                u.set_notification("topics", true)?;
                u.set_notification("polls", true)
            }, |a| a.recorded(2))
            .rollback()
    }

    #[test]
    fn test_rollback_restores_initial_state() {
        let user = scenario().run().unwrap();
        assert_eq!(user.login(), Some(Value::from("janeDoe")));
        assert!(user.person().addresses().unwrap().is_empty());
        assert!(user.rights().unwrap().is_empty());
    }
}

#[test]
fn test_fresh_observer_has_no_modifications() {
    let user = user().unwrap();
    let observer = Observer::new(&user);
    assert!(!observer.has_modifications());
    assert!(observer.modifications().is_empty());
}

#[test]
fn test_modifications_is_a_copy() {
    // GIVEN
    let user = user().unwrap();
    let observer = Observer::new(&user);
    user.person().set_first_name("Joan").unwrap();

    // WHEN
    let copy = observer.modifications();
    user.person().set_first_name("June").unwrap();

    // THEN
    assert_eq!(copy.len(), 1);
    assert_eq!(observer.len(), 2);
}

#[test]
fn test_pushed_address_is_committed_as_list_add() {
    // GIVEN
    let person = Person::create(Some(jane())).unwrap();
    let observer = Observer::new(&person);

    // WHEN
    person
        .add_address(address("742", "Evergreen Terrace", "Springfield", "US"))
        .unwrap();
    let log = observer.commit();

    // THEN
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].kind(), ModificationKind::Association);
    assert_eq!(log[0].operation(), OperationKind::Add);
    assert_eq!(log[0].association_kind(), Some(AssociationKind::List));
    assert_eq!(log[0].association_name(), Some("addresses"));
    assert_eq!(log[0].index(), Some(0));
}

#[test]
fn test_notification_update_rolls_back() {
    // GIVEN
    let user = user().unwrap();
    let observer = Observer::new(&user);

    // WHEN
    user.set_notification("system", false).unwrap();
    assert_eq!(user.notification("system").unwrap(), Some(false));
    observer.rollback().unwrap();

    // THEN
    assert_eq!(user.notification("system").unwrap(), Some(true));
}

#[test]
fn test_unobserve_discards_without_undo() {
    let user = user().unwrap();
    let mut observer = Observer::new(&user);
    user.person().set_first_name("Joan").unwrap();

    observer.unobserve();
    user.person().set_first_name("June").unwrap();

    assert_eq!(observer.len(), 1);
    assert_eq!(user.person().first_name(), Some(Value::from("June")));
}

#[test]
fn test_committed_log_exports_as_json() {
    // GIVEN
    let user = user().unwrap();
    let observer = Observer::new(&user);
    user.add_right("admin").unwrap();
    user.person().set_first_name("Joan").unwrap();

    // WHEN
    let json = serde_json::to_value(observer.commit()).unwrap();

    // THEN
    assert_eq!(
        json,
        serde_json::json!([
            { "type": "set_add", "association": "rights", "object": "admin" },
            { "type": "data_update", "field": "firstName", "previous": "Jane" },
        ])
    );
}
