//! Property tests: rollback restores the exact pre-observation state, and
//! commit returns one modification per effective operation.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tessera_model::ModelCore;
use tessera_tests::prelude::*;

/// A record that exposes its core, so tests can drive raw store and
/// association operations.
struct Sandbox {
    core: ModelCore,
}

impl Model for Sandbox {
    fn core(&self, _: CoreAccess) -> &ModelCore {
        &self.core
    }
}

impl Record for Sandbox {
    fn populate(core: &mut ModelCore, raw: &Attributes) -> tessera_model::ModelResult<()> {
        for (field, value) in raw {
            core.data().set(field.as_str(), value.clone());
        }
        core.create_association("addresses", AssociationKind::List)?;
        let notifications = core.create_association("notifications", AssociationKind::Map)?;
        if let Some(map) = notifications.as_map() {
            for (name, enabled) in User::NOTIFICATIONS {
                map.set(name, enabled);
            }
        }
        core.create_association("rights", AssociationKind::Set)?;
        Ok(())
    }

    fn from_core(core: ModelCore) -> Self {
        Self { core }
    }
}

fn sandbox() -> Sandbox {
    Sandbox::create(Some(jane())).unwrap()
}

#[derive(Debug, Clone)]
enum Op {
    SetField(String, i64),
    RemoveField(String),
    ListInsert(usize, i64),
    ListSet(usize, i64),
    ListRemove(usize),
    ListClear,
    MapSet(String, i64),
    MapRemove(String),
    SetAdd(i64),
    SetRemove(i64),
}

fn name() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["a", "b", "c", "d"]).prop_map(str::to_string)
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (name(), any::<i64>()).prop_map(|(k, v)| Op::SetField(k, v)),
        name().prop_map(Op::RemoveField),
        (0usize..6, any::<i64>()).prop_map(|(i, v)| Op::ListInsert(i, v)),
        (0usize..6, any::<i64>()).prop_map(|(i, v)| Op::ListSet(i, v)),
        (0usize..6).prop_map(Op::ListRemove),
        Just(Op::ListClear),
        (name(), any::<i64>()).prop_map(|(k, v)| Op::MapSet(k, v)),
        name().prop_map(Op::MapRemove),
        (0i64..5).prop_map(Op::SetAdd),
        (0i64..5).prop_map(Op::SetRemove),
    ]
}

/// Apply `op`, returning how many modifications it should record.
fn apply(sandbox: &Sandbox, op: &Op) -> usize {
    let core = &sandbox.core;
    let list = core.list("addresses").unwrap();
    let map = core.map("notifications").unwrap();
    let set = core.set("rights").unwrap();

    match op {
        Op::SetField(field, value) => {
            core.data().set(field.as_str(), *value);
            1
        }
        Op::RemoveField(field) => usize::from(core.data().remove(field).is_some()),
        Op::ListInsert(index, value) => usize::from(list.insert(*index, *value).is_ok()),
        Op::ListSet(index, value) => usize::from(list.set(*index, *value).is_ok()),
        Op::ListRemove(index) => usize::from(list.remove(*index).is_some()),
        Op::ListClear => {
            let len = list.len();
            list.clear();
            len
        }
        Op::MapSet(key, value) => {
            map.set(key.as_str(), *value);
            1
        }
        Op::MapRemove(key) => usize::from(map.remove(key).is_some()),
        Op::SetAdd(value) => usize::from(set.add(*value)),
        Op::SetRemove(value) => usize::from(set.remove(&Value::Int(*value))),
    }
}

proptest! {
    #[test]
    fn rollback_restores_snapshot(ops in prop::collection::vec(op(), 0..40)) {
        let sandbox = sandbox();
        let before = sandbox.snapshot();
        let observer = Observer::new(&sandbox);

        for op in &ops {
            apply(&sandbox, op);
        }
        observer.rollback().unwrap();

        prop_assert_eq!(sandbox.snapshot(), before);
    }

    #[test]
    fn commit_records_every_effective_operation(ops in prop::collection::vec(op(), 0..40)) {
        let sandbox = sandbox();
        let observer = Observer::new(&sandbox);

        let expected: usize = ops.iter().map(|op| apply(&sandbox, op)).sum();
        prop_assert_eq!(observer.has_modifications(), expected > 0);
        let log = observer.commit();

        prop_assert_eq!(log.len(), expected);
    }
}

#[test]
fn test_new_map_key_is_removed_on_rollback() {
    // GIVEN
    let sandbox = sandbox();
    let observer = Observer::new(&sandbox);
    let notifications = sandbox.core.map("notifications").unwrap();

    // WHEN
    notifications.set("digest", true);
    observer.rollback().unwrap();

    // THEN
    assert!(!notifications.has("digest"));
    assert_eq!(notifications.len(), User::NOTIFICATIONS.len());
}

#[test]
fn test_rollback_of_first_write_removes_field() {
    // GIVEN
    let sandbox = sandbox();
    let before = sandbox.snapshot();
    let observer = Observer::new(&sandbox);

    // WHEN
    sandbox.core.data().set("nickname", "JD");
    observer.rollback().unwrap();

    // THEN
    assert!(!sandbox.core.data().has("nickname"));
    assert_eq!(sandbox.snapshot(), before);
}

#[test]
fn test_reimported_changelog_rolls_back_null_fields() {
    // GIVEN
    let sandbox = Sandbox::create(Some(attrs! { "nickname" => Value::Null })).unwrap();
    let before = sandbox.snapshot();
    let observer = Observer::new(&sandbox);
    sandbox.core.data().set("nickname", "JD");
    sandbox.core.data().set("email", "jd@example.com");

    // WHEN
    let exported = serde_json::to_string(&observer.commit()).unwrap();
    let log: Vec<Modification> = serde_json::from_str(&exported).unwrap();
    for modification in log.iter().rev() {
        modification
            .undo(tessera_model::UndoTarget::Data(sandbox.core.data()))
            .unwrap();
    }

    // THEN
    assert_eq!(sandbox.core.data().get("nickname"), Some(Value::Null));
    assert_eq!(sandbox.snapshot(), before);
}
