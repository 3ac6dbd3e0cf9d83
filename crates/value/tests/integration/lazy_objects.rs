//! Lazy objects materialize once, however they are reached

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use rivulet_value::collections::object::Properties;
use rivulet_value::{
    Environment, Lengthable, Object, Resolvable, Value, equals, to_json, write_internal_json,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn counted_object(calls: &Arc<AtomicUsize>) -> Object {
    let counter = Arc::clone(calls);
    Object::lazy(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        let mut properties = Properties::new();
        properties.insert("uuid".to_string(), Some(Value::text("0d2b-4e9c")));
        properties.insert("count".to_string(), Some(Value::from(3)));
        properties
    })
}

#[test]
fn test_single_materialization() {
    init_tracing();
    let env = Environment::default();
    let calls = Arc::new(AtomicUsize::new(0));
    let object = counted_object(&calls);

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(object.count(), 2);
    assert_eq!(object.resolve(&env, "uuid"), Some(Value::text("0d2b-4e9c")));
    assert_eq!(object.render(), "{uuid: 0d2b-4e9c, count: 3}");
    assert_eq!(
        write_internal_json(Some(&Value::Object(object.clone()))).unwrap(),
        r#"{"uuid":"0d2b-4e9c","count":3}"#
    );
    assert_eq!(
        to_json(&env, Some(&Value::Object(object.clone()))).unwrap(),
        r#"{"uuid":"0d2b-4e9c","count":3}"#
    );
    let copy = Value::Object(object.clone());
    assert!(equals(Some(&copy), Some(&Value::Object(object))));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_single_materialization_across_threads() {
    init_tracing();
    let calls = Arc::new(AtomicUsize::new(0));
    let object = counted_object(&calls);

    std::thread::scope(|scope| {
        for _ in 0..8 {
            let object = object.clone();
            scope.spawn(move || {
                let env = Environment::default();
                assert_eq!(object.count(), 2);
                assert_eq!(object.resolve(&env, "COUNT"), Some(Value::from(3)));
            });
        }
    });

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_unmaterialized_until_read() {
    let calls = Arc::new(AtomicUsize::new(0));
    let object = counted_object(&calls);
    let _clone = object.clone();
    let _value = Value::Object(object.clone());

    assert!(!object.is_materialized());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}
