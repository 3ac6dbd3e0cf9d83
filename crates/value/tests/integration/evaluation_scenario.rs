//! Evaluating expressions the way a template engine drives the value domain

use pretty_assertions::assert_eq;
use rivulet_value::{
    Environment, Object, OperatorRegistry, Value, XError, index, render, resolve, to_json,
    truthy,
};

fn contact() -> Value {
    let fields = Object::builder()
        .insert("age", Value::text("33"))
        .insert("gender", Value::text("M"))
        .insert_nil("state")
        .build();

    Value::Object(
        Object::builder()
            .insert("name", Value::text("Ryan Lewis"))
            .insert("fields", Value::Object(fields))
            .insert("urns", Value::array([Value::text("tel:+12065551212")]))
            .default_value(Value::text("Ryan Lewis"))
            .build(),
    )
}

#[test]
fn test_field_arithmetic() {
    let env = Environment::default();
    let registry = OperatorRegistry::new();
    let contact = contact();

    // contact.fields.age + 1
    let fields = resolve(&env, Some(&contact), "fields");
    let age = resolve(&env, fields.as_ref(), "age");
    let next = registry.binary("+", &env, age.as_ref(), Some(&Value::from(1)));
    assert_eq!(render(next.as_ref()), "34");

    // contact.fields.state & "!"
    let state = resolve(&env, fields.as_ref(), "state");
    assert_eq!(state, None);
    let joined = registry.binary("&", &env, state.as_ref(), Some(&Value::text("!")));
    assert_eq!(render(joined.as_ref()), "!");
}

#[test]
fn test_errors_poison_downstream() {
    let env = Environment::default();
    let registry = OperatorRegistry::new();
    let contact = contact();

    // contact.fields.missing * 2 / 0
    let fields = resolve(&env, Some(&contact), "fields");
    let missing = resolve(&env, fields.as_ref(), "missing");
    let doubled = registry.binary("*", &env, missing.as_ref(), Some(&Value::from(2)));
    let divided = registry.binary("/", &env, doubled.as_ref(), Some(&Value::from(0)));

    assert_eq!(render(divided.as_ref()), "object has no property 'missing'");
    assert!(!truthy(divided.as_ref()));
    assert_eq!(
        to_json(&env, divided.as_ref()).unwrap_err(),
        XError::msg("object has no property 'missing'")
    );
}

#[test]
fn test_division_scenario() {
    let env = Environment::default();
    let registry = OperatorRegistry::new();

    let result = registry.binary("/", &env, Some(&Value::from(3)), Some(&Value::from(2)));
    assert_eq!(render(result.as_ref()), "1.5");

    let result = registry.binary("/", &env, Some(&Value::from(3)), Some(&Value::from(0)));
    assert_eq!(result, Some(Value::error_msg("division by zero")));
}

#[test]
fn test_default_stands_in_for_object() {
    let env = Environment::default();
    let contact = contact();

    assert_eq!(render(Some(&contact)), "Ryan Lewis");
    let greeting = OperatorRegistry::new().binary(
        "&",
        &env,
        Some(&Value::text("Hi ")),
        Some(&contact),
    );
    assert_eq!(render(greeting.as_ref()), "Hi Ryan Lewis");

    let urns = resolve(&env, Some(&contact), "urns");
    assert_eq!(
        index(&env, urns.as_ref(), -1),
        Some(Value::text("tel:+12065551212"))
    );
}

#[test]
fn test_exported_json_of_context() {
    let env = Environment::default();
    let contact = contact();

    assert_eq!(
        to_json(&env, Some(&contact)).unwrap(),
        r#"{"name":"Ryan Lewis","fields":{"age":"33","gender":"M","state":null},"urns":["tel:+12065551212"]}"#
    );
}
