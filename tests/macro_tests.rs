//! Tests for the `toon!` macro and its interaction with encoding.

use toon_stream::{from_str, to_string, toon, Number, Value};

#[test]
fn macro_builds_primitives() {
    assert_eq!(toon!(null), Value::Null);
    assert_eq!(toon!(true), Value::Bool(true));
    assert_eq!(toon!(42), Value::Number(Number::Integer(42)));
    assert_eq!(toon!(2.5), Value::Number(Number::Float(2.5)));
    assert_eq!(toon!("text"), Value::String("text".to_string()));
}

#[test]
fn macro_builds_collections() {
    let value = toon!({
        "name": "Alice",
        "scores": [95, 87, 92],
        "meta": { "active": true }
    });

    assert_eq!(value.get("name").and_then(Value::as_str), Some("Alice"));
    assert_eq!(
        value.get("scores").and_then(Value::as_array).map(Vec::len),
        Some(3)
    );
    assert_eq!(
        value
            .get("meta")
            .and_then(|m| m.get("active"))
            .and_then(Value::as_bool),
        Some(true)
    );
}

#[test]
fn macro_accepts_trailing_commas() {
    let value = toon!({
        "a": 1,
        "b": [1, 2,],
    });
    assert_eq!(value.get("a").and_then(Value::as_i64), Some(1));
}

#[test]
fn macro_values_encode_and_decode() {
    let value = toon!({
        "id": 7,
        "tags": ["x", "y"],
        "nested": { "flag": false }
    });
    let text = to_string(&value).unwrap();
    assert_eq!(from_str(&text).unwrap(), value);
}

#[test]
fn macro_fallback_takes_expressions() {
    let name = String::from("dynamic");
    assert_eq!(toon!(name), Value::String("dynamic".to_string()));

    let n: i64 = 41 + 1;
    assert_eq!(toon!(n), Value::Number(Number::Integer(42)));
}
