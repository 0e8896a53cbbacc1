//! Round-trip laws: decode(encode(v)) == v, and encoding is idempotent
//! across a re-parse.

use toon_stream::{from_str, from_str_with_options, to_string, toon, ToonOptions, Value};

fn roundtrip(value: &Value) {
    let text = to_string(value).expect("value should encode");
    let back = from_str(&text).unwrap_or_else(|e| panic!("re-parse of {:?} failed: {}", text, e));
    assert_eq!(&back, value, "through {:?}", text);
}

fn idempotent(input: &str) {
    let once = to_string(&from_str(input).expect("input should parse")).expect("encode");
    let twice = to_string(&from_str(&once).expect("re-parse")).expect("re-encode");
    assert_eq!(once, twice, "for input {:?}", input);
}

#[test]
fn scalars_roundtrip() {
    roundtrip(&Value::Null);
    roundtrip(&Value::from(true));
    roundtrip(&Value::from(false));
    roundtrip(&Value::from(0));
    roundtrip(&Value::from(42));
    roundtrip(&Value::from(-17));
    roundtrip(&Value::from(i64::MAX));
    roundtrip(&Value::from(i64::MIN));
    roundtrip(&Value::from(1.5));
    roundtrip(&Value::from(42.0));
    roundtrip(&Value::from(0.0015));
    roundtrip(&Value::from("hello"));
    roundtrip(&Value::from("hello world"));
    roundtrip(&Value::from(""));
}

#[test]
fn special_strings_roundtrip() {
    for text in [
        "true",
        "false",
        "null",
        "42",
        "-3.5",
        "007",
        "1e6",
        "a,b",
        "a|b",
        "a\tb",
        "a:b",
        "key: value",
        "[3]",
        "{x}",
        "- item",
        "-",
        "#comment",
        " leading",
        "trailing ",
        "line\nbreak",
        "quote\"inside",
        "back\\slash",
        "user-id",
        "ünïcødé ✓",
    ] {
        roundtrip(&Value::from(text));
        roundtrip(&toon!({ "field": (text) }));
    }
}

#[test]
fn objects_roundtrip() {
    roundtrip(&toon!({}));
    roundtrip(&toon!({ "a": 1 }));
    roundtrip(&toon!({ "a": 1, "b": "two", "c": true, "d": null, "e": 2.5 }));
    roundtrip(&toon!({
        "user": {
            "id": 123,
            "name": "Ada",
            "meta": { "created": "2024-01-01", "verified": true }
        }
    }));
    roundtrip(&toon!({ "empty": {}, "after": 1 }));
    roundtrip(&toon!({ "user-id": 1, "2nd": 2, "": 3 }));
}

#[test]
fn arrays_roundtrip() {
    roundtrip(&toon!([]));
    roundtrip(&toon!([1, 2, 3]));
    roundtrip(&toon!(["a", "b", "c"]));
    roundtrip(&toon!([true, false, null]));
    roundtrip(&Value::Array((0..25).map(Value::from).collect()));
    roundtrip(&toon!({ "tags": [] }));
    roundtrip(&toon!({ "tags": ["x"] }));
}

#[test]
fn arrays_of_objects_roundtrip() {
    roundtrip(&toon!([
        { "id": 1, "name": "Widget", "price": 9.99 },
        { "id": 2, "name": "Gadget", "price": 14.5 }
    ]));
    // Differing key sets force list form.
    roundtrip(&toon!([
        { "id": 1, "name": "a" },
        { "id": 2 }
    ]));
    // Mixed content forces list form.
    roundtrip(&toon!([1, { "name": "Alice", "age": 30 }, "text"]));
}

#[test]
fn nested_arrays_roundtrip() {
    roundtrip(&toon!([[1, 2], [3, 4]]));
    roundtrip(&toon!({ "grid": [[1, 2], [3, 4]] }));
    roundtrip(&toon!([[], [1]]));
    roundtrip(&toon!([{ "wrap": [{ "x": 1 }, { "x": 2 }] }]));
}

#[test]
fn single_field_items_with_nested_values_roundtrip() {
    roundtrip(&toon!([{ "meta": { "x": 1 } }]));
    roundtrip(&toon!([{ "rows": [{ "x": 1 }, { "x": 2 }] }]));
}

#[test]
fn tabular_cells_with_empty_strings_roundtrip() {
    roundtrip(&toon!([
        { "a": 1, "b": "", "c": "Bob" },
        { "a": 2, "b": "x", "c": "" }
    ]));
}

#[test]
fn generation_is_idempotent() {
    for input in [
        "name: Alice",
        "user:\n  id: 123\n  name: Ada",
        "[3]: a,b,c",
        "users[2]{id,name}:\n  1,Alice\n  2,Bob",
        "items[2]:\n  - id: 1\n    name: First\n  - id: 2\n    name: Second",
        "items[2]:\n  - apple\n  - banana",
        "a:\n  b:\n    c: v\nd: w",
        "tags[0]:",
        "42",
        "",
    ] {
        idempotent(input);
    }
}

#[test]
fn tabular_reformat_is_stable() {
    let input = "users[2]{id,name}:\n  1,Alice\n  2,Bob";
    let value = from_str(input).expect("parse");
    assert_eq!(to_string(&value).unwrap(), input);
}

#[test]
fn lenient_parse_then_strict_encode_normalizes() {
    let lenient = ToonOptions::lenient();
    let value = from_str_with_options("[3]: a,b", &lenient).expect("lenient parse");
    assert_eq!(to_string(&value).unwrap(), "[2]: a,b");
}
