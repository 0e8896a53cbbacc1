//! Event-level parsing tests: root forms, the three array formats, strict
//! validation and lenient recovery.

use toon_stream::{parse_events, Event, Parser, ToonOptions};

fn events(input: &str) -> Vec<Event> {
    parse_events(input).expect("input should parse")
}

fn events_with(input: &str, options: &ToonOptions) -> Vec<Event> {
    Parser::with_options(input, options)
        .into_events()
        .expect("input should parse")
}

fn parse_fails(input: &str) -> toon_stream::Error {
    Parser::new(input)
        .into_events()
        .expect_err("input should be rejected")
}

fn field(name: &str) -> Event {
    Event::FieldName(name.to_string())
}

fn s(text: &str) -> Event {
    Event::String(text.to_string())
}

// ----------------------------------------------------------------------
// Root forms
// ----------------------------------------------------------------------

#[test]
fn simple_field() {
    assert_eq!(
        events("name: Alice"),
        vec![
            Event::StartObject,
            field("name"),
            s("Alice"),
            Event::EndObject,
            Event::Eof
        ]
    );
}

#[test]
fn empty_document_is_an_empty_object() {
    assert_eq!(
        events(""),
        vec![Event::StartObject, Event::EndObject, Event::Eof]
    );
    assert_eq!(
        events("\n\n"),
        vec![Event::StartObject, Event::EndObject, Event::Eof]
    );
}

#[test]
fn root_primitive() {
    assert_eq!(events("42"), vec![Event::Integer(42), Event::Eof]);
    assert_eq!(events("42\n"), vec![Event::Integer(42), Event::Eof]);
    assert_eq!(events("true"), vec![Event::Bool(true), Event::Eof]);
    assert_eq!(events("null"), vec![Event::Null, Event::Eof]);
    assert_eq!(events("3.5"), vec![Event::Float(3.5), Event::Eof]);
    assert_eq!(events("\"a b\""), vec![s("a b"), Event::Eof]);
}

#[test]
fn content_after_root_primitive_is_rejected() {
    let err = parse_fails("42\nname: Alice");
    assert!(err.to_string().contains("after document root"));
}

#[test]
fn root_array() {
    assert_eq!(
        events("[3]: a,b,c"),
        vec![
            Event::StartArray,
            s("a"),
            s("b"),
            s("c"),
            Event::EndArray,
            Event::Eof
        ]
    );
}

#[test]
fn root_empty_array() {
    assert_eq!(
        events("[0]:"),
        vec![Event::StartArray, Event::EndArray, Event::Eof]
    );
}

// ----------------------------------------------------------------------
// Objects
// ----------------------------------------------------------------------

#[test]
fn nested_object() {
    assert_eq!(
        events("user:\n  id: 123\n  name: Ada"),
        vec![
            Event::StartObject,
            field("user"),
            Event::StartObject,
            field("id"),
            Event::Integer(123),
            field("name"),
            s("Ada"),
            Event::EndObject,
            Event::EndObject,
            Event::Eof
        ]
    );
}

#[test]
fn empty_object_value() {
    assert_eq!(
        events("a:\nb: 1"),
        vec![
            Event::StartObject,
            field("a"),
            Event::StartObject,
            Event::EndObject,
            field("b"),
            Event::Integer(1),
            Event::EndObject,
            Event::Eof
        ]
    );
}

#[test]
fn empty_object_value_at_end_of_input() {
    assert_eq!(
        events("a:"),
        vec![
            Event::StartObject,
            field("a"),
            Event::StartObject,
            Event::EndObject,
            Event::EndObject,
            Event::Eof
        ]
    );
}

#[test]
fn dotted_keys_are_literal() {
    assert_eq!(
        events("data.field: 1"),
        vec![
            Event::StartObject,
            field("data.field"),
            Event::Integer(1),
            Event::EndObject,
            Event::Eof
        ]
    );
}

#[test]
fn quoted_keys() {
    assert_eq!(
        events("\"user name\": 1"),
        vec![
            Event::StartObject,
            field("user name"),
            Event::Integer(1),
            Event::EndObject,
            Event::Eof
        ]
    );
}

#[test]
fn multiword_values() {
    assert_eq!(
        events("note: hello world"),
        vec![
            Event::StartObject,
            field("note"),
            s("hello world"),
            Event::EndObject,
            Event::Eof
        ]
    );
}

#[test]
fn blank_lines_between_fields() {
    assert_eq!(
        events("a: 1\n\n\nb: 2"),
        vec![
            Event::StartObject,
            field("a"),
            Event::Integer(1),
            field("b"),
            Event::Integer(2),
            Event::EndObject,
            Event::Eof
        ]
    );
}

#[test]
fn deep_dedent_returns_to_top_level() {
    assert_eq!(
        events("a:\n  b:\n    c: v\nd: w"),
        vec![
            Event::StartObject,
            field("a"),
            Event::StartObject,
            field("b"),
            Event::StartObject,
            field("c"),
            s("v"),
            Event::EndObject,
            Event::EndObject,
            field("d"),
            s("w"),
            Event::EndObject,
            Event::Eof
        ]
    );
}

// ----------------------------------------------------------------------
// Inline arrays
// ----------------------------------------------------------------------

#[test]
fn inline_array_in_object() {
    assert_eq!(
        events("tags[3]: a,b,c"),
        vec![
            Event::StartObject,
            field("tags"),
            Event::StartArray,
            s("a"),
            s("b"),
            s("c"),
            Event::EndArray,
            Event::EndObject,
            Event::Eof
        ]
    );
}

#[test]
fn inline_array_mixed_primitives() {
    assert_eq!(
        events("[4]: 1,true,null,text"),
        vec![
            Event::StartArray,
            Event::Integer(1),
            Event::Bool(true),
            Event::Null,
            s("text"),
            Event::EndArray,
            Event::Eof
        ]
    );
}

#[test]
fn inline_array_quoted_elements() {
    assert_eq!(
        events("[2]: \"a,x\",\"b,y\""),
        vec![
            Event::StartArray,
            s("a,x"),
            s("b,y"),
            Event::EndArray,
            Event::Eof
        ]
    );
}

#[test]
fn inline_array_pipe_delimiter() {
    assert_eq!(
        events("tags[3|]: a|b|c"),
        vec![
            Event::StartObject,
            field("tags"),
            Event::StartArray,
            s("a"),
            s("b"),
            s("c"),
            Event::EndArray,
            Event::EndObject,
            Event::Eof
        ]
    );
}

#[test]
fn inline_array_tab_delimiter() {
    assert_eq!(
        events("tags[3\t]: a\tb\tc"),
        vec![
            Event::StartObject,
            field("tags"),
            Event::StartArray,
            s("a"),
            s("b"),
            s("c"),
            Event::EndArray,
            Event::EndObject,
            Event::Eof
        ]
    );
}

#[test]
fn inline_array_body_on_own_line() {
    assert_eq!(
        events("nums[2]:\n  1,2"),
        vec![
            Event::StartObject,
            field("nums"),
            Event::StartArray,
            Event::Integer(1),
            Event::Integer(2),
            Event::EndArray,
            Event::EndObject,
            Event::Eof
        ]
    );
}

#[test]
fn empty_array_in_object() {
    assert_eq!(
        events("tags[0]:\nnext: 1"),
        vec![
            Event::StartObject,
            field("tags"),
            Event::StartArray,
            Event::EndArray,
            field("next"),
            Event::Integer(1),
            Event::EndObject,
            Event::Eof
        ]
    );
}

#[test]
fn sibling_field_after_inline_array() {
    assert_eq!(
        events("tags[2]: a,b\nname: Bob"),
        vec![
            Event::StartObject,
            field("tags"),
            Event::StartArray,
            s("a"),
            s("b"),
            Event::EndArray,
            field("name"),
            s("Bob"),
            Event::EndObject,
            Event::Eof
        ]
    );
}

// ----------------------------------------------------------------------
// Tabular arrays
// ----------------------------------------------------------------------

#[test]
fn tabular_array() {
    assert_eq!(
        events("users[2]{id,name}:\n  1,Alice\n  2,Bob"),
        vec![
            Event::StartObject,
            field("users"),
            Event::StartArray,
            Event::StartObject,
            field("id"),
            Event::Integer(1),
            field("name"),
            s("Alice"),
            Event::EndObject,
            Event::StartObject,
            field("id"),
            Event::Integer(2),
            field("name"),
            s("Bob"),
            Event::EndObject,
            Event::EndArray,
            Event::EndObject,
            Event::Eof
        ]
    );
}

#[test]
fn tabular_array_at_root() {
    assert_eq!(
        events("[1]{id}:\n  7"),
        vec![
            Event::StartArray,
            Event::StartObject,
            field("id"),
            Event::Integer(7),
            Event::EndObject,
            Event::EndArray,
            Event::Eof
        ]
    );
}

#[test]
fn tabular_pipe_delimiter_from_field_list() {
    // No marker in the brackets: the field list announces the delimiter.
    assert_eq!(
        events("users[2]{id|name}:\n  1|Alice\n  2|Bob"),
        vec![
            Event::StartObject,
            field("users"),
            Event::StartArray,
            Event::StartObject,
            field("id"),
            Event::Integer(1),
            field("name"),
            s("Alice"),
            Event::EndObject,
            Event::StartObject,
            field("id"),
            Event::Integer(2),
            field("name"),
            s("Bob"),
            Event::EndObject,
            Event::EndArray,
            Event::EndObject,
            Event::Eof
        ]
    );
}

#[test]
fn tabular_empty_cell_is_empty_string() {
    assert_eq!(
        events("rows[1]{a,b,c}:\n  1,,Bob"),
        vec![
            Event::StartObject,
            field("rows"),
            Event::StartArray,
            Event::StartObject,
            field("a"),
            Event::Integer(1),
            field("b"),
            s(""),
            field("c"),
            s("Bob"),
            Event::EndObject,
            Event::EndArray,
            Event::EndObject,
            Event::Eof
        ]
    );
}

#[test]
fn tabular_row_at_wrong_indent_is_rejected() {
    let err = parse_fails("users[2]{id}:\n  1\n    2");
    assert!(err.to_string().contains("Tabular row"));
}

// ----------------------------------------------------------------------
// List arrays
// ----------------------------------------------------------------------

#[test]
fn list_array_of_primitives() {
    assert_eq!(
        events("items[2]:\n  - apple\n  - banana"),
        vec![
            Event::StartObject,
            field("items"),
            Event::StartArray,
            s("apple"),
            s("banana"),
            Event::EndArray,
            Event::EndObject,
            Event::Eof
        ]
    );
}

#[test]
fn list_array_of_objects() {
    assert_eq!(
        events("items[2]:\n  - id: 1\n    name: First\n  - id: 2\n    name: Second"),
        vec![
            Event::StartObject,
            field("items"),
            Event::StartArray,
            Event::StartObject,
            field("id"),
            Event::Integer(1),
            field("name"),
            s("First"),
            Event::EndObject,
            Event::StartObject,
            field("id"),
            Event::Integer(2),
            field("name"),
            s("Second"),
            Event::EndObject,
            Event::EndArray,
            Event::EndObject,
            Event::Eof
        ]
    );
}

#[test]
fn list_item_with_nested_inline_array() {
    assert_eq!(
        events("items[2]:\n  - [2]: a,b\n  - x"),
        vec![
            Event::StartObject,
            field("items"),
            Event::StartArray,
            Event::StartArray,
            s("a"),
            s("b"),
            Event::EndArray,
            s("x"),
            Event::EndArray,
            Event::EndObject,
            Event::Eof
        ]
    );
}

#[test]
fn list_item_object_with_array_field_on_hyphen_line() {
    assert_eq!(
        events("items[1]:\n  - tags[2]: a,b\n    name: x"),
        vec![
            Event::StartObject,
            field("items"),
            Event::StartArray,
            Event::StartObject,
            field("tags"),
            Event::StartArray,
            s("a"),
            s("b"),
            Event::EndArray,
            field("name"),
            s("x"),
            Event::EndObject,
            Event::EndArray,
            Event::EndObject,
            Event::Eof
        ]
    );
}

#[test]
fn single_field_list_item_with_nested_object() {
    assert_eq!(
        events("items[1]:\n  - meta:\n    x: 1"),
        vec![
            Event::StartObject,
            field("items"),
            Event::StartArray,
            Event::StartObject,
            field("meta"),
            Event::StartObject,
            field("x"),
            Event::Integer(1),
            Event::EndObject,
            Event::EndObject,
            Event::EndArray,
            Event::EndObject,
            Event::Eof
        ]
    );
}

// ----------------------------------------------------------------------
// Strict-mode rejections
// ----------------------------------------------------------------------

#[test]
fn strict_rejects_short_inline_array() {
    let err = parse_fails("[3]: a,b");
    assert!(err.to_string().contains("length mismatch"));
}

#[test]
fn strict_rejects_long_inline_array() {
    let err = parse_fails("[2]: a,b,c");
    assert!(err.to_string().contains("length mismatch"));
}

#[test]
fn strict_rejects_odd_indentation() {
    let err = parse_fails("user:\n   id: 1");
    assert!(err.to_string().contains("not a multiple"));
}

#[test]
fn strict_rejects_wide_tabular_row() {
    let err = parse_fails("users[2]{id,name}:\n  1,Alice\n  2,Bob,extra");
    assert!(err.to_string().contains("width mismatch"));
}

#[test]
fn strict_rejects_narrow_tabular_row() {
    let err = parse_fails("users[2]{id,name}:\n  1,Alice\n  2");
    assert!(err.to_string().contains("width mismatch"));
}

#[test]
fn strict_rejects_tab_in_indentation() {
    let err = parse_fails("user:\n\tid: 1");
    assert!(err.to_string().contains("Tab character"));
}

#[test]
fn strict_rejects_unterminated_string() {
    let err = parse_fails("\"unterminated");
    assert!(err.to_string().contains("Unterminated"));
}

#[test]
fn strict_rejects_missing_rows() {
    let err = parse_fails("users[3]{id}:\n  1\n  2");
    assert!(err.to_string().contains("length mismatch"));
}

#[test]
fn strict_rejects_numeric_field_names() {
    let err = parse_fails("42: x");
    assert!(err.to_string().contains("must be quoted"));
}

#[test]
fn strict_rejects_missing_colon() {
    let err = parse_fails("age: 3\nname Alice");
    assert!(err.to_string().contains("Expected ':'"));
}

#[test]
fn depth_limit_is_enforced() {
    let mut doc = String::new();
    for level in 0..10 {
        doc.push_str(&"  ".repeat(level));
        doc.push_str("a:\n");
    }
    doc.push_str(&"  ".repeat(10));
    doc.push_str("a: 1");

    let options = ToonOptions::new().with_max_nesting_depth(5);
    let err = Parser::with_options(&doc, &options)
        .into_events()
        .expect_err("depth limit should trip");
    assert!(err.to_string().contains("Nesting depth exceeded"));

    // The same document is fine under the default limit.
    assert!(parse_events(&doc).is_ok());
}

// ----------------------------------------------------------------------
// Lenient-mode recovery
// ----------------------------------------------------------------------

#[test]
fn lenient_accepts_the_strict_rejection_set() {
    let lenient = ToonOptions::lenient();
    for input in [
        "[3]: a,b",
        "[2]: a,b,c",
        "user:\n   id: 1",
        "users[2]{id,name}:\n  1,Alice\n  2,Bob,extra",
        "user:\n\tid: 1",
        "\"unterminated",
    ] {
        let result = Parser::with_options(input, &lenient).into_events();
        assert!(result.is_ok(), "lenient mode should accept {:?}", input);
    }
}

#[test]
fn lenient_takes_array_length_as_counted() {
    let lenient = ToonOptions::lenient();
    assert_eq!(
        events_with("[3]: a,b", &lenient),
        vec![Event::StartArray, s("a"), s("b"), Event::EndArray, Event::Eof]
    );
    assert_eq!(
        events_with("[2]: a,b,c", &lenient),
        vec![
            Event::StartArray,
            s("a"),
            s("b"),
            s("c"),
            Event::EndArray,
            Event::Eof
        ]
    );
}

#[test]
fn lenient_drops_extra_row_values() {
    let lenient = ToonOptions::lenient();
    assert_eq!(
        events_with("users[1]{id,name}:\n  1,Alice,extra", &lenient),
        vec![
            Event::StartObject,
            field("users"),
            Event::StartArray,
            Event::StartObject,
            field("id"),
            Event::Integer(1),
            field("name"),
            s("Alice"),
            Event::EndObject,
            Event::EndArray,
            Event::EndObject,
            Event::Eof
        ]
    );
}

#[test]
fn lenient_accepts_numeric_field_names() {
    let lenient = ToonOptions::lenient();
    assert_eq!(
        events_with("42: x", &lenient),
        vec![
            Event::StartObject,
            field("42"),
            s("x"),
            Event::EndObject,
            Event::Eof
        ]
    );
}

// ----------------------------------------------------------------------
// Structural balance
// ----------------------------------------------------------------------

#[test]
fn event_streams_are_balanced() {
    let corpus = [
        "",
        "42",
        "name: Alice",
        "user:\n  id: 123\n  name: Ada",
        "[3]: a,b,c",
        "[0]:",
        "users[2]{id,name}:\n  1,Alice\n  2,Bob",
        "items[2]:\n  - apple\n  - banana",
        "items[2]:\n  - id: 1\n    name: First\n  - id: 2\n    name: Second",
        "a:\n  b:\n    c: v\nd: w",
        "tags[0]:\nnext: 1",
    ];

    for input in corpus {
        let events = events(input);
        let count = |needle: &Event| events.iter().filter(|e| *e == needle).count();
        assert_eq!(
            count(&Event::StartObject),
            count(&Event::EndObject),
            "object balance for {:?}",
            input
        );
        assert_eq!(
            count(&Event::StartArray),
            count(&Event::EndArray),
            "array balance for {:?}",
            input
        );
        assert_eq!(events.last(), Some(&Event::Eof));

        let mut depth = 0i64;
        for event in &events {
            match event {
                Event::StartObject | Event::StartArray => depth += 1,
                Event::EndObject | Event::EndArray => {
                    depth -= 1;
                    assert!(depth >= 0, "end before start in {:?}", input);
                }
                _ => {}
            }
        }
        assert_eq!(depth, 0, "unclosed scope in {:?}", input);
    }
}
