/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// Keys are string literals; values may be `null`, `true`, `false`,
/// numbers, strings, nested arrays and objects, or any expression with a
/// `Value::from` conversion.
///
/// ```rust
/// use toon_stream::toon;
///
/// let data = toon!({
///     "name": "Alice",
///     "age": 30,
///     "tags": ["rust", "llm"]
/// });
/// assert_eq!(data.get("name").and_then(|v| v.as_str()), Some("Alice"));
/// ```
#[macro_export]
macro_rules! toon {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    // Arrays, including `[]`
    ([ $($item:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::toon!($item)),*])
    };

    // Objects, including `{}`; insertion order is the field order
    ({ $($name:literal : $field:tt),* $(,)? }) => {{
        let mut fields = $crate::ToonMap::new();
        $(
            fields.insert($name.to_string(), $crate::toon!($field));
        )*
        $crate::Value::Object(fields)
    }};

    // Anything else with a Value::from conversion
    ($raw:expr) => {
        $crate::Value::from($raw)
    };
}

#[cfg(test)]
mod tests {
    use crate::{Number, Value};

    #[test]
    fn keyword_literals() {
        assert_eq!(toon!(null), Value::Null);
        assert_eq!(toon!(true), Value::Bool(true));
        assert_eq!(toon!(false), Value::Bool(false));
    }

    #[test]
    fn numbers_keep_their_kind() {
        assert_eq!(toon!(7), Value::Number(Number::Integer(7)));
        assert_eq!(toon!(7.25), Value::Number(Number::Float(7.25)));
        assert!(matches!(toon!(7.0), Value::Number(Number::Float(_))));
    }

    #[test]
    fn empty_collections() {
        assert_eq!(toon!([]), Value::Array(Vec::new()));
        assert!(matches!(toon!({}), Value::Object(m) if m.is_empty()));
    }

    #[test]
    fn arrays_mix_scalar_kinds() {
        let value = toon!([1, "two", 3.5, null, false]);
        let items = value.as_array().expect("array");
        assert_eq!(items[0].as_i64(), Some(1));
        assert_eq!(items[1].as_str(), Some("two"));
        assert_eq!(items[2].as_f64(), Some(3.5));
        assert!(items[3].is_null());
        assert_eq!(items[4].as_bool(), Some(false));
    }

    #[test]
    fn objects_nest_and_keep_field_order() {
        let value = toon!({
            "user": { "id": 9, "tags": ["a", "b"] },
            "active": true
        });
        let map = value.as_object().expect("object");
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec!["user", "active"]);

        let tags = value.get("user").and_then(|u| u.get("tags")).expect("tags");
        assert_eq!(tags.as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn expressions_go_through_value_from() {
        let name = String::from("dynamic");
        assert_eq!(toon!(name), Value::String("dynamic".to_string()));
        assert_eq!(toon!((2 + 2)), Value::Number(Number::Integer(4)));
    }
}
