//! Dynamic value representation for TOON data.
//!
//! This module provides the [`Value`] enum which represents any valid TOON
//! document. It is built on top of the streaming surface: decoding walks
//! the parser's events into a tree, encoding replays a tree into the
//! generator (in buffering mode, so array format selection applies).
//!
//! ## Core Types
//!
//! - [`Value`]: any TOON value (null, bool, number, string, array, object)
//! - [`Number`]: an integral or fractional number
//!
//! ## Usage Patterns
//!
//! ### Creating Values
//!
//! ```rust
//! use toon_stream::{toon, Value};
//!
//! let null = Value::Null;
//! let boolean = Value::from(true);
//! let number = Value::from(42);
//! let text = Value::from("hello");
//!
//! let obj = toon!({
//!     "name": "Alice",
//!     "age": 30
//! });
//! assert!(obj.is_object());
//! ```
//!
//! ### Type Checking and Extraction
//!
//! ```rust
//! use toon_stream::Value;
//!
//! let value = Value::from(42);
//! assert!(value.is_number());
//! assert_eq!(value.as_i64(), Some(42));
//! assert_eq!(value.as_str(), None);
//! ```

use crate::error::Result;
use crate::generator::Generator;
use crate::map::ToonMap;
use crate::parser::Parser;
use crate::Event;

/// A dynamically-typed representation of any valid TOON value.
///
/// # Examples
///
/// ```rust
/// use toon_stream::{Number, Value};
///
/// let null = Value::Null;
/// let num = Value::Number(Number::Integer(42));
/// let text = Value::String("hello".to_string());
///
/// assert!(null.is_null());
/// assert!(num.is_number());
/// assert!(text.is_string());
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    Object(ToonMap),
}

/// An integral or fractional numeric value.
///
/// The distinction is preserved end to end: `42` decodes as
/// `Number::Integer`, `42.0` as `Number::Float`, and each re-encodes in
/// its own form.
///
/// # Examples
///
/// ```rust
/// use toon_stream::Number;
///
/// let integer = Number::Integer(42);
/// let float = Number::Float(3.5);
///
/// assert!(integer.is_integer());
/// assert_eq!(integer.as_i64(), Some(42));
/// assert_eq!(float.as_f64(), 3.5);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    /// Returns `true` if this is an integral value.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    /// Returns `true` if this is a fractional value.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Converts to `i64` if the value is integral.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::Float(_) => None,
        }
    }

    /// Converts to `f64`, widening integers.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }
}

impl Value {
    /// Returns `true` if this value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if this value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns `true` if this value is a number.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Returns `true` if this value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` if this value is an array.
    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns `true` if this value is an object.
    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Returns `true` for null, booleans, numbers and strings.
    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        !matches!(self, Value::Array(_) | Value::Object(_))
    }

    /// Returns the boolean if this value is one.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer if this value is an integral number.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// Returns the numeric value as `f64` if this value is a number.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    /// Returns the string if this value is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements if this value is an array.
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the fields if this value is an object.
    #[must_use]
    pub fn as_object(&self) -> Option<&ToonMap> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up a field of an object value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toon_stream::toon;
    ///
    /// let value = toon!({ "name": "Alice" });
    /// assert_eq!(value.get("name").and_then(|v| v.as_str()), Some("Alice"));
    /// assert!(value.get("missing").is_none());
    /// ```
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Builds a value from a parser's event stream.
    pub(crate) fn from_parser(parser: &mut Parser<'_>) -> Result<Value> {
        enum Holder {
            Object(ToonMap, Option<String>),
            Array(Vec<Value>),
        }

        let mut stack: Vec<Holder> = Vec::new();
        let mut root: Option<Value> = None;

        fn attach(stack: &mut Vec<Holder>, root: &mut Option<Value>, value: Value) {
            match stack.last_mut() {
                Some(Holder::Object(map, pending)) => {
                    if let Some(name) = pending.take() {
                        map.insert(name, value);
                    }
                }
                Some(Holder::Array(items)) => items.push(value),
                None => *root = Some(value),
            }
        }

        loop {
            match parser.next_event()? {
                Event::StartObject => stack.push(Holder::Object(ToonMap::new(), None)),
                Event::StartArray => stack.push(Holder::Array(Vec::new())),
                Event::FieldName(name) => {
                    if let Some(Holder::Object(_, pending)) = stack.last_mut() {
                        *pending = Some(name);
                    }
                }
                Event::EndObject => {
                    if let Some(Holder::Object(map, _)) = stack.pop() {
                        attach(&mut stack, &mut root, Value::Object(map));
                    }
                }
                Event::EndArray => {
                    if let Some(Holder::Array(items)) = stack.pop() {
                        attach(&mut stack, &mut root, Value::Array(items));
                    }
                }
                Event::String(s) => attach(&mut stack, &mut root, Value::String(s)),
                Event::Integer(i) => {
                    attach(&mut stack, &mut root, Value::Number(Number::Integer(i)));
                }
                Event::Float(f) => {
                    attach(&mut stack, &mut root, Value::Number(Number::Float(f)));
                }
                Event::Bool(b) => attach(&mut stack, &mut root, Value::Bool(b)),
                Event::Null => attach(&mut stack, &mut root, Value::Null),
                Event::Eof => return Ok(root.unwrap_or_default()),
            }
        }
    }

    /// Replays this value into a generator.
    pub(crate) fn write(&self, gen: &mut Generator) -> Result<()> {
        match self {
            Value::Null => gen.write_null(),
            Value::Bool(b) => gen.write_bool(*b),
            Value::Number(Number::Integer(i)) => gen.write_integer(*i),
            Value::Number(Number::Float(f)) => gen.write_float(*f),
            Value::String(s) => gen.write_string(s),
            Value::Array(items) => {
                gen.write_start_array(None)?;
                for item in items {
                    item.write(gen)?;
                }
                gen.write_end_array()
            }
            Value::Object(map) => {
                gen.write_start_object()?;
                for (key, value) in map.iter() {
                    gen.write_field_name(key)?;
                    value.write(gen)?;
                }
                gen.write_end_object()
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Number(Number::Integer(i64::from(i)))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Number(Number::Integer(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Number(Number::Integer(i64::from(i)))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Number(Number::Float(f))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<ToonMap> for Value {
    fn from(map: ToonMap) -> Self {
        Value::Object(map)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Value {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        Value::Object(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        assert!(Value::Null.is_null());
        assert_eq!(Value::from(true).as_bool(), Some(true));
        assert_eq!(Value::from(42).as_i64(), Some(42));
        assert_eq!(Value::from(1.5).as_f64(), Some(1.5));
        assert_eq!(Value::from(42).as_f64(), Some(42.0));
        assert_eq!(Value::from("x").as_str(), Some("x"));
        assert!(Value::from(1.5).as_i64().is_none());
    }

    #[test]
    fn object_from_pairs() {
        let value: Value = [("a", Value::from(1)), ("b", Value::from(2))]
            .into_iter()
            .collect();
        assert_eq!(value.get("a"), Some(&Value::from(1)));
        assert_eq!(value.get("b"), Some(&Value::from(2)));
        assert_eq!(value.as_object().map(ToonMap::len), Some(2));
    }

    #[test]
    fn scalar_classification() {
        assert!(Value::Null.is_scalar());
        assert!(Value::from("x").is_scalar());
        assert!(!Value::Array(vec![]).is_scalar());
        assert!(!Value::Object(ToonMap::new()).is_scalar());
    }
}
