//! The streaming event vocabulary shared by the parser and the generator.
//!
//! Events are isomorphic to the generic JSON streaming model: structural
//! start/end pairs, field names, and scalar values. The parser emits them
//! in a deterministic, structurally balanced order: for every
//! `StartObject`/`StartArray` there is exactly one matching
//! `EndObject`/`EndArray` before `Eof`.

/// A single decoding event.
///
/// # Examples
///
/// ```rust
/// use toon_stream::{parse_events, Event};
///
/// let events = parse_events("name: Alice").unwrap();
/// assert_eq!(
///     events,
///     vec![
///         Event::StartObject,
///         Event::FieldName("name".to_string()),
///         Event::String("Alice".to_string()),
///         Event::EndObject,
///         Event::Eof,
///     ]
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Start of an object
    StartObject,
    /// End of an object
    EndObject,
    /// Start of an array (inline, tabular and list formats all map here)
    StartArray,
    /// End of an array
    EndArray,
    /// A field name inside an object
    FieldName(String),
    /// A string value (quoted or unquoted in the source)
    String(String),
    /// An integral number
    Integer(i64),
    /// A fractional number (had a decimal point or exponent in the source)
    Float(f64),
    /// `true` or `false`
    Bool(bool),
    /// `null`
    Null,
    /// End of the document
    Eof,
}

impl Event {
    /// Returns `true` if this event is a scalar value.
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Event::String(_) | Event::Integer(_) | Event::Float(_) | Event::Bool(_) | Event::Null
        )
    }

    /// Returns the text of a `FieldName` or `String` event.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Event::FieldName(s) | Event::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value of an `Integer` event.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Event::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the numeric value of an `Integer` or `Float` event.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Event::Integer(i) => Some(*i as f64),
            Event::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the value of a `Bool` event.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Event::Bool(b) => Some(*b),
            _ => None,
        }
    }
}
