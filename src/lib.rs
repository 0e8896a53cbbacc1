//! # toon_stream
//!
//! A streaming codec for the TOON (Token-Oriented Object Notation) format.
//!
//! ## What is TOON?
//!
//! TOON is a compact, human-readable data format designed for efficient
//! communication with Large Language Models (LLMs). It encodes the JSON
//! data model as indented `key: value` lines and achieves 30-60% fewer
//! tokens than equivalent JSON while staying readable.
//!
//! ## Key Features
//!
//! - **Streaming core**: a lexer, an event parser and an event generator;
//!   memory use is bounded by nesting depth, not document size
//! - **Three array formats**: inline (`tags[3]: a,b,c`), list
//!   (`- ` items) and tabular (`users[2]{id,name}:` with one row per
//!   element)
//! - **Strict and lenient modes**: hard validation of indentation, array
//!   lengths and row widths, or best-effort recovery
//! - **Dynamic values**: a [`Value`] tree plus the [`toon!`] macro for
//!   working with documents whose shape is not known at compile time
//! - **No unsafe code**
//!
//! ## Quick Start
//!
//! ```rust
//! use toon_stream::{from_str, to_string, toon};
//!
//! let value = toon!({
//!     "id": 123,
//!     "name": "Alice",
//!     "active": true
//! });
//!
//! let text = to_string(&value).unwrap();
//! assert_eq!(text, "id: 123\nname: Alice\nactive: true");
//!
//! let back = from_str(&text).unwrap();
//! assert_eq!(back, value);
//! ```
//!
//! ## Streaming
//!
//! The event surface is the core of the crate; the [`Value`] conveniences
//! are built on top of it. Decoding pulls [`Event`]s from a [`Parser`]:
//!
//! ```rust
//! use toon_stream::{Event, Parser};
//!
//! let mut parser = Parser::new("users[2]{id,name}:\n  1,Alice\n  2,Bob");
//! let mut names = Vec::new();
//! loop {
//!     match parser.next_event().unwrap() {
//!         Event::Eof => break,
//!         Event::String(s) => names.push(s),
//!         _ => {}
//!     }
//! }
//! assert_eq!(names, vec!["Alice", "Bob"]);
//! ```
//!
//! Encoding pushes the same events into a [`Generator`]. Arrays started
//! with a size hint stream straight to the output; arrays without one are
//! buffered so the generator can pick the best format:
//!
//! ```rust
//! use toon_stream::Generator;
//!
//! let mut gen = Generator::new();
//! gen.write_start_object().unwrap();
//! gen.write_field_name("tags").unwrap();
//! gen.write_start_array(Some(3)).unwrap();
//! gen.write_string("a").unwrap();
//! gen.write_string("b").unwrap();
//! gen.write_string("c").unwrap();
//! gen.write_end_array().unwrap();
//! gen.write_end_object().unwrap();
//! assert_eq!(gen.finish().unwrap(), "tags[3]: a,b,c");
//! ```
//!
//! ## Format Notes
//!
//! See the [`spec`] module for the wire format as implemented here, and
//! <https://github.com/toon-format/toon> for the upstream format.

pub mod context;
pub mod error;
pub mod event;
pub mod generator;
pub mod lexer;
pub mod macros;
pub mod map;
pub mod options;
pub mod parser;
pub mod spec;
pub mod token;
pub mod value;

pub use error::{Error, Result};
pub use event::Event;
pub use generator::Generator;
pub use lexer::Lexer;
pub use map::ToonMap;
pub use options::{Delimiter, ToonOptions};
pub use parser::Parser;
pub use token::Token;
pub use value::{Number, Value};

/// Parses a TOON document into a [`Value`].
///
/// # Examples
///
/// ```rust
/// use toon_stream::from_str;
///
/// let value = from_str("x: 1\ny: 2").unwrap();
/// assert_eq!(value.get("x").and_then(|v| v.as_i64()), Some(1));
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid TOON under the default
/// (strict) options. Error messages include line and column information.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(input: &str) -> Result<Value> {
    from_str_with_options(input, &ToonOptions::default())
}

/// Parses a TOON document into a [`Value`] with custom options.
///
/// # Examples
///
/// ```rust
/// use toon_stream::{from_str_with_options, ToonOptions};
///
/// // Lenient mode takes array lengths as counted.
/// let value = from_str_with_options("[3]: a,b", &ToonOptions::lenient()).unwrap();
/// assert_eq!(value.as_array().map(Vec::len), Some(2));
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid TOON under the given options.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options(input: &str, options: &ToonOptions) -> Result<Value> {
    let mut parser = Parser::with_options(input, options);
    Value::from_parser(&mut parser)
}

/// Encodes a [`Value`] as a TOON string.
///
/// Arrays go through the generator's buffering mode, so uniform object
/// arrays come out tabular and short primitive arrays inline.
///
/// # Examples
///
/// ```rust
/// use toon_stream::{to_string, toon};
///
/// let value = toon!({ "scores": [95, 87, 92] });
/// assert_eq!(to_string(&value).unwrap(), "scores[3]: 95,87,92");
/// ```
///
/// # Errors
///
/// Returns an error for shapes the wire format cannot express (such as an
/// empty object used as a list element).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string(value: &Value) -> Result<String> {
    to_string_with_options(value, &ToonOptions::default())
}

/// Encodes a [`Value`] as a TOON string with custom options.
///
/// # Examples
///
/// ```rust
/// use toon_stream::{to_string_with_options, toon, Delimiter, ToonOptions};
///
/// let value = toon!({ "tags": ["a", "b"] });
/// let options = ToonOptions::new().with_delimiter(Delimiter::Pipe);
/// assert_eq!(
///     to_string_with_options(&value, &options).unwrap(),
///     "tags[2|]: a|b"
/// );
/// ```
///
/// # Errors
///
/// Returns an error for shapes the wire format cannot express.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options(value: &Value, options: &ToonOptions) -> Result<String> {
    let mut generator = Generator::with_options(options.clone());
    value.write(&mut generator)?;
    generator.finish()
}

/// Collects the full event stream of a document, ending with [`Event::Eof`].
///
/// # Examples
///
/// ```rust
/// use toon_stream::{parse_events, Event};
///
/// let events = parse_events("42").unwrap();
/// assert_eq!(events, vec![Event::Integer(42), Event::Eof]);
/// ```
///
/// # Errors
///
/// Returns the first decoding error, if any.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_events(input: &str) -> Result<Vec<Event>> {
    Parser::new(input).into_events()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_object() {
        let value = toon!({
            "id": 123,
            "name": "Alice",
            "active": true,
            "tags": ["admin", "user"]
        });
        let text = to_string(&value).unwrap();
        let back = from_str(&text).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn test_roundtrip_array_of_objects() {
        let value = toon!([
            { "id": 1, "name": "Widget" },
            { "id": 2, "name": "Gadget" }
        ]);
        let text = to_string(&value).unwrap();
        assert!(text.starts_with("[2]{id,name}:"));
        let back = from_str(&text).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn test_empty_document_is_empty_object() {
        let value = from_str("").unwrap();
        assert_eq!(value, Value::Object(ToonMap::new()));
    }

    #[test]
    fn test_root_primitive() {
        assert_eq!(from_str("42").unwrap(), Value::from(42));
        assert_eq!(from_str("hello").unwrap(), Value::from("hello"));
    }

    #[test]
    fn test_custom_delimiter_roundtrip() {
        let value = toon!({ "tags": ["a,b", "c"] });
        let options = ToonOptions::new().with_delimiter(Delimiter::Pipe);
        let text = to_string_with_options(&value, &options).unwrap();
        let back = from_str(&text).unwrap();
        assert_eq!(back, value);
    }
}
