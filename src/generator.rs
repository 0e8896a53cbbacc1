//! Streaming generator for the TOON format.
//!
//! The generator is the dual of the parser: it accepts the same event
//! vocabulary through its `write_*` methods and produces TOON text. Its
//! interesting problem is array format selection:
//!
//! - **Streaming mode**: `write_start_array(Some(n))`. The header is
//!   written as soon as the first element reveals the shape: a primitive
//!   fixes inline form (`name[N]: a,b,c`), an object fixes list form
//!   (`name[N]:` followed by `- ` items). The format cannot change for the
//!   rest of the array, and nothing is buffered.
//! - **Buffering mode**: `write_start_array(None)`. Elements are collected
//!   and the format is chosen when the array ends: tabular when every
//!   element is an object with the same key set and primitive values,
//!   inline when everything is primitive and the array is short, list form
//!   otherwise.
//!
//! Output discipline: LF line endings only, no trailing whitespace on any
//! line, and no trailing newline at the end of the document.
//!
//! ## Usage
//!
//! ```rust
//! use toon_stream::Generator;
//!
//! let mut gen = Generator::new();
//! gen.write_start_object().unwrap();
//! gen.write_field_name("name").unwrap();
//! gen.write_string("Alice").unwrap();
//! gen.write_end_object().unwrap();
//! assert_eq!(gen.finish().unwrap(), "name: Alice");
//! ```

use crate::error::{Error, Result};
use crate::event::Event;
use crate::map::ToonMap;
use crate::options::ToonOptions;
use crate::value::{Number, Value};

/// Buffered arrays at or below this length come out inline when all their
/// elements are primitive.
const INLINE_BUFFER_LIMIT: usize = 10;

/// Whole-number floats at or above this magnitude print without a
/// fractional marker; their natural literals are exponent forms, and those
/// canonicalize to the bare integer spelling.
const FLOAT_MARKER_LIMIT: f64 = 1e6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StreamFormat {
    Inline,
    List,
}

#[derive(Debug)]
enum GenFrame {
    /// An object being written line by line.
    Object {
        indent: usize,
        pending_field: Option<String>,
        /// The next line continues a `- ` prefix already on the output.
        hyphen_line: bool,
    },
    /// An array with a size hint, written as elements arrive.
    StreamingArray {
        indent: usize,
        name: Option<String>,
        declared: usize,
        count: usize,
        format: Option<StreamFormat>,
        hyphen_line: bool,
    },
    /// An array without a size hint, collected for deferred format choice.
    BufferingArray {
        indent: usize,
        name: Option<String>,
        items: Vec<Value>,
        hyphen_line: bool,
    },
    /// An object collected inside a buffering array.
    BufferObject {
        name: Option<String>,
        map: ToonMap,
        pending_field: Option<String>,
    },
    /// An array collected inside a buffering array.
    BufferArray {
        name: Option<String>,
        items: Vec<Value>,
    },
}

/// The TOON generator.
///
/// Created via [`Generator::new`] or [`Generator::with_options`]; drives a
/// `String` sink and returns the document from [`Generator::finish`].
pub struct Generator {
    out: String,
    frames: Vec<GenFrame>,
    options: ToonOptions,
    root_done: bool,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    /// Creates a generator with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(ToonOptions::default())
    }

    /// Creates a generator with the given options.
    #[must_use]
    pub fn with_options(options: ToonOptions) -> Self {
        Generator {
            out: String::with_capacity(256),
            frames: Vec::new(),
            options,
            root_done: false,
        }
    }

    /// Applies a parser [`Event`] to this generator. `Eof` is a no-op.
    pub fn write_event(&mut self, event: &Event) -> Result<()> {
        match event {
            Event::StartObject => self.write_start_object(),
            Event::EndObject => self.write_end_object(),
            Event::StartArray => self.write_start_array(None),
            Event::EndArray => self.write_end_array(),
            Event::FieldName(name) => self.write_field_name(name),
            Event::String(s) => self.write_string(s),
            Event::Integer(i) => self.write_integer(*i),
            Event::Float(f) => self.write_float(*f),
            Event::Bool(b) => self.write_bool(*b),
            Event::Null => self.write_null(),
            Event::Eof => Ok(()),
        }
    }

    /// Finishes the document, validating balance.
    ///
    /// # Errors
    ///
    /// Fails if any object or array is still open.
    pub fn finish(mut self) -> Result<String> {
        if !self.frames.is_empty() {
            return Err(Error::generate("Unclosed object or array at end of document"));
        }
        if self.out.ends_with('\n') {
            self.out.pop();
        }
        Ok(self.out)
    }

    // ------------------------------------------------------------------
    // Structure
    // ------------------------------------------------------------------

    pub fn write_start_object(&mut self) -> Result<()> {
        match self.frames.last_mut() {
            None => {
                if self.root_done {
                    return Err(Error::generate("Multiple root values"));
                }
                self.root_done = true;
                self.push_frame(GenFrame::Object {
                    indent: 0,
                    pending_field: None,
                    hyphen_line: false,
                })
            }
            Some(GenFrame::Object { .. }) => {
                let (indent, prefix_blank, name) = self.take_object_slot()?;
                if prefix_blank {
                    return Err(Error::generate(
                        "A nested value cannot start a list item line; write a scalar field first",
                    ));
                }
                let name = name
                    .ok_or_else(|| Error::generate("Object value written without a field name"))?;
                self.push_indent(indent);
                self.push_key(&name);
                self.out.push_str(":\n");
                self.push_frame(GenFrame::Object {
                    indent: indent + 1,
                    pending_field: None,
                    hyphen_line: false,
                })
            }
            Some(GenFrame::StreamingArray { .. }) => {
                self.begin_streaming_element(true)?;
                let indent = match self.frames.last() {
                    Some(GenFrame::StreamingArray { indent, .. }) => *indent,
                    _ => 0,
                };
                self.push_indent(indent + 1);
                self.out.push_str("- ");
                self.push_frame(GenFrame::Object {
                    indent: indent + 2,
                    pending_field: None,
                    hyphen_line: true,
                })
            }
            Some(GenFrame::BufferingArray { .. }) | Some(GenFrame::BufferArray { .. }) => self
                .push_frame(GenFrame::BufferObject {
                    name: None,
                    map: ToonMap::new(),
                    pending_field: None,
                }),
            Some(GenFrame::BufferObject { pending_field, .. }) => {
                let name = pending_field
                    .take()
                    .ok_or_else(|| Error::generate("Object value written without a field name"))?;
                self.push_frame(GenFrame::BufferObject {
                    name: Some(name),
                    map: ToonMap::new(),
                    pending_field: None,
                })
            }
        }
    }

    pub fn write_end_object(&mut self) -> Result<()> {
        match self.frames.pop() {
            Some(GenFrame::Object {
                pending_field,
                hyphen_line,
                ..
            }) => {
                if pending_field.is_some() {
                    return Err(Error::generate("Field name written without a value"));
                }
                if hyphen_line {
                    // Nothing ever landed on the "- " line; the wire format
                    // has no spelling for an empty object list element.
                    return Err(Error::generate(
                        "An empty object cannot be encoded as a list element",
                    ));
                }
                Ok(())
            }
            Some(GenFrame::BufferObject {
                name,
                map,
                pending_field,
            }) => {
                if pending_field.is_some() {
                    return Err(Error::generate("Field name written without a value"));
                }
                self.attach_buffered(name, Value::Object(map))
            }
            Some(other) => {
                self.frames.push(other);
                Err(Error::generate("Not in an object"))
            }
            None => Err(Error::generate("Not in an object")),
        }
    }

    pub fn write_field_name(&mut self, name: &str) -> Result<()> {
        match self.frames.last_mut() {
            Some(GenFrame::Object { pending_field, .. })
            | Some(GenFrame::BufferObject { pending_field, .. }) => {
                if pending_field.is_some() {
                    return Err(Error::generate("Field name written without a value"));
                }
                *pending_field = Some(name.to_string());
                Ok(())
            }
            _ => Err(Error::generate("Field name written outside an object")),
        }
    }

    /// Starts an array. A `Some(n)` size hint selects streaming mode and
    /// the declared length written in the header; `None` buffers the
    /// elements until [`Generator::write_end_array`] picks a format.
    pub fn write_start_array(&mut self, size_hint: Option<usize>) -> Result<()> {
        match self.frames.last_mut() {
            None => {
                if self.root_done {
                    return Err(Error::generate("Multiple root values"));
                }
                self.root_done = true;
                self.push_array_frame(0, None, false, size_hint)
            }
            Some(GenFrame::Object { .. }) => {
                let (indent, prefix_blank, name) = self.take_object_slot()?;
                if prefix_blank {
                    return Err(Error::generate(
                        "A nested value cannot start a list item line; write a scalar field first",
                    ));
                }
                let name = name
                    .ok_or_else(|| Error::generate("Array value written without a field name"))?;
                self.push_array_frame(indent, Some(name), false, size_hint)
            }
            Some(GenFrame::StreamingArray { .. }) => {
                self.begin_streaming_element(true)?;
                let indent = match self.frames.last() {
                    Some(GenFrame::StreamingArray { indent, .. }) => *indent,
                    _ => 0,
                };
                self.push_indent(indent + 1);
                self.out.push_str("- ");
                self.push_array_frame(indent + 1, None, true, size_hint)
            }
            Some(GenFrame::BufferingArray { .. }) | Some(GenFrame::BufferArray { .. }) => self
                .push_frame(GenFrame::BufferArray {
                    name: None,
                    items: Vec::new(),
                }),
            Some(GenFrame::BufferObject { pending_field, .. }) => {
                let name = pending_field
                    .take()
                    .ok_or_else(|| Error::generate("Array value written without a field name"))?;
                self.push_frame(GenFrame::BufferArray {
                    name: Some(name),
                    items: Vec::new(),
                })
            }
        }
    }

    pub fn write_end_array(&mut self) -> Result<()> {
        match self.frames.pop() {
            Some(GenFrame::StreamingArray {
                indent,
                name,
                declared,
                count,
                format,
                hyphen_line,
            }) => {
                if self.options.strict && count != declared {
                    return Err(Error::generate(format!(
                        "Array length mismatch: declared {}, wrote {} elements",
                        declared, count
                    )));
                }
                match format {
                    None => {
                        // No element ever arrived: emit the bare header.
                        if !hyphen_line {
                            self.push_indent(indent);
                        }
                        if let Some(name) = name {
                            self.push_key(&name);
                        }
                        self.out.push('[');
                        self.out.push_str(&declared.to_string());
                        self.out.push_str("]:\n");
                    }
                    Some(StreamFormat::Inline) => self.out.push('\n'),
                    Some(StreamFormat::List) => {}
                }
                Ok(())
            }
            Some(GenFrame::BufferingArray {
                indent,
                name,
                items,
                hyphen_line,
            }) => self.write_array_value(indent, name.as_deref(), &items, hyphen_line),
            Some(GenFrame::BufferArray { name, items }) => {
                self.attach_buffered(name, Value::Array(items))
            }
            Some(other) => {
                self.frames.push(other);
                Err(Error::generate("Not in an array"))
            }
            None => Err(Error::generate("Not in an array")),
        }
    }

    // ------------------------------------------------------------------
    // Scalars
    // ------------------------------------------------------------------

    pub fn write_string(&mut self, value: &str) -> Result<()> {
        self.write_scalar(Value::String(value.to_string()))
    }

    pub fn write_integer(&mut self, value: i64) -> Result<()> {
        self.write_scalar(Value::Number(Number::Integer(value)))
    }

    pub fn write_float(&mut self, value: f64) -> Result<()> {
        self.write_scalar(Value::Number(Number::Float(value)))
    }

    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_scalar(Value::Bool(value))
    }

    pub fn write_null(&mut self) -> Result<()> {
        self.write_scalar(Value::Null)
    }

    fn write_scalar(&mut self, value: Value) -> Result<()> {
        match self.frames.last_mut() {
            None => {
                if self.root_done {
                    return Err(Error::generate("Multiple root values"));
                }
                self.root_done = true;
                self.push_scalar(&value)?;
                self.out.push('\n');
                Ok(())
            }
            Some(GenFrame::Object { .. }) => {
                let (indent, prefix_blank, name) = self.take_object_slot()?;
                let name =
                    name.ok_or_else(|| Error::generate("Value written without a field name"))?;
                if !prefix_blank {
                    self.push_indent(indent);
                }
                self.push_key(&name);
                self.out.push_str(": ");
                self.push_scalar(&value)?;
                self.out.push('\n');
                Ok(())
            }
            Some(GenFrame::StreamingArray { .. }) => {
                self.begin_streaming_element(false)?;
                let (indent, count, format) = match self.frames.last() {
                    Some(GenFrame::StreamingArray {
                        indent,
                        count,
                        format,
                        ..
                    }) => (*indent, *count, *format),
                    _ => (0, 0, None),
                };
                match format {
                    Some(StreamFormat::Inline) => {
                        if count > 1 {
                            self.out.push(self.options.delimiter.as_char());
                        }
                        self.push_scalar(&value)?;
                    }
                    Some(StreamFormat::List) => {
                        self.push_indent(indent + 1);
                        self.out.push_str("- ");
                        self.push_scalar(&value)?;
                        self.out.push('\n');
                    }
                    None => return Err(Error::generate("Array element without a format")),
                }
                Ok(())
            }
            Some(GenFrame::BufferingArray { items, .. })
            | Some(GenFrame::BufferArray { items, .. }) => {
                items.push(value);
                Ok(())
            }
            Some(GenFrame::BufferObject {
                map, pending_field, ..
            }) => {
                let name = pending_field
                    .take()
                    .ok_or_else(|| Error::generate("Value written without a field name"))?;
                map.insert(name, value);
                Ok(())
            }
        }
    }

    // ------------------------------------------------------------------
    // Frame plumbing
    // ------------------------------------------------------------------

    fn push_frame(&mut self, frame: GenFrame) -> Result<()> {
        if self.frames.len() >= self.options.max_nesting_depth {
            return Err(Error::generate("Nesting depth exceeded"));
        }
        self.frames.push(frame);
        Ok(())
    }

    fn push_array_frame(
        &mut self,
        indent: usize,
        name: Option<String>,
        hyphen_line: bool,
        size_hint: Option<usize>,
    ) -> Result<()> {
        match size_hint {
            Some(declared) => self.push_frame(GenFrame::StreamingArray {
                indent,
                name,
                declared,
                count: 0,
                format: None,
                hyphen_line,
            }),
            None => self.push_frame(GenFrame::BufferingArray {
                indent,
                name,
                items: Vec::new(),
                hyphen_line,
            }),
        }
    }

    /// Takes the pending field name and line-prefix state of the enclosing
    /// object frame: `(indent, prefix already on the line, field name)`.
    fn take_object_slot(&mut self) -> Result<(usize, bool, Option<String>)> {
        match self.frames.last_mut() {
            Some(GenFrame::Object {
                indent,
                pending_field,
                hyphen_line,
            }) => {
                let prefix_blank = *hyphen_line;
                *hyphen_line = false;
                Ok((*indent, prefix_blank, pending_field.take()))
            }
            _ => Err(Error::generate("Not in an object")),
        }
    }

    /// Fixes the enclosing streaming array's format on its first element,
    /// writing the deferred header, and counts the element.
    fn begin_streaming_element(&mut self, element_is_container: bool) -> Result<()> {
        let (indent, name, declared, format, hyphen_line) = match self.frames.last_mut() {
            Some(GenFrame::StreamingArray {
                indent,
                name,
                declared,
                count,
                format,
                hyphen_line,
            }) => {
                *count += 1;
                (
                    *indent,
                    name.clone(),
                    *declared,
                    *format,
                    std::mem::replace(hyphen_line, false),
                )
            }
            _ => return Err(Error::generate("Not in an array")),
        };

        match format {
            Some(StreamFormat::Inline) if element_is_container => Err(Error::generate(
                "Nested structures cannot be added to an inline array",
            )),
            Some(_) => Ok(()),
            None => {
                let chosen = if element_is_container {
                    StreamFormat::List
                } else {
                    StreamFormat::Inline
                };
                if !hyphen_line {
                    self.push_indent(indent);
                }
                if let Some(name) = name {
                    self.push_key(&name);
                }
                self.out.push('[');
                self.out.push_str(&declared.to_string());
                if chosen == StreamFormat::Inline {
                    self.out.push_str(self.options.delimiter.header_marker());
                }
                self.out.push(']');
                match chosen {
                    StreamFormat::Inline => self.out.push_str(": "),
                    StreamFormat::List => self.out.push_str(":\n"),
                }
                if let Some(GenFrame::StreamingArray { format, .. }) = self.frames.last_mut() {
                    *format = Some(chosen);
                }
                Ok(())
            }
        }
    }

    fn attach_buffered(&mut self, name: Option<String>, value: Value) -> Result<()> {
        match self.frames.last_mut() {
            Some(GenFrame::BufferingArray { items, .. })
            | Some(GenFrame::BufferArray { items, .. }) => {
                items.push(value);
                Ok(())
            }
            Some(GenFrame::BufferObject { map, .. }) => {
                let name =
                    name.ok_or_else(|| Error::generate("Value written without a field name"))?;
                map.insert(name, value);
                Ok(())
            }
            _ => Err(Error::generate("Buffered value outside a buffering array")),
        }
    }

    // ------------------------------------------------------------------
    // Buffered array writing
    // ------------------------------------------------------------------

    /// Writes a fully buffered array, choosing tabular, inline or list
    /// form from its contents.
    fn write_array_value(
        &mut self,
        indent: usize,
        name: Option<&str>,
        items: &[Value],
        prefix_written: bool,
    ) -> Result<()> {
        if !prefix_written {
            self.push_indent(indent);
        }
        if let Some(name) = name {
            self.push_key(name);
        }

        if let Some(fields) = tabular_fields(items) {
            return self.write_tabular_body(indent, items, &fields);
        }

        let all_primitive = items.iter().all(Value::is_scalar);
        if all_primitive && items.len() <= INLINE_BUFFER_LIMIT {
            return self.write_inline_body(items);
        }

        self.write_list_body(indent, items)
    }

    fn write_inline_body(&mut self, items: &[Value]) -> Result<()> {
        self.out.push('[');
        self.out.push_str(&items.len().to_string());
        if !items.is_empty() {
            self.out.push_str(self.options.delimiter.header_marker());
        }
        self.out.push_str("]:");
        if items.is_empty() {
            self.out.push('\n');
            return Ok(());
        }
        self.out.push(' ');
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.out.push(self.options.delimiter.as_char());
            }
            self.push_scalar(item)?;
        }
        self.out.push('\n');
        Ok(())
    }

    fn write_tabular_body(
        &mut self,
        indent: usize,
        items: &[Value],
        fields: &[String],
    ) -> Result<()> {
        let delimiter = self.options.delimiter;
        self.out.push('[');
        self.out.push_str(&items.len().to_string());
        self.out.push_str(delimiter.header_marker());
        self.out.push_str("]{");
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                self.out.push(delimiter.as_char());
            }
            self.push_key(field);
        }
        self.out.push_str("}:\n");

        for item in items {
            let map = match item {
                Value::Object(map) => map,
                _ => return Err(Error::generate("Tabular row is not an object")),
            };
            self.push_indent(indent + 1);
            for (i, field) in fields.iter().enumerate() {
                if i > 0 {
                    self.out.push(delimiter.as_char());
                }
                let cell = map.get(field).unwrap_or(&Value::Null);
                self.push_scalar(cell)?;
            }
            self.out.push('\n');
        }
        Ok(())
    }

    fn write_list_body(&mut self, indent: usize, items: &[Value]) -> Result<()> {
        self.out.push('[');
        self.out.push_str(&items.len().to_string());
        self.out.push_str("]:\n");
        for item in items {
            self.write_list_item(indent + 1, item)?;
        }
        Ok(())
    }

    fn write_list_item(&mut self, level: usize, item: &Value) -> Result<()> {
        self.push_indent(level);
        self.out.push_str("- ");
        match item {
            Value::Object(map) => {
                if map.is_empty() {
                    return Err(Error::generate(
                        "An empty object cannot be encoded as a list element",
                    ));
                }
                self.write_object_fields(level + 1, map, true)
            }
            Value::Array(items) => self.write_array_value(level, None, items, true),
            scalar => {
                self.push_scalar(scalar)?;
                self.out.push('\n');
                Ok(())
            }
        }
    }

    fn write_object_fields(&mut self, level: usize, map: &ToonMap, on_hyphen: bool) -> Result<()> {
        let single = map.len() == 1;
        for (i, (key, value)) in map.iter().enumerate() {
            let first_on_hyphen = i == 0 && on_hyphen;
            if !first_on_hyphen {
                self.push_indent(level);
            }
            match value {
                Value::Object(nested) => {
                    self.push_key(key);
                    self.out.push_str(":\n");
                    if nested.is_empty() {
                        continue;
                    }
                    if first_on_hyphen {
                        // The item line already consumed one level; a block
                        // value can only follow it when no sibling field
                        // would have to dedent back to the skipped level.
                        if !single {
                            return Err(Error::generate(
                                "A nested value cannot share the list item line when more fields follow",
                            ));
                        }
                        self.write_object_fields(level, nested, false)?;
                    } else {
                        self.write_object_fields(level + 1, nested, false)?;
                    }
                }
                Value::Array(items) => {
                    if first_on_hyphen {
                        if items.iter().all(Value::is_scalar) {
                            // Inline keeps the item line self-contained, so
                            // the length threshold does not apply here.
                            self.push_key(key);
                            self.write_inline_body(items)?;
                        } else if single {
                            self.write_array_value(level - 1, Some(key), items, true)?;
                        } else {
                            return Err(Error::generate(
                                "A nested value cannot share the list item line when more fields follow",
                            ));
                        }
                    } else {
                        self.write_array_value(level, Some(key), items, true)?;
                    }
                }
                scalar => {
                    self.push_key(key);
                    self.out.push_str(": ");
                    self.push_scalar(scalar)?;
                    self.out.push('\n');
                }
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Text helpers
    // ------------------------------------------------------------------

    fn push_indent(&mut self, level: usize) {
        for _ in 0..level * self.options.indent_size {
            self.out.push(' ');
        }
    }

    fn push_scalar(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Null => self.out.push_str("null"),
            Value::Bool(true) => self.out.push_str("true"),
            Value::Bool(false) => self.out.push_str("false"),
            Value::Number(Number::Integer(i)) => self.out.push_str(&i.to_string()),
            Value::Number(Number::Float(f)) => {
                let text = format_float(*f);
                self.out.push_str(&text);
            }
            Value::String(s) => self.push_string_value(s),
            Value::Array(_) | Value::Object(_) => {
                return Err(Error::generate("Expected a scalar value"));
            }
        }
        Ok(())
    }

    fn push_string_value(&mut self, s: &str) {
        if needs_quoting(s) {
            self.push_quoted(s);
        } else {
            self.out.push_str(s);
        }
    }

    fn push_key(&mut self, key: &str) {
        if is_plain_key(key) {
            self.out.push_str(key);
        } else {
            self.push_quoted(key);
        }
    }

    fn push_quoted(&mut self, s: &str) {
        self.out.push('"');
        for c in s.chars() {
            match c {
                '\\' => self.out.push_str("\\\\"),
                '"' => self.out.push_str("\\\""),
                '\n' => self.out.push_str("\\n"),
                '\r' => self.out.push_str("\\r"),
                '\t' => self.out.push_str("\\t"),
                _ => self.out.push(c),
            }
        }
        self.out.push('"');
    }
}

/// Formats a fractional number: shortest round-trip decimal, never
/// exponent notation. Whole-number values keep one fractional digit
/// (`42.0`) so the float type stays visible, except at exponent
/// magnitudes, where the marker drops (`1e6` becomes `1000000`). Negative
/// zero canonicalizes to `0`; non-finite values have no number spelling
/// and come out as `null`.
fn format_float(f: f64) -> String {
    if !f.is_finite() {
        return "null".to_string();
    }
    if f == 0.0 && f.is_sign_negative() {
        return "0".to_string();
    }
    let mut text = f.to_string();
    if !text.contains('.') && f.abs() < FLOAT_MARKER_LIMIT {
        text.push_str(".0");
    }
    text
}

/// Decides whether a string value must be quoted to survive a re-parse.
fn needs_quoting(s: &str) -> bool {
    let mut chars = s.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return true,
    };
    let last = s.chars().last().unwrap_or(first);

    if first.is_whitespace() || last.is_whitespace() {
        return true;
    }
    if s == "true" || s == "false" || s == "null" {
        return true;
    }
    if s == "-" || s.starts_with("- ") || first == '#' {
        return true;
    }
    // Anything that re-lexes as a number (or the head of one) is ambiguous
    // unquoted; this covers zero-padded forms like "007" as well.
    if first.is_ascii_digit() {
        return true;
    }
    if first == '-' && matches!(chars.next(), Some(c) if c.is_ascii_digit()) {
        return true;
    }
    s.chars().any(|c| {
        matches!(
            c,
            ':' | '"' | '\\' | '[' | ']' | '{' | '}' | ',' | '|' | '\t' | '\n' | '\r'
        ) || c < '\u{20}'
    })
}

/// Keys stay unquoted when they match the identifier shape and are not a
/// reserved literal.
fn is_plain_key(s: &str) -> bool {
    let mut chars = s.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return false,
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.') {
        return false;
    }
    !matches!(s, "true" | "false" | "null")
}

/// Returns the shared field list when every element is an object over the
/// same key set with only primitive values; any mismatch reduces the array
/// to list form.
fn tabular_fields(items: &[Value]) -> Option<Vec<String>> {
    let first = match items.first() {
        Some(Value::Object(map)) if !map.is_empty() => map,
        _ => return None,
    };
    if !first.values().all(Value::is_scalar) {
        return None;
    }
    let fields: Vec<String> = first.keys().cloned().collect();

    for item in &items[1..] {
        let map = match item {
            Value::Object(map) => map,
            _ => return None,
        };
        if map.len() != fields.len() {
            return None;
        }
        for field in &fields {
            match map.get(field) {
                Some(value) if value.is_scalar() => {}
                _ => return None,
            }
        }
    }
    Some(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_formatting_is_plain_decimal() {
        assert_eq!(format_float(1e6), "1000000");
        assert_eq!(format_float(1.5e-3), "0.0015");
        assert_eq!(format_float(42.0), "42.0");
        assert_eq!(format_float(1.5000), "1.5");
        assert_eq!(format_float(-0.0), "0");
        assert_eq!(format_float(f64::NAN), "null");
        assert_eq!(format_float(f64::INFINITY), "null");
    }

    #[test]
    fn fractional_marker_drops_at_exponent_magnitudes() {
        assert_eq!(format_float(999999.0), "999999.0");
        assert_eq!(format_float(1.5e6), "1500000");
        assert_eq!(format_float(-1e6), "-1000000");
        assert_eq!(format_float(1e7), "10000000");
        // A fractional part always survives, whatever the magnitude.
        assert_eq!(format_float(1000000.5), "1000000.5");
    }

    #[test]
    fn quoting_triggers() {
        assert!(needs_quoting(""));
        assert!(needs_quoting(" padded "));
        assert!(needs_quoting("true"));
        assert!(needs_quoting("null"));
        assert!(needs_quoting("42"));
        assert!(needs_quoting("007"));
        assert!(needs_quoting("-1.5"));
        assert!(needs_quoting("a,b"));
        assert!(needs_quoting("a|b"));
        assert!(needs_quoting("a\tb"));
        assert!(needs_quoting("a:b"));
        assert!(needs_quoting("-"));
        assert!(needs_quoting("- item"));
        assert!(needs_quoting("#comment"));
        assert!(needs_quoting("line\nbreak"));

        assert!(!needs_quoting("hello"));
        assert!(!needs_quoting("hello world"));
        assert!(!needs_quoting("-abc"));
        assert!(!needs_quoting("truely"));
        assert!(!needs_quoting("a.b.c"));
    }

    #[test]
    fn plain_keys() {
        assert!(is_plain_key("name"));
        assert!(is_plain_key("user_id"));
        assert!(is_plain_key("data.field"));
        assert!(is_plain_key("_private"));
        assert!(!is_plain_key("2nd"));
        assert!(!is_plain_key("user-id"));
        assert!(!is_plain_key("true"));
        assert!(!is_plain_key(""));
    }

    #[test]
    fn tabular_detection() {
        let rows = vec![
            Value::from_iter([("id", Value::from(1)), ("name", Value::from("a"))]),
            Value::from_iter([("name", Value::from("b")), ("id", Value::from(2))]),
        ];
        assert_eq!(
            tabular_fields(&rows),
            Some(vec!["id".to_string(), "name".to_string()])
        );

        let uneven = vec![
            Value::from_iter([("id", Value::from(1))]),
            Value::from_iter([("id", Value::from(2)), ("name", Value::from("b"))]),
        ];
        assert_eq!(tabular_fields(&uneven), None);

        let nested = vec![Value::from_iter([(
            "id",
            Value::Array(vec![Value::from(1)]),
        )])];
        assert_eq!(tabular_fields(&nested), None);

        assert_eq!(tabular_fields(&[]), None);
    }
}
