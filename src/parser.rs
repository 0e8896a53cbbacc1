//! Streaming event parser for the TOON format.
//!
//! The parser pulls tokens from the [`Lexer`] with two tokens of lookahead
//! and produces [`Event`]s one at a time. State lives in a stack of context
//! frames (see [`crate::context`]): each open object, array or tabular row
//! is one frame, so memory use is bounded by nesting depth.
//!
//! ## Root forms
//!
//! The first non-layout token decides the shape of the document:
//!
//! - nothing at all → an empty object
//! - `[` → a root array header
//! - a single value followed only by layout → that primitive
//! - anything else → a root object
//!
//! ## Usage
//!
//! ```rust
//! use toon_stream::{Event, Parser};
//!
//! let mut parser = Parser::new("user:\n  id: 123");
//! assert_eq!(parser.next_event().unwrap(), Event::StartObject);
//! assert_eq!(
//!     parser.next_event().unwrap(),
//!     Event::FieldName("user".to_string())
//! );
//! ```

use std::collections::VecDeque;

use crate::context::{ContextStack, Frame, FrameKind};
use crate::error::{Error, Result};
use crate::event::Event;
use crate::lexer::Lexer;
use crate::options::{Delimiter, ToonOptions};
use crate::token::Token;

/// What the parser expects next inside the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// A field name (objects, tabular rows)
    NeedField,
    /// The value of the field just named
    NeedValue,
    /// Array elements or the root form
    NeedContent,
}

fn state_for(kind: FrameKind) -> State {
    if kind.is_object() {
        State::NeedField
    } else {
        State::NeedContent
    }
}

/// The TOON event parser.
///
/// Created via [`Parser::new`] or [`Parser::with_options`]. Call
/// [`Parser::next_event`] until it returns [`Event::Eof`]. Errors are
/// fatal: once `next_event` has returned an error the stream is over.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    peek: Token,
    current_pos: (usize, usize),
    peek_pos: (usize, usize),
    // Indent level observed when each lookahead token was produced. The
    // lexer runs ahead of the parser, so its live level can already belong
    // to a later line.
    current_indent: usize,
    peek_indent: usize,

    stack: ContextStack,
    state: State,
    pending: VecDeque<Event>,
    finished: bool,

    strict: bool,
    indent_size: usize,
}

impl<'a> Parser<'a> {
    /// Creates a parser with default options.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::with_options(input, &ToonOptions::default())
    }

    /// Creates a parser with the given options.
    #[must_use]
    pub fn with_options(input: &'a str, options: &ToonOptions) -> Self {
        let mut lexer = Lexer::with_options(input, options);
        let current = lexer.next_token();
        let current_pos = (lexer.token_line(), lexer.token_column());
        let current_indent = lexer.indent_level();
        let peek = lexer.next_token();
        let peek_pos = (lexer.token_line(), lexer.token_column());
        let peek_indent = lexer.indent_level();
        Parser {
            lexer,
            current,
            peek,
            current_pos,
            peek_pos,
            current_indent,
            peek_indent,
            stack: ContextStack::new(options.max_nesting_depth),
            state: State::NeedContent,
            pending: VecDeque::new(),
            finished: false,
            strict: options.strict,
            indent_size: options.indent_size,
        }
    }

    /// Returns the next event.
    ///
    /// # Errors
    ///
    /// Any lexical, indentation, structural or resource error aborts the
    /// stream; there is no recovery.
    pub fn next_event(&mut self) -> Result<Event> {
        if let Some(event) = self.pending.pop_front() {
            return Ok(event);
        }

        match self.stack.top().kind {
            FrameKind::Root => self.parse_root(),
            FrameKind::Object | FrameKind::ListItemObject => self.object_content(),
            FrameKind::ArrayInline => self.inline_array_content(),
            FrameKind::ArrayTabular => self.tabular_array_content(),
            FrameKind::ArrayList => self.list_array_content(),
            FrameKind::TabularRow => self.tabular_row_content(),
        }
    }

    /// Collects every event of the document, ending with [`Event::Eof`].
    pub fn into_events(mut self) -> Result<Vec<Event>> {
        let mut events = Vec::new();
        loop {
            let event = self.next_event()?;
            let done = event == Event::Eof;
            events.push(event);
            if done {
                return Ok(events);
            }
        }
    }

    // ------------------------------------------------------------------
    // Token plumbing
    // ------------------------------------------------------------------

    fn advance(&mut self) {
        self.current = std::mem::replace(&mut self.peek, self.lexer.next_token());
        self.current_pos = self.peek_pos;
        self.current_indent = self.peek_indent;
        self.peek_pos = (self.lexer.token_line(), self.lexer.token_column());
        self.peek_indent = self.lexer.indent_level();
    }

    fn check_error(&self) -> Result<()> {
        if let Token::Error(err) = &self.current {
            Err(err.clone())
        } else {
            Ok(())
        }
    }

    fn skip_layout(&mut self) -> Result<()> {
        while self.current.is_layout() {
            self.advance();
        }
        self.check_error()
    }

    fn structural(&self, msg: impl Into<String>) -> Error {
        Error::structural(self.current_pos.0, self.current_pos.1, msg)
    }

    fn expect_colon(&mut self) -> Result<()> {
        if matches!(self.current, Token::Colon) {
            self.advance();
            Ok(())
        } else {
            self.check_error()?;
            Err(self.structural(format!(
                "Expected ':' but found {}",
                self.current.describe()
            )))
        }
    }

    fn push(&mut self, frame: Frame) -> Result<()> {
        self.state = state_for(frame.kind);
        self.stack.push(frame, self.current_pos.0, self.current_pos.1)
    }

    fn pop_frame(&mut self) {
        self.stack.pop();
        if self.stack.at_root() {
            self.finished = true;
            self.state = State::NeedContent;
        } else {
            self.state = state_for(self.stack.top().kind);
        }
    }

    fn delimiter_matches(token: &Token, delimiter: Delimiter) -> bool {
        matches!(
            (token, delimiter),
            (Token::Comma, Delimiter::Comma)
                | (Token::Pipe, Delimiter::Pipe)
                | (Token::Htab, Delimiter::Tab)
        )
    }

    // ------------------------------------------------------------------
    // Root
    // ------------------------------------------------------------------

    fn parse_root(&mut self) -> Result<Event> {
        if self.finished {
            self.skip_layout()?;
            return if matches!(self.current, Token::Eof) {
                Ok(Event::Eof)
            } else {
                Err(self.structural(format!(
                    "Expected end of input after document root, found {}",
                    self.current.describe()
                )))
            };
        }

        self.skip_layout()?;

        match &self.current {
            Token::Eof => {
                // An empty document denotes an empty object.
                self.push(Frame::object(0, Delimiter::Comma))?;
                Ok(Event::StartObject)
            }
            Token::LBracket => self.parse_array_header(),
            token if token.is_value() => {
                if matches!(self.peek, Token::Eof | Token::Newline | Token::Dedent) {
                    let event = self.primitive()?;
                    self.finished = true;
                    Ok(event)
                } else {
                    self.push(Frame::object(0, Delimiter::Comma))?;
                    Ok(Event::StartObject)
                }
            }
            other => Err(self.structural(format!(
                "Unexpected {} at document root",
                other.describe()
            ))),
        }
    }

    // ------------------------------------------------------------------
    // Objects
    // ------------------------------------------------------------------

    fn object_content(&mut self) -> Result<Event> {
        if self.state == State::NeedValue {
            return self.field_value();
        }

        // The first field of a list item sits on the hyphen line itself, so
        // the usual start-of-line checks do not apply to it.
        let hyphen_line_field = {
            let top = self.stack.top_mut();
            let first = top.first_field;
            top.first_field = false;
            first
        };

        if !hyphen_line_field {
            self.skip_layout()?;
            let base = self.stack.top().base_indent;
            if matches!(self.current, Token::Eof) || self.current_indent < base {
                self.pop_frame();
                return Ok(Event::EndObject);
            }
        }

        self.check_error()?;
        if !self.current.is_value() {
            return Err(self.structural(format!(
                "Expected field name but found {}",
                self.current.describe()
            )));
        }
        if self.strict && !matches!(self.current, Token::Identifier(_) | Token::QuotedString(_)) {
            return Err(self.structural(
                "Field names that look like numbers or keywords must be quoted",
            ));
        }

        let name = self.current.text().unwrap_or_default();
        self.advance();

        // For `name[N]...:` the colon belongs to the array header.
        if matches!(self.current, Token::LBracket) {
            self.state = State::NeedValue;
            return Ok(Event::FieldName(name));
        }

        self.expect_colon()?;
        self.state = State::NeedValue;
        Ok(Event::FieldName(name))
    }

    fn field_value(&mut self) -> Result<Event> {
        match &self.current {
            Token::Newline => {
                if matches!(self.peek, Token::Indent) {
                    self.advance(); // newline
                    self.advance(); // indent
                    self.check_error()?;
                    if matches!(self.current, Token::LBracket) {
                        self.parse_array_header()
                    } else {
                        let indent = self.current_indent;
                        let delimiter = self.stack.active_delimiter();
                        self.push(Frame::object(indent, delimiter))?;
                        Ok(Event::StartObject)
                    }
                } else {
                    // Nothing indented follows: the value is an empty object.
                    // The newline stays for the enclosing scope to consume.
                    self.pending.push_back(Event::EndObject);
                    self.state = State::NeedField;
                    Ok(Event::StartObject)
                }
            }
            Token::Eof => {
                self.pending.push_back(Event::EndObject);
                self.state = State::NeedField;
                Ok(Event::StartObject)
            }
            Token::LBracket => self.parse_array_header(),
            Token::Error(err) => Err(err.clone()),
            token if token.is_value() => {
                let event = self.primitive()?;
                self.state = State::NeedField;
                Ok(event)
            }
            other => Err(self.structural(format!(
                "Expected value but found {}",
                other.describe()
            ))),
        }
    }

    // ------------------------------------------------------------------
    // Array headers
    // ------------------------------------------------------------------

    /// Parses `[N<delim?>]{fields?}:` and opens the matching frame.
    /// Called with the current token on `[`.
    fn parse_array_header(&mut self) -> Result<Event> {
        self.advance(); // consume '['

        let declared = match &self.current {
            Token::Integer(n) if *n >= 0 => *n as usize,
            Token::Integer(_) => {
                return Err(self.structural("Array length cannot be negative"));
            }
            Token::Error(err) => return Err(err.clone()),
            other => {
                return Err(self.structural(format!(
                    "Expected array length but found {}",
                    other.describe()
                )));
            }
        };
        self.advance();

        let mut delimiter = Delimiter::Comma;
        let mut marker_given = false;
        match self.current {
            Token::Htab => {
                delimiter = Delimiter::Tab;
                marker_given = true;
                self.advance();
            }
            Token::Pipe => {
                delimiter = Delimiter::Pipe;
                marker_given = true;
                self.advance();
            }
            _ => {}
        }

        if !matches!(self.current, Token::RBracket) {
            self.check_error()?;
            return Err(self.structural(format!(
                "Expected ']' in array header but found {}",
                self.current.describe()
            )));
        }
        self.advance();

        let fields = if matches!(self.current, Token::LBrace) {
            Some(self.parse_field_list(&mut delimiter, marker_given)?)
        } else {
            None
        };

        self.expect_colon()?;

        if let Some(fields) = fields {
            if matches!(self.current, Token::Newline) {
                self.advance();
            }
            self.push(Frame::tabular_array(declared, fields, delimiter))?;
            return Ok(Event::StartArray);
        }

        match &self.current {
            Token::Newline => {
                if matches!(self.peek, Token::Indent) {
                    self.advance(); // newline
                    let list = matches!(self.peek, Token::Hyphen);
                    self.advance(); // indent
                    self.check_error()?;
                    if list {
                        let hyphen_indent = self.current_indent;
                        self.push(Frame::list_array(declared, hyphen_indent, delimiter))?;
                    } else {
                        self.push(Frame::inline_array(declared, delimiter))?;
                    }
                    Ok(Event::StartArray)
                } else {
                    self.empty_array(declared)
                }
            }
            Token::Eof | Token::Dedent => self.empty_array(declared),
            Token::Error(err) => Err(err.clone()),
            _ => {
                // The body shares the header line.
                self.push(Frame::inline_array(declared, delimiter))?;
                Ok(Event::StartArray)
            }
        }
    }

    fn empty_array(&mut self, declared: usize) -> Result<Event> {
        if self.strict && declared != 0 {
            return Err(self.structural(format!(
                "Array length mismatch: declared {}, found 0 elements",
                declared
            )));
        }
        self.pending.push_back(Event::EndArray);
        if self.stack.at_root() {
            self.finished = true;
        }
        self.state = state_for(self.stack.top().kind);
        Ok(Event::StartArray)
    }

    fn parse_field_list(
        &mut self,
        delimiter: &mut Delimiter,
        marker_given: bool,
    ) -> Result<Vec<String>> {
        self.advance(); // consume '{'

        let mut fields = vec![self.field_list_name()?];
        let mut first_separator = true;

        loop {
            match &self.current {
                Token::RBrace => {
                    self.advance();
                    return Ok(fields);
                }
                token if token.is_delimiter() => {
                    let seen = match token {
                        Token::Pipe => Delimiter::Pipe,
                        Token::Htab => Delimiter::Tab,
                        _ => Delimiter::Comma,
                    };
                    if seen != *delimiter {
                        // A field list may announce a non-comma delimiter by
                        // itself when the header carried no marker.
                        if first_separator && !marker_given && seen != Delimiter::Comma {
                            *delimiter = seen;
                        } else {
                            return Err(self.structural(format!(
                                "Expected '{}' in field list",
                                delimiter.as_char()
                            )));
                        }
                    }
                    first_separator = false;
                    self.advance();
                    fields.push(self.field_list_name()?);
                }
                Token::Error(err) => return Err(err.clone()),
                other => {
                    return Err(self.structural(format!(
                        "Expected '{}' or '}}' in field list but found {}",
                        delimiter.as_char(),
                        other.describe()
                    )));
                }
            }
        }
    }

    fn field_list_name(&mut self) -> Result<String> {
        self.check_error()?;
        if !self.current.is_value() {
            return Err(self.structural(format!(
                "Expected field name but found {}",
                self.current.describe()
            )));
        }
        if self.strict && !matches!(self.current, Token::Identifier(_) | Token::QuotedString(_)) {
            return Err(self.structural(
                "Field names that look like numbers or keywords must be quoted",
            ));
        }
        let name = self.current.text().unwrap_or_default();
        self.advance();
        Ok(name)
    }

    // ------------------------------------------------------------------
    // Inline arrays
    // ------------------------------------------------------------------

    fn inline_array_content(&mut self) -> Result<Event> {
        self.check_error()?;
        let (declared, delimiter) = {
            let top = self.stack.top();
            (top.declared_len, top.delimiter)
        };
        let index = self.stack.top().index;

        if matches!(
            self.current,
            Token::Newline | Token::Dedent | Token::SameIndent | Token::Eof
        ) {
            if self.strict && index != declared {
                return Err(self.structural(format!(
                    "Array length mismatch: declared {}, found {} elements",
                    declared, index
                )));
            }
            self.pop_frame();
            return Ok(Event::EndArray);
        }

        if index > 0 {
            if Self::delimiter_matches(&self.current, delimiter) {
                if self.strict && index >= declared {
                    return Err(self.structural(format!(
                        "Array length mismatch: declared {}, found more elements",
                        declared
                    )));
                }
                self.advance();
            } else {
                self.check_error()?;
                return Err(self.structural(format!(
                    "Expected '{}' between array elements but found {}",
                    delimiter.as_char(),
                    self.current.describe()
                )));
            }
        } else if self.strict && declared == 0 {
            return Err(self.structural(
                "Array length mismatch: declared 0, found elements".to_string(),
            ));
        }

        let event = self.primitive()?;
        self.stack.top_mut().index += 1;
        Ok(event)
    }

    // ------------------------------------------------------------------
    // Tabular arrays
    // ------------------------------------------------------------------

    fn tabular_array_content(&mut self) -> Result<Event> {
        self.check_error()?;
        let (declared, index) = {
            let top = self.stack.top();
            (top.declared_len, top.index)
        };

        // The first row must open a deeper level; a SameIndent right after
        // the header is a sibling of the array, not a row.
        let row_indent = self.stack.top().row_indent;
        let row_follows = match row_indent {
            None => matches!(self.current, Token::Indent),
            Some(_) => matches!(self.current, Token::Indent | Token::SameIndent),
        };

        if row_follows {
            if index >= declared && self.strict {
                return Err(self.structural(format!(
                    "Array length mismatch: declared {}, found more rows",
                    declared
                )));
            }
            self.advance(); // consume the indent / line start
            self.check_error()?;

            let indent = self.current_indent;
            match row_indent {
                None => self.stack.top_mut().row_indent = Some(indent),
                Some(expected) if self.strict && indent != expected => {
                    return Err(Error::indentation(
                        self.current_pos.0,
                        self.current_pos.1,
                        format!("Tabular row at {} spaces, expected {}", indent, expected),
                    ));
                }
                Some(_) => {}
            }

            let (fields, delimiter) = {
                let top = self.stack.top();
                (top.field_names.clone(), top.delimiter)
            };
            self.push(Frame::tabular_row(fields, delimiter))?;
            return Ok(Event::StartObject);
        }

        if self.strict && index != declared {
            return Err(self.structural(format!(
                "Array length mismatch: declared {}, found {} rows",
                declared, index
            )));
        }
        self.pop_frame();
        Ok(Event::EndArray)
    }

    fn tabular_row_content(&mut self) -> Result<Event> {
        self.check_error()?;
        let (total, field_index, delimiter) = {
            let top = self.stack.top();
            (top.field_names.len(), top.field_index, top.delimiter)
        };

        if self.state == State::NeedValue {
            if self.current.is_value() {
                let event = self.primitive()?;
                self.state = State::NeedField;
                return Ok(event);
            }
            // An empty cell (`1,,Bob`) is an empty string; the surrounding
            // delimiter handling consumes the separators.
            if Self::delimiter_matches(&self.current, delimiter)
                || matches!(self.current, Token::Newline | Token::Dedent | Token::Eof)
            {
                self.state = State::NeedField;
                return Ok(Event::String(String::new()));
            }
            return Err(self.structural(format!(
                "Expected value but found {}",
                self.current.describe()
            )));
        }

        if field_index >= total {
            // Row complete.
            if !matches!(self.current, Token::Newline | Token::Dedent | Token::Eof) {
                if self.strict {
                    return Err(self.structural(format!(
                        "Row width mismatch: expected {} values, found more",
                        total
                    )));
                }
                // Lenient: drop whatever else the line holds.
                while !matches!(
                    self.current,
                    Token::Newline | Token::Dedent | Token::Eof | Token::Error(_)
                ) {
                    self.advance();
                }
                self.check_error()?;
            }
            if matches!(self.current, Token::Newline) {
                self.advance();
            }
            self.pop_frame();
            self.stack.top_mut().index += 1;
            return Ok(Event::EndObject);
        }

        if field_index > 0 {
            if Self::delimiter_matches(&self.current, delimiter) {
                self.advance();
            } else if matches!(self.current, Token::Newline | Token::Dedent | Token::Eof) {
                if self.strict {
                    return Err(self.structural(format!(
                        "Row width mismatch: expected {} values, found {}",
                        total, field_index
                    )));
                }
                // Lenient: close the short row.
                if matches!(self.current, Token::Newline) {
                    self.advance();
                }
                self.pop_frame();
                self.stack.top_mut().index += 1;
                return Ok(Event::EndObject);
            } else {
                self.check_error()?;
                return Err(self.structural(format!(
                    "Expected '{}' between row values but found {}",
                    delimiter.as_char(),
                    self.current.describe()
                )));
            }
        }

        let name = self.stack.top().field_names[field_index].clone();
        self.stack.top_mut().field_index += 1;
        self.state = State::NeedValue;
        Ok(Event::FieldName(name))
    }

    // ------------------------------------------------------------------
    // List arrays
    // ------------------------------------------------------------------

    fn list_array_content(&mut self) -> Result<Event> {
        self.skip_layout()?;
        let (declared, hyphen_indent, delimiter) = {
            let top = self.stack.top();
            (top.declared_len, top.base_indent, top.delimiter)
        };
        let index = self.stack.top().index;

        if matches!(self.current, Token::Eof) || self.current_indent < hyphen_indent {
            if self.strict && index != declared {
                return Err(self.structural(format!(
                    "Array length mismatch: declared {}, found {} elements",
                    declared, index
                )));
            }
            self.pop_frame();
            return Ok(Event::EndArray);
        }

        if !matches!(self.current, Token::Hyphen) {
            return Err(self.structural(format!(
                "Expected '- ' list item but found {}",
                self.current.describe()
            )));
        }
        if self.strict && index >= declared {
            return Err(self.structural(format!(
                "Array length mismatch: declared {}, found more elements",
                declared
            )));
        }
        self.advance(); // consume the hyphen
        self.check_error()?;

        match &self.current {
            Token::LBracket => {
                self.stack.top_mut().index += 1;
                self.parse_array_header()
            }
            token if token.is_value() && matches!(self.peek, Token::Colon | Token::LBracket) => {
                // An object item: its first field shares the hyphen line,
                // the rest sit one level deeper than the hyphen.
                let base = hyphen_indent + self.indent_size;
                self.stack.top_mut().index += 1;
                self.push(Frame::list_item_object(base, delimiter))?;
                Ok(Event::StartObject)
            }
            token if token.is_value() => {
                self.stack.top_mut().index += 1;
                self.primitive()
            }
            Token::Error(err) => Err(err.clone()),
            other => Err(self.structural(format!(
                "Expected list element after '-' but found {}",
                other.describe()
            ))),
        }
    }

    // ------------------------------------------------------------------
    // Primitives
    // ------------------------------------------------------------------

    fn primitive(&mut self) -> Result<Event> {
        let event = match &self.current {
            Token::Identifier(s) | Token::QuotedString(s) => Event::String(s.clone()),
            Token::Integer(i) => Event::Integer(*i),
            Token::Float(f) => Event::Float(*f),
            Token::Bool(b) => Event::Bool(*b),
            Token::Null => Event::Null,
            Token::Error(err) => return Err(err.clone()),
            other => {
                return Err(self.structural(format!(
                    "Expected value but found {}",
                    other.describe()
                )));
            }
        };
        self.advance();
        Ok(event)
    }
}
