//! Streaming lexer for the TOON format.
//!
//! The lexer performs character-level tokenization of TOON input:
//!
//! - Indentation tracking with `Indent`/`Dedent`/`SameIndent` emission
//! - String scanning with escape sequence handling
//! - Number scanning with leading-zero reclassification
//! - Identifier and keyword recognition
//! - Position tracking for error reporting
//!
//! A single physical newline can produce several logical tokens (a
//! `Newline` followed by one `Indent`, or by any number of `Dedent`s), so
//! already-decided tokens are held in a FIFO queue that [`Lexer::next_token`]
//! drains before scanning further input. This keeps the interface a plain
//! pull interface.
//!
//! The lexer never fails: scan problems surface as [`Token::Error`] tokens
//! carrying the error and its position.

use std::collections::VecDeque;
use std::str::Chars;

use crate::error::Error;
use crate::options::ToonOptions;
use crate::token::Token;

/// The TOON lexer.
///
/// Reads characters one at a time with a single character of lookahead and
/// produces [`Token`]s. Created via [`Lexer::new`] or
/// [`Lexer::with_options`].
pub struct Lexer<'a> {
    chars: Chars<'a>,
    current: Option<char>,
    peek: Option<char>,

    line: usize,   // 1-based
    column: usize, // 0-based
    token_line: usize,
    token_column: usize,

    indent: usize,            // current indentation (number of spaces)
    indent_stack: Vec<usize>, // open indentation levels, base 0 at the bottom
    pending: VecDeque<Token>,

    buf: String, // reused scan buffer; text is copied out on emission

    indent_size: usize,
    strict: bool,
    max_number_length: usize,
    first_line_checked: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer with default options.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::with_options(input, &ToonOptions::default())
    }

    /// Creates a lexer with the given options.
    #[must_use]
    pub fn with_options(input: &'a str, options: &ToonOptions) -> Self {
        let mut chars = input.chars();
        let current = chars.next();
        let peek = chars.next();
        Lexer {
            chars,
            current,
            peek,
            line: 1,
            column: 0,
            token_line: 1,
            token_column: 0,
            indent: 0,
            indent_stack: vec![0],
            pending: VecDeque::new(),
            buf: String::new(),
            indent_size: options.indent_size,
            strict: options.strict,
            max_number_length: options.max_number_length,
            first_line_checked: false,
        }
    }

    /// Returns the next token from the input.
    pub fn next_token(&mut self) -> Token {
        if let Some(token) = self.pending.pop_front() {
            return token;
        }

        // Leading whitespace on the very first line is indentation too; every
        // later line's is consumed by the newline handler.
        if !self.first_line_checked {
            self.first_line_checked = true;
            if matches!(self.current, Some(' ') | Some('\t')) {
                if let Some(token) = self.measure_indent(false) {
                    return token;
                }
            }
        }

        // Skip spaces within a line. Column 0 is significant (indentation)
        // and tabs are the Htab delimiter token, so neither is skipped here.
        while self.current == Some(' ') && self.column > 0 {
            self.advance();
        }

        self.token_line = self.line;
        self.token_column = self.column;

        let ch = match self.current {
            Some(ch) => ch,
            None => {
                // Close any open indentation levels before the final Eof.
                if self.indent_stack.len() > 1 {
                    while self.indent_stack.len() > 1 {
                        self.indent_stack.pop();
                        self.pending.push_back(Token::Dedent);
                    }
                    self.indent = 0;
                    return self.pending.pop_front().unwrap_or(Token::Eof);
                }
                return Token::Eof;
            }
        };

        match ch {
            '\n' => self.handle_newline(),
            ':' => {
                self.advance();
                Token::Colon
            }
            ',' => {
                self.advance();
                Token::Comma
            }
            '|' => {
                self.advance();
                Token::Pipe
            }
            '[' => {
                self.advance();
                Token::LBracket
            }
            ']' => {
                self.advance();
                Token::RBracket
            }
            '{' => {
                self.advance();
                Token::LBrace
            }
            '}' => {
                self.advance();
                Token::RBrace
            }
            '\t' => {
                self.advance();
                Token::Htab
            }
            '-' => {
                self.advance();
                match self.current {
                    // "- " is the list item prefix; the space is skipped on
                    // the next scan.
                    Some(' ') => Token::Hyphen,
                    Some(c) if c.is_ascii_digit() => {
                        self.buf.clear();
                        self.buf.push('-');
                        self.scan_number()
                    }
                    _ => {
                        self.buf.clear();
                        self.buf.push('-');
                        self.scan_unquoted()
                    }
                }
            }
            '"' => self.scan_quoted(),
            c if c.is_ascii_digit() => {
                self.buf.clear();
                self.scan_number()
            }
            c if is_identifier_start(c) => self.scan_identifier(),
            _ => {
                self.buf.clear();
                self.scan_unquoted()
            }
        }
    }

    /// Returns the current indentation level (number of leading spaces).
    #[must_use]
    pub fn indent_level(&self) -> usize {
        self.indent
    }

    /// Returns the line the last token started on (1-based).
    #[must_use]
    pub fn token_line(&self) -> usize {
        self.token_line
    }

    /// Returns the column the last token started at (0-based).
    #[must_use]
    pub fn token_column(&self) -> usize {
        self.token_column
    }

    /// Returns the current cursor line (1-based).
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Returns the current cursor column (0-based).
    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }

    // ------------------------------------------------------------------
    // Character intake
    // ------------------------------------------------------------------

    fn advance(&mut self) {
        if self.current == Some('\n') {
            self.line += 1;
            self.column = 0;
        } else if self.current.is_some() {
            self.column += 1;
        }
        self.current = self.peek;
        self.peek = self.chars.next();
    }

    // ------------------------------------------------------------------
    // Indentation
    // ------------------------------------------------------------------

    fn handle_newline(&mut self) -> Token {
        self.advance(); // consume the newline
        self.measure_indent(true).unwrap_or(Token::Newline)
    }

    /// Measures the leading whitespace of the line the cursor sits at and
    /// queues the resulting layout tokens. With `emit_newline` a `Newline`
    /// is queued first (the post-newline path); without it this is the
    /// first-line path, which may have nothing to emit.
    fn measure_indent(&mut self, emit_newline: bool) -> Option<Token> {
        let mut spaces = 0usize;
        loop {
            match self.current {
                Some(' ') => {
                    spaces += 1;
                    self.advance();
                }
                // Lenient mode tolerates tabs in indentation, counting each
                // as a single space. Strict mode rejects them below.
                Some('\t') if !self.strict => {
                    spaces += 1;
                    self.advance();
                }
                _ => break,
            }
        }

        // Blank lines are layout noise: the indent stack is untouched.
        if matches!(self.current, Some('\n') | None) {
            return if emit_newline { Some(Token::Newline) } else { None };
        }

        if self.strict && self.current == Some('\t') {
            return Some(Token::Error(Error::indentation(
                self.line,
                self.column,
                "Tab character in indentation (tabs are only allowed as delimiters)",
            )));
        }

        if self.strict && spaces % self.indent_size != 0 {
            return Some(Token::Error(Error::indentation(
                self.line,
                self.column,
                format!(
                    "{} spaces is not a multiple of {}",
                    spaces, self.indent_size
                ),
            )));
        }

        if emit_newline {
            self.pending.push_back(Token::Newline);
        }

        if spaces > self.indent {
            if self.strict && spaces - self.indent != self.indent_size {
                self.pending.push_back(Token::Error(Error::indentation(
                    self.line,
                    self.column,
                    format!(
                        "expected {} spaces, found {}",
                        self.indent + self.indent_size,
                        spaces
                    ),
                )));
            } else {
                self.indent_stack.push(spaces);
                self.indent = spaces;
                self.pending.push_back(Token::Indent);
            }
        } else if spaces < self.indent {
            while self.indent_stack.len() > 1 && spaces < *self.indent_stack.last().unwrap() {
                self.indent_stack.pop();
                self.pending.push_back(Token::Dedent);
            }
            if *self.indent_stack.last().unwrap() != spaces {
                if self.strict {
                    self.pending.push_back(Token::Error(Error::indentation(
                        self.line,
                        self.column,
                        format!(
                            "indentation of {} spaces does not match any enclosing level",
                            spaces
                        ),
                    )));
                } else {
                    // Lenient: the observed indent becomes a level of its own.
                    self.indent_stack.push(spaces);
                }
            }
            self.indent = spaces;
        } else if emit_newline {
            self.pending.push_back(Token::SameIndent);
        }

        self.pending.pop_front()
    }

    // ------------------------------------------------------------------
    // Scanning
    // ------------------------------------------------------------------

    fn scan_quoted(&mut self) -> Token {
        self.buf.clear();
        self.advance(); // consume the opening quote

        loop {
            match self.current {
                None | Some('\n') => {
                    if self.strict {
                        return Token::Error(Error::lexical(
                            self.token_line,
                            self.token_column,
                            "Unterminated string",
                        ));
                    }
                    // Lenient: the string ends where the line does.
                    return Token::QuotedString(self.buf.clone());
                }
                Some('"') => {
                    self.advance();
                    return Token::QuotedString(self.buf.clone());
                }
                Some('\\') => {
                    self.advance();
                    match self.current {
                        Some('\\') => self.buf.push('\\'),
                        Some('"') => self.buf.push('"'),
                        Some('n') => self.buf.push('\n'),
                        Some('r') => self.buf.push('\r'),
                        Some('t') => self.buf.push('\t'),
                        Some(other) => {
                            if self.strict {
                                return Token::Error(Error::lexical(
                                    self.line,
                                    self.column,
                                    format!("Invalid escape sequence '\\{}'", other),
                                ));
                            }
                            // Lenient: keep the escaped character literally.
                            self.buf.push(other);
                        }
                        None => {
                            return Token::Error(Error::lexical(
                                self.token_line,
                                self.token_column,
                                "Unterminated string",
                            ));
                        }
                    }
                    self.advance();
                }
                Some(other) => {
                    self.buf.push(other);
                    self.advance();
                }
            }
        }
    }

    /// Scans a number. `buf` may already hold a leading minus.
    fn scan_number(&mut self) -> Token {
        if self.current == Some('0') {
            self.buf.push('0');
            self.advance();

            // "0" immediately followed by a digit is not a number: leading
            // zeros are reserved for zero-padded identifiers like "007".
            if matches!(self.current, Some(c) if c.is_ascii_digit()) {
                while matches!(self.current, Some(c) if is_identifier_continue(c)) {
                    self.buf.push(self.current.unwrap());
                    self.advance();
                }
                return Token::Identifier(self.buf.clone());
            }
        } else {
            if !matches!(self.current, Some(c) if c.is_ascii_digit()) {
                return Token::Error(Error::lexical(
                    self.token_line,
                    self.token_column,
                    "Invalid number",
                ));
            }
            while matches!(self.current, Some(c) if c.is_ascii_digit()) {
                self.buf.push(self.current.unwrap());
                self.advance();
            }
        }

        let mut fractional = false;

        if self.current == Some('.') {
            fractional = true;
            self.buf.push('.');
            self.advance();
            if !matches!(self.current, Some(c) if c.is_ascii_digit()) {
                return Token::Error(Error::lexical(
                    self.line,
                    self.column,
                    "digit expected after decimal point",
                ));
            }
            while matches!(self.current, Some(c) if c.is_ascii_digit()) {
                self.buf.push(self.current.unwrap());
                self.advance();
            }
        }

        if matches!(self.current, Some('e') | Some('E')) {
            fractional = true;
            self.buf.push(self.current.unwrap());
            self.advance();
            if matches!(self.current, Some('+') | Some('-')) {
                self.buf.push(self.current.unwrap());
                self.advance();
            }
            if !matches!(self.current, Some(c) if c.is_ascii_digit()) {
                return Token::Error(Error::lexical(
                    self.line,
                    self.column,
                    "digit expected in exponent",
                ));
            }
            while matches!(self.current, Some(c) if c.is_ascii_digit()) {
                self.buf.push(self.current.unwrap());
                self.advance();
            }
        }

        if self.buf.len() > self.max_number_length {
            return Token::Error(Error::resource(
                self.token_line,
                self.token_column,
                format!(
                    "Number literal exceeds {} characters",
                    self.max_number_length
                ),
            ));
        }

        if fractional {
            match self.buf.parse::<f64>() {
                Ok(value) => Token::Float(value),
                Err(_) => Token::Error(Error::lexical(
                    self.token_line,
                    self.token_column,
                    format!("Invalid number '{}'", self.buf),
                )),
            }
        } else {
            match self.buf.parse::<i64>() {
                Ok(value) => Token::Integer(value),
                // Out of i64 range: fall back to a double, as the format's
                // JavaScript lineage does.
                Err(_) => match self.buf.parse::<f64>() {
                    Ok(value) => Token::Float(value),
                    Err(_) => Token::Error(Error::lexical(
                        self.token_line,
                        self.token_column,
                        format!("Invalid number '{}'", self.buf),
                    )),
                },
            }
        }
    }

    fn scan_identifier(&mut self) -> Token {
        self.buf.clear();
        self.buf.push(self.current.unwrap());
        self.advance();

        while matches!(self.current, Some(c) if is_identifier_continue(c)) {
            self.buf.push(self.current.unwrap());
            self.advance();
        }

        // A character an unquoted string would swallow (a space, a hyphen,
        // anything non-structural) extends this into a multi-word string:
        // "hello world" is one value, not two.
        if matches!(self.current, Some(c) if !is_unquoted_stop(c)) {
            return self.scan_unquoted();
        }

        match self.buf.as_str() {
            "true" => Token::Bool(true),
            "false" => Token::Bool(false),
            "null" => Token::Null,
            _ => Token::Identifier(self.buf.clone()),
        }
    }

    /// Scans an unquoted string until a structural character or line end.
    /// `buf` may already hold scanned text; trailing spaces are trimmed.
    fn scan_unquoted(&mut self) -> Token {
        while let Some(c) = self.current {
            if is_unquoted_stop(c) {
                break;
            }
            self.buf.push(c);
            self.advance();
        }

        while self.buf.ends_with(' ') {
            self.buf.pop();
        }

        if self.buf.is_empty() {
            let found = self.current.unwrap_or(' ');
            self.advance();
            return Token::Error(Error::lexical(
                self.token_line,
                self.token_column,
                format!("Unexpected character '{}'", found),
            ));
        }

        match self.buf.as_str() {
            "true" => Token::Bool(true),
            "false" => Token::Bool(false),
            "null" => Token::Null,
            _ => Token::Identifier(self.buf.clone()),
        }
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_identifier_continue(c: char) -> bool {
    // Dots are allowed so dotted keys like "data.field" stay single tokens.
    is_identifier_start(c) || c.is_ascii_digit() || c == '.'
}

fn is_unquoted_stop(c: char) -> bool {
    matches!(
        c,
        '\n' | ':' | ',' | '|' | '[' | ']' | '{' | '}' | '"' | '\t'
    )
}
