//! Error types for TOON parsing and generation.
//!
//! Every decoding error carries the line (1-based) and column (0-based) at
//! which it was detected. Errors are fatal: the first error terminates the
//! event stream, and there is no local recovery. Lenient mode (see
//! [`ToonOptions`](crate::ToonOptions)) avoids *raising* certain errors in
//! the first place rather than recovering from them afterwards.
//!
//! ## Error Categories
//!
//! - **Lexical**: unterminated strings, invalid escapes, malformed numbers,
//!   illegal characters
//! - **Indentation**: leading spaces that are not a multiple of the indent
//!   size, tabs in indentation, dedents to a level that was never opened
//! - **Structural**: missing colons, malformed array headers, array length
//!   mismatches, tabular row width mismatches
//! - **Resource**: nesting depth or number length limits exceeded
//! - **Generate**: misuse of the generator (value without a field name,
//!   unbalanced start/end calls, unrepresentable shapes)
//!
//! ## Examples
//!
//! ```rust
//! use toon_stream::{from_str, Error, Value};
//!
//! let result: Result<Value, Error> = from_str("\"unterminated");
//! assert!(result.is_err());
//!
//! if let Err(err) = result {
//!     eprintln!("Parse error: {}", err);
//!     // Error messages include line and column information
//! }
//! ```

use thiserror::Error;

/// Represents all possible errors that can occur while decoding or encoding
/// TOON documents.
///
/// Decoding variants include the position at which the error was detected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Character-level scanning error
    #[error("Lexical error at line {line}, column {column}: {msg}")]
    Lexical {
        msg: String,
        line: usize,
        column: usize,
    },

    /// Indentation error in the layout of the document
    #[error("Indentation error at line {line}, column {column}: {msg}")]
    Indentation {
        msg: String,
        line: usize,
        column: usize,
    },

    /// Token-level structure error (missing colon, bad array header, ...)
    #[error("Syntax error at line {line}, column {column}: {msg}")]
    Structural {
        msg: String,
        line: usize,
        column: usize,
    },

    /// A configured resource limit was exceeded
    #[error("Resource limit exceeded at line {line}, column {column}: {msg}")]
    Resource {
        msg: String,
        line: usize,
        column: usize,
    },

    /// Generator misuse or an unrepresentable document shape
    #[error("Generation error: {msg}")]
    Generate { msg: String },
}

impl Error {
    /// Creates a lexical error with position information.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toon_stream::Error;
    ///
    /// let err = Error::lexical(3, 7, "Unterminated string");
    /// assert!(err.to_string().contains("line 3"));
    /// ```
    pub fn lexical(line: usize, column: usize, msg: impl Into<String>) -> Self {
        Error::Lexical {
            msg: msg.into(),
            line,
            column,
        }
    }

    /// Creates an indentation error with position information.
    pub fn indentation(line: usize, column: usize, msg: impl Into<String>) -> Self {
        Error::Indentation {
            msg: msg.into(),
            line,
            column,
        }
    }

    /// Creates a structural error with position information.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toon_stream::Error;
    ///
    /// let err = Error::structural(1, 4, "Expected ':' after field name");
    /// assert!(err.to_string().contains("Expected ':'"));
    /// ```
    pub fn structural(line: usize, column: usize, msg: impl Into<String>) -> Self {
        Error::Structural {
            msg: msg.into(),
            line,
            column,
        }
    }

    /// Creates a resource limit error with position information.
    pub fn resource(line: usize, column: usize, msg: impl Into<String>) -> Self {
        Error::Resource {
            msg: msg.into(),
            line,
            column,
        }
    }

    /// Creates a generation error.
    pub fn generate(msg: impl Into<String>) -> Self {
        Error::Generate { msg: msg.into() }
    }

    /// Returns the line at which a decoding error was detected (1-based).
    ///
    /// Generation errors have no position and return `None`.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Lexical { line, .. }
            | Error::Indentation { line, .. }
            | Error::Structural { line, .. }
            | Error::Resource { line, .. } => Some(*line),
            Error::Generate { .. } => None,
        }
    }

    /// Returns the column at which a decoding error was detected (0-based).
    #[must_use]
    pub fn column(&self) -> Option<usize> {
        match self {
            Error::Lexical { column, .. }
            | Error::Indentation { column, .. }
            | Error::Structural { column, .. }
            | Error::Resource { column, .. } => Some(*column),
            Error::Generate { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
