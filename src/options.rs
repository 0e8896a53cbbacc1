//! Configuration options for the TOON codec.
//!
//! This module provides types to customize parsing and generation:
//!
//! - [`ToonOptions`]: Main configuration struct
//! - [`Delimiter`]: Choice of delimiter for arrays and tables (comma, tab, or pipe)
//!
//! ## Examples
//!
//! ```rust
//! use toon_stream::{to_string_with_options, toon, Delimiter, ToonOptions};
//!
//! let data = toon!({ "tags": ["a", "b", "c"] });
//!
//! // Use pipe delimiter
//! let options = ToonOptions::new().with_delimiter(Delimiter::Pipe);
//! let out = to_string_with_options(&data, &options).unwrap();
//! assert_eq!(out, "tags[3|]: a|b|c");
//! ```

/// Delimiter choice for TOON arrays and tables.
///
/// TOON supports multiple delimiters to optimize for different contexts:
///
/// - **Comma**: Default, most compact
/// - **Tab**: Best for TSV-like output
/// - **Pipe**: Readable for markdown-style tables
///
/// Non-comma delimiters are announced inside the array header brackets:
/// `[3|]: a|b|c` for pipe, `[3\t]: a\tb\tc` for tab.
///
/// # Examples
///
/// ```rust
/// use toon_stream::Delimiter;
///
/// assert_eq!(Delimiter::Comma.as_char(), ',');
/// assert_eq!(Delimiter::Tab.as_char(), '\t');
/// assert_eq!(Delimiter::Pipe.as_char(), '|');
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
}

impl Delimiter {
    /// Returns the delimiter character.
    #[must_use]
    pub const fn as_char(&self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
        }
    }

    /// Returns the string representation of this delimiter.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Delimiter::Comma => ",",
            Delimiter::Tab => "\t",
            Delimiter::Pipe => "|",
        }
    }

    /// Returns the marker written inside `[N…]` headers.
    ///
    /// The comma delimiter is the default and has no marker.
    #[must_use]
    pub const fn header_marker(&self) -> &'static str {
        match self {
            Delimiter::Comma => "",
            Delimiter::Tab => "\t",
            Delimiter::Pipe => "|",
        }
    }
}

/// Configuration options for TOON parsing and generation.
///
/// Controls indentation, strictness, the generator's active delimiter, and
/// resource limits.
///
/// # Examples
///
/// ```rust
/// use toon_stream::{Delimiter, ToonOptions};
///
/// // Default: strict, 2-space indentation, comma delimiter
/// let options = ToonOptions::new();
/// assert!(options.strict);
///
/// // Best-effort parsing
/// let options = ToonOptions::lenient();
/// assert!(!options.strict);
///
/// // Custom configuration
/// let options = ToonOptions::new()
///     .with_indent_size(4)
///     .with_delimiter(Delimiter::Pipe);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToonOptions {
    /// Spaces per indentation level. Strict mode requires every line's
    /// leading whitespace to be a multiple of this. Default 2.
    pub indent_size: usize,
    /// Whether indentation, array length, row width and escape validation
    /// fail hard (`true`) or are recovered best-effort (`false`). Default `true`.
    pub strict: bool,
    /// The delimiter the generator uses between inline elements, row values
    /// and field-list entries. Default comma.
    pub delimiter: Delimiter,
    /// Maximum structural nesting depth. Default 1000.
    pub max_nesting_depth: usize,
    /// Maximum length of a single numeric literal, in characters. Default 1000.
    pub max_number_length: usize,
}

impl Default for ToonOptions {
    fn default() -> Self {
        ToonOptions {
            indent_size: 2,
            strict: true,
            delimiter: Delimiter::default(),
            max_nesting_depth: 1000,
            max_number_length: 1000,
        }
    }
}

impl ToonOptions {
    /// Creates default options (strict mode, 2-space indent, comma delimiter).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toon_stream::ToonOptions;
    ///
    /// let options = ToonOptions::new();
    /// assert_eq!(options.indent_size, 2);
    /// assert_eq!(options.max_nesting_depth, 1000);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for best-effort parsing.
    ///
    /// Lenient mode takes array lengths as counted, keeps invalid escapes
    /// literally, and adopts misaligned indentation as new levels.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toon_stream::ToonOptions;
    ///
    /// let options = ToonOptions::lenient();
    /// assert!(!options.strict);
    /// ```
    #[must_use]
    pub fn lenient() -> Self {
        ToonOptions {
            strict: false,
            ..Default::default()
        }
    }

    /// Sets the indentation size (number of spaces per level).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toon_stream::ToonOptions;
    ///
    /// let options = ToonOptions::new().with_indent_size(4);
    /// assert_eq!(options.indent_size, 4);
    /// ```
    #[must_use]
    pub fn with_indent_size(mut self, indent_size: usize) -> Self {
        self.indent_size = indent_size.max(1);
        self
    }

    /// Enables or disables strict validation.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets the delimiter for arrays and tables.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toon_stream::{Delimiter, ToonOptions};
    ///
    /// let options = ToonOptions::new().with_delimiter(Delimiter::Tab);
    /// ```
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the maximum nesting depth.
    #[must_use]
    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth.max(1);
        self
    }

    /// Sets the maximum numeric literal length.
    #[must_use]
    pub fn with_max_number_length(mut self, length: usize) -> Self {
        self.max_number_length = length.max(1);
        self
    }
}
