//! TOON wire format notes
//!
//! This module documents the TOON (Token-Oriented Object Notation) text
//! format as implemented by this crate.
//!
//! # Overview
//!
//! TOON is a line-oriented, indentation-based encoding of the JSON data
//! model, designed to cut LLM token counts by 30–60% relative to JSON. It
//! removes braces, brackets and most quotes, and compresses uniform object
//! arrays into tables.
//!
//! Documents are UTF-8 with LF line endings, no BOM, and no trailing
//! newline.
//!
//! # Objects
//!
//! Objects are newline-delimited `key: value` pairs; nesting is expressed
//! by indentation (2 spaces per level by default):
//!
//! ```text
//! name: Alice
//! age: 30
//! address:
//!   city: Berlin
//!   zip: "10115"
//! ```
//!
//! Keys are unquoted when they match `[A-Za-z_][A-Za-z0-9_.]*` and are not
//! `true`, `false` or `null`; anything else is quoted. Dotted keys like
//! `data.field` are ordinary field names; no path expansion is performed.
//!
//! A key with nothing indented below it is an empty object:
//!
//! ```text
//! empty_object:
//! ```
//!
//! # Primitives
//!
//! | Type | Syntax | Example |
//! |------|--------|---------|
//! | Null | `null` | `value: null` |
//! | Boolean | `true` / `false` | `active: true` |
//! | Integer | decimal digits, optional `-` | `count: 42` |
//! | Float | decimal point and/or exponent | `price: 19.99` |
//! | String | unquoted or `"quoted"` | `name: Alice` |
//!
//! Number literals follow the JSON shape, with one restriction: a leading
//! zero followed by more digits (`007`) is *not* a number; it stays a
//! string, so zero-padded identifiers survive round-trips. The generator
//! never emits exponent notation. Floats keep one fractional digit
//! (`42.0`) so the float type stays visible in the text, except
//! whole-number floats at exponent magnitudes: `1e6` prints as the bare
//! integer `1000000`.
//!
//! Strings are unquoted by default. Quoting applies when a string is
//! empty, has leading or trailing whitespace, spells a keyword or number,
//! begins with `#` or a digit, is `-` or begins with `- `, or contains any
//! of `: " \ [ ] { } , | tab newline`. Quoted strings know five escapes:
//! `\\`, `\"`, `\n`, `\r`, `\t`.
//!
//! # Arrays
//!
//! Every array header declares its length. Three body formats exist:
//!
//! **Inline**: primitive elements on the header line:
//!
//! ```text
//! tags[3]: a,b,c
//! ```
//!
//! **List**: one `- ` item per line, used for objects and mixed content:
//!
//! ```text
//! items[2]:
//!   - id: 1
//!     name: First
//!   - id: 2
//!     name: Second
//! ```
//!
//! The first field of an object item shares the hyphen line; its remaining
//! fields sit one level deeper than the hyphen.
//!
//! **Tabular**: uniform object arrays compress into a field list and one
//! row per element:
//!
//! ```text
//! users[2]{id,name}:
//!   1,Alice
//!   2,Bob
//! ```
//!
//! An empty array is a bare header (`[0]:`); a document may also be a lone
//! array (`[3]: a,b,c`), a lone primitive (`42`), or empty (an empty
//! object).
//!
//! # Delimiters
//!
//! Inline elements, rows and field lists are separated by the active
//! delimiter: comma (default), pipe, or tab. Non-comma delimiters are
//! announced inside the header brackets:
//!
//! ```text
//! tags[3|]: a|b|c
//! ```
//!
//! Delimiters scope with the array: a nested array may use a different
//! delimiter than its parent, and the parent's returns when the nested
//! array closes.
//!
//! # Strict and lenient mode
//!
//! Strict mode (the default) fails on:
//!
//! - leading spaces that are not a multiple of the indent size, indent
//!   jumps of more than one level, dedents to a level that was never
//!   opened, tabs in indentation
//! - array length and tabular row width mismatches
//! - invalid escape sequences
//! - numeric or keyword tokens used as unquoted field names
//!
//! Lenient mode parses all of the above best-effort: array lengths are
//! taken as counted, invalid escapes keep the escaped character, an
//! unmatched dedent level is adopted as a level of its own, and extra or
//! missing row values are dropped or cut short.
//!
//! # Limits
//!
//! Nesting depth and the length of a single number literal are capped
//! (1000 each by default); see [`ToonOptions`](crate::ToonOptions).

// This module contains only documentation; no implementation code
