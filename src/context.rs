//! Parser context frames.
//!
//! The parser tracks nested structure with a stack of value-type frames,
//! one per open object, array or tabular row. A frame records everything
//! the parser needs to resume that scope: its kind, the indentation its
//! content lives at, the declared length and running index for arrays, the
//! field list for tabular arrays, and the delimiter in force.
//!
//! Delimiters are stack-scoped: a nested array's delimiter hides the
//! parent's while the nested array is open. Lookups walk down from the top
//! and stop at the first array frame.

use crate::error::{Error, Result};
use crate::options::Delimiter;

/// What kind of scope a frame represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// Document root
    Root,
    /// A plain object (`key: value` lines)
    Object,
    /// An inline array (`[N]: v1,v2,v3`)
    ArrayInline,
    /// A tabular array (`[N]{fields}:` followed by rows)
    ArrayTabular,
    /// A list array (`[N]:` followed by `- ` items)
    ArrayList,
    /// One row of a tabular array, surfaced as an object
    TabularRow,
    /// An object that is a list item (first field on the hyphen line)
    ListItemObject,
}

impl FrameKind {
    /// Returns `true` for the three array body kinds.
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(
            self,
            FrameKind::ArrayInline | FrameKind::ArrayTabular | FrameKind::ArrayList
        )
    }

    /// Returns `true` for object-shaped scopes.
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(
            self,
            FrameKind::Object | FrameKind::ListItemObject | FrameKind::TabularRow
        )
    }
}

/// One entry of the parser's context stack.
#[derive(Debug, Clone)]
pub struct Frame {
    pub kind: FrameKind,
    /// Indentation level (in spaces) at which this frame's content lives.
    pub base_indent: usize,
    /// Declared element count for arrays.
    pub declared_len: usize,
    /// Elements consumed so far for arrays.
    pub index: usize,
    /// Field list for tabular arrays and their rows.
    pub field_names: Vec<String>,
    /// Next field to emit within a tabular row.
    pub field_index: usize,
    /// Delimiter in force inside this frame.
    pub delimiter: Delimiter,
    /// Set on a list-item object until its hyphen-line field is consumed.
    pub first_field: bool,
    /// Indentation of the first tabular row, fixed when it is seen.
    pub row_indent: Option<usize>,
}

impl Frame {
    pub fn root() -> Self {
        Frame::new(FrameKind::Root, 0, Delimiter::Comma)
    }

    pub fn object(base_indent: usize, delimiter: Delimiter) -> Self {
        Frame::new(FrameKind::Object, base_indent, delimiter)
    }

    pub fn inline_array(declared_len: usize, delimiter: Delimiter) -> Self {
        Frame {
            declared_len,
            ..Frame::new(FrameKind::ArrayInline, 0, delimiter)
        }
    }

    pub fn tabular_array(declared_len: usize, fields: Vec<String>, delimiter: Delimiter) -> Self {
        Frame {
            declared_len,
            field_names: fields,
            ..Frame::new(FrameKind::ArrayTabular, 0, delimiter)
        }
    }

    pub fn list_array(declared_len: usize, hyphen_indent: usize, delimiter: Delimiter) -> Self {
        Frame {
            declared_len,
            ..Frame::new(FrameKind::ArrayList, hyphen_indent, delimiter)
        }
    }

    pub fn tabular_row(fields: Vec<String>, delimiter: Delimiter) -> Self {
        Frame {
            field_names: fields,
            ..Frame::new(FrameKind::TabularRow, 0, delimiter)
        }
    }

    pub fn list_item_object(base_indent: usize, delimiter: Delimiter) -> Self {
        Frame {
            first_field: true,
            ..Frame::new(FrameKind::ListItemObject, base_indent, delimiter)
        }
    }

    fn new(kind: FrameKind, base_indent: usize, delimiter: Delimiter) -> Self {
        Frame {
            kind,
            base_indent,
            declared_len: 0,
            index: 0,
            field_names: Vec::new(),
            field_index: 0,
            delimiter,
            first_field: false,
            row_indent: None,
        }
    }
}

/// Depth-capped stack of [`Frame`]s with a root frame at the bottom.
#[derive(Debug)]
pub struct ContextStack {
    frames: Vec<Frame>,
    max_depth: usize,
}

impl ContextStack {
    pub fn new(max_depth: usize) -> Self {
        ContextStack {
            frames: vec![Frame::root()],
            max_depth,
        }
    }

    /// Pushes a frame, failing once the configured depth cap is crossed.
    pub fn push(&mut self, frame: Frame, line: usize, column: usize) -> Result<()> {
        if self.frames.len() >= self.max_depth {
            return Err(Error::resource(line, column, "Nesting depth exceeded"));
        }
        self.frames.push(frame);
        Ok(())
    }

    /// Pops the top frame. The root frame is never popped.
    pub fn pop(&mut self) -> Option<Frame> {
        if self.frames.len() > 1 {
            self.frames.pop()
        } else {
            None
        }
    }

    pub fn top(&self) -> &Frame {
        self.frames.last().expect("context stack has a root frame")
    }

    pub fn top_mut(&mut self) -> &mut Frame {
        self.frames
            .last_mut()
            .expect("context stack has a root frame")
    }

    /// Returns `true` when only the root frame remains.
    pub fn at_root(&self) -> bool {
        self.frames.len() == 1
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Delimiter in force: the nearest enclosing array frame's, walking
    /// down from the top, or comma outside any array.
    pub fn active_delimiter(&self) -> Delimiter {
        for frame in self.frames.iter().rev() {
            if frame.kind.is_array() || frame.kind == FrameKind::TabularRow {
                return frame.delimiter;
            }
        }
        Delimiter::Comma
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_cap_is_enforced() {
        let mut stack = ContextStack::new(3);
        assert!(stack
            .push(Frame::object(0, Delimiter::Comma), 1, 0)
            .is_ok());
        assert!(stack
            .push(Frame::object(2, Delimiter::Comma), 2, 0)
            .is_ok());
        let err = stack
            .push(Frame::object(4, Delimiter::Comma), 3, 0)
            .unwrap_err();
        assert!(err.to_string().contains("Nesting depth exceeded"));
    }

    #[test]
    fn root_frame_is_never_popped() {
        let mut stack = ContextStack::new(16);
        assert!(stack.pop().is_none());
        assert!(stack.at_root());
    }

    #[test]
    fn nested_array_delimiter_hides_parent() {
        let mut stack = ContextStack::new(16);
        stack
            .push(Frame::inline_array(2, Delimiter::Pipe), 1, 0)
            .unwrap();
        assert_eq!(stack.active_delimiter(), Delimiter::Pipe);
        stack
            .push(Frame::inline_array(2, Delimiter::Tab), 1, 0)
            .unwrap();
        assert_eq!(stack.active_delimiter(), Delimiter::Tab);
        stack.pop();
        assert_eq!(stack.active_delimiter(), Delimiter::Pipe);
    }

    #[test]
    fn object_frames_do_not_shadow_delimiters() {
        let mut stack = ContextStack::new(16);
        stack
            .push(Frame::inline_array(1, Delimiter::Pipe), 1, 0)
            .unwrap();
        stack
            .push(Frame::object(2, Delimiter::Pipe), 1, 0)
            .unwrap();
        assert_eq!(stack.active_delimiter(), Delimiter::Pipe);
    }
}
