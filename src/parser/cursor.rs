//! Scan position
//!
//! A [`Cursor`] is an immutable value: every advancing step returns a new
//! cursor instead of mutating shared state, so any intermediate position can
//! be kept, compared or reported.

use crate::documents::Position;

/// Byte offset plus 1-based line and column into the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Byte offset into the input
    pub offset: usize,
    /// Current line
    pub line: usize,
    /// Current column, in characters
    pub column: usize,
}

impl Cursor {
    /// Cursor at the start of the input
    pub fn start() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// Step over one character. This is the only way positions move.
    pub fn advance(self, c: char) -> Self {
        if c == '\n' {
            Self {
                offset: self.offset + c.len_utf8(),
                line: self.line + 1,
                column: 1,
            }
        } else {
            Self {
                offset: self.offset + c.len_utf8(),
                line: self.line,
                column: self.column + 1,
            }
        }
    }

    /// Step over every character of `s`
    pub fn advance_str(self, s: &str) -> Self {
        s.chars().fold(self, Cursor::advance)
    }

    /// Line and column as a node position
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::start()
    }
}
