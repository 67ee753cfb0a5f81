//! Line/column bookkeeping for the scanner.

use crate::error::Position;

/// Tracks the 1-based (line, column) of the next unconsumed character.
///
/// A newline resets the column to 1 and bumps the line; any other character
/// advances the column by one. Multi-character tokens are consumed in a
/// single [`ScanCursor::advance`] call.
#[derive(Clone, Copy, Debug)]
pub struct ScanCursor {
    line: u32,
    column: u32,
}

impl ScanCursor {
    pub fn new() -> Self {
        ScanCursor { line: 1, column: 1 }
    }

    /// Position of the next unconsumed character.
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Consume `text`, updating line and column.
    pub fn advance(&mut self, text: &str) {
        for c in text.chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }
}

impl Default for ScanCursor {
    fn default() -> Self {
        ScanCursor::new()
    }
}
