//! Input cursor with mark/rewind backtracking.
//!
//! A [`Cursor`] borrows the full input text for the duration of a run and
//! tracks the current offset together with a 0-indexed line and column. All
//! consumption goes through [`Cursor::advance`], one unit at a time, so the
//! line/column bookkeeping can never desynchronize from the offset; bulk
//! operations like [`Cursor::skip`] are loops over `advance`, not offset
//! arithmetic.

use serde::{Deserialize, Serialize};

/// An immutable snapshot of a cursor position.
///
/// Marks are handed out by [`Cursor::mark`] and accepted back by
/// [`Cursor::rewind`]; a mark is only meaningful for the cursor (and text)
/// that issued it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Mark {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

/// A read-only position into caller-supplied text.
///
/// The cursor never owns the text; the caller keeps it alive for the whole
/// run. Offsets only move forward, except through an explicit
/// [`rewind`](Cursor::rewind) to a previously issued [`Mark`].
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    text: &'a str,
    mark: Mark,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            mark: Mark::default(),
        }
    }

    /// The full input text this cursor walks.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Read the next unit without consuming it. `None` at end of input.
    pub fn peek(&self) -> Option<char> {
        self.text[self.mark.offset..].chars().next()
    }

    pub fn is_at_end(&self) -> bool {
        self.mark.offset >= self.text.len()
    }

    /// Consume one unit, updating line/column. `None` at end of input.
    ///
    /// Consuming a newline increments `line` and resets `column` to zero;
    /// any other unit increments `column`.
    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.mark.offset += c.len_utf8();
        if c == '\n' {
            self.mark.line += 1;
            self.mark.column = 0;
        } else {
            self.mark.column += 1;
        }
        Some(c)
    }

    /// `n` sequential advances. On shortfall the cursor is left at the
    /// exact partial position and `false` is returned; callers that need
    /// atomicity mark/rewind around the call.
    pub fn skip(&mut self, n: usize) -> bool {
        for _ in 0..n {
            if self.advance().is_none() {
                return false;
            }
        }
        true
    }

    /// Skip `n` units, yielding the consumed slice. `None` on shortfall,
    /// with the cursor left at the partial position reached.
    pub fn take(&mut self, n: usize) -> Option<&'a str> {
        let start = self.mark.offset;
        if !self.skip(n) {
            return None;
        }
        Some(&self.text[start..self.mark.offset])
    }

    /// Snapshot the current position.
    pub fn mark(&self) -> Mark {
        self.mark
    }

    /// Restore a previously issued snapshot.
    pub fn rewind(&mut self, mark: Mark) {
        self.mark = mark;
    }
}
