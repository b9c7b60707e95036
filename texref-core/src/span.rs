//! Source intervals anchoring labels and references to their origin.

use serde::Serialize;
use std::fmt;

/// A line/column interval in a document.
///
/// Lines are 1-based. Columns are whatever the producer recorded; the
/// scanners store 0-based character offsets of the captured name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TextSpan {
    line_start: usize,
    line_end: usize,
    column_start: usize,
    column_end: usize,
}

impl TextSpan {
    /// Builds a span, rejecting intervals whose end precedes their start.
    pub fn new(line_start: usize, line_end: usize, column_start: usize, column_end: usize) -> Option<Self> {
        let ordered = line_start < line_end || (line_start == line_end && column_start <= column_end);
        ordered.then_some(Self {
            line_start,
            line_end,
            column_start,
            column_end,
        })
    }

    /// A span confined to a single line. Columns are swapped if given backwards.
    pub fn on_line(line: usize, column_start: usize, column_end: usize) -> Self {
        Self {
            line_start: line,
            line_end: line,
            column_start: column_start.min(column_end),
            column_end: column_start.max(column_end),
        }
    }

    pub fn line_start(&self) -> usize {
        self.line_start
    }

    pub fn line_end(&self) -> usize {
        self.line_end
    }

    pub fn column_start(&self) -> usize {
        self.column_start
    }

    pub fn column_end(&self) -> usize {
        self.column_end
    }

    /// `(line_start, column_start)`
    pub fn start(&self) -> (usize, usize) {
        (self.line_start, self.column_start)
    }

    /// `(line_end, column_end)`
    pub fn end(&self) -> (usize, usize) {
        (self.line_end, self.column_end)
    }
}

impl fmt::Display for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}:{}",
            self.line_start, self.column_start, self.line_end, self.column_end
        )
    }
}
