//! Flattened-offset to line/column mapping.
//!
//! A document is held as lines without their terminators. An offset into the
//! concatenation of those lines (newlines not counted) is mapped back to the
//! 1-based line that contains it and the 1-based column within that line.
//! Lengths are counted in characters, not bytes.
//!
//! Offsets at or past the total length map to `None`.

/// Returns `(line, column)` for `offset`, both 1-based.
pub fn locate<S: AsRef<str>>(lines: &[S], offset: usize) -> Option<(usize, usize)> {
    let mut consumed = 0usize;
    for (index, line) in lines.iter().enumerate() {
        let len = line.as_ref().chars().count();
        if consumed + len > offset {
            return Some((index + 1, offset - consumed + 1));
        }
        consumed += len;
    }
    None
}

/// 1-based line number containing `offset`.
pub fn line_of_offset<S: AsRef<str>>(lines: &[S], offset: usize) -> Option<usize> {
    locate(lines, offset).map(|(line, _)| line)
}

/// 1-based column of `offset` within its line.
pub fn column_of_offset<S: AsRef<str>>(lines: &[S], offset: usize) -> Option<usize> {
    locate(lines, offset).map(|(_, column)| column)
}

/// Character offset of a byte index within `line`.
///
/// Regex captures report byte positions; spans are recorded in characters.
pub(crate) fn char_column(line: &str, byte_index: usize) -> usize {
    line.get(..byte_index)
        .map(|prefix| prefix.chars().count())
        .unwrap_or_else(|| line.chars().count())
}
