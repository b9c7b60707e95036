//! Loading LaTeX source into an ordered sequence of lines.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{IoResultExt, TexrefResult};

/// Filename that selects standard input.
pub const STDIN_NAME: &str = "-";

/// Logical name recorded for documents read from standard input.
pub const STDIN_LABEL: &str = "<stdin>";

/// A document held in memory as lines without terminators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    name: String,
    path: Option<PathBuf>,
    lines: Vec<String>,
}

impl Document {
    /// Builds a document from text already in memory.
    pub fn from_text(name: impl Into<String>, text: &str) -> Self {
        Self {
            name: name.into(),
            path: None,
            lines: split_lines(text),
        }
    }

    /// Reads a document from a path on disk.
    pub fn from_path(path: &Path) -> TexrefResult<Self> {
        let text = fs::read_to_string(path).with_path(path)?;
        let mut doc = Self::from_text(path.display().to_string(), &text);
        doc.path = Some(path.to_path_buf());
        debug!(file = %path.display(), lines = doc.lines.len(), "document loaded");
        Ok(doc)
    }

    /// Reads a whole document from any reader.
    pub fn from_reader(name: impl Into<String>, mut reader: impl Read) -> TexrefResult<Self> {
        let name = name.into();
        let mut text = String::new();
        reader.read_to_string(&mut text).with_path(&name)?;
        Ok(Self::from_text(name, &text))
    }

    /// Opens `filename`, or standard input when it is `-`.
    pub fn open(filename: &str) -> TexrefResult<Self> {
        if filename == STDIN_NAME {
            Self::from_reader(STDIN_LABEL, std::io::stdin().lock())
        } else {
            Self::from_path(Path::new(filename))
        }
    }

    /// Logical name used in spans and reports.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path on disk, if the document came from one.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Directory that relative paths in the document resolve against.
    pub fn base_dir(&self) -> PathBuf {
        self.path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Characters that end a line. `\r\n` counts as a single break.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\x0b'
            | '\x0c'
            | '\x1c'
            | '\x1d'
            | '\x1e'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// Splits text into lines without terminators.
///
/// Besides `\n` and `\r\n`, a lone `\r`, vertical tab, form feed, the
/// information separators, NEL and the Unicode line and paragraph separators
/// all end a line. A final terminator does not start an empty line.
pub(crate) fn split_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !is_line_break(c) {
            continue;
        }
        lines.push(text[start..i].to_string());
        start = i + c.len_utf8();
        if c == '\r' && matches!(chars.peek(), Some(&(_, '\n'))) {
            chars.next();
            start += 1;
        }
    }

    if start < text.len() {
        lines.push(text[start..].to_string());
    }
    lines
}
