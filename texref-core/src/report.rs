//! Output formatting - plaintext and JSON.
//!
//! The plain report lists every label, most referenced first. Unused labels
//! get a single line; used labels are followed by every location that
//! references them with the referencing source line.
//!
//! Colors and highlighting live behind [`Style`] so the same renderer
//! produces terminal output or verbatim text.

use std::io::{self, IsTerminal, Write};
use std::str::FromStr;

use colored::Colorize;
use serde::Deserialize;
use serde_json::json;
use terminal_size::Width;

use crate::error::{IoResultExt, TexrefError, TexrefResult};
use crate::highlight::{tokenize, TexToken};
use crate::labels::LabelGraph;

/// Width used when nothing better is known.
pub const DEFAULT_WIDTH: usize = 80;

/// Columns kept free to the right of a context line.
const CONTEXT_MARGIN: usize = 10;

/// Presentation strategy for the text report.
pub trait Style {
    /// Emphasis for an unused label and the word NOT.
    fn unused(&self, text: &str) -> String;
    /// Emphasis for a referenced label and its count.
    fn used(&self, text: &str) -> String;
    /// A `file:line:column` location.
    fn location(&self, text: &str) -> String;
    /// A line of TeX source.
    fn source(&self, text: &str) -> String;
}

/// Verbatim text, for pipes, files and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainStyle;

impl Style for PlainStyle {
    fn unused(&self, text: &str) -> String {
        text.to_string()
    }

    fn used(&self, text: &str) -> String {
        text.to_string()
    }

    fn location(&self, text: &str) -> String {
        text.to_string()
    }

    fn source(&self, text: &str) -> String {
        text.to_string()
    }
}

/// ANSI colors with TeX highlighting.
#[derive(Debug, Clone, Copy)]
pub struct AnsiStyle;

impl AnsiStyle {
    /// Forces `colored` on; the caller has already decided to colorize.
    pub fn new() -> Self {
        colored::control::set_override(true);
        Self
    }
}

impl Default for AnsiStyle {
    fn default() -> Self {
        Self::new()
    }
}

impl Style for AnsiStyle {
    fn unused(&self, text: &str) -> String {
        text.red().bold().to_string()
    }

    fn used(&self, text: &str) -> String {
        text.green().bold().to_string()
    }

    fn location(&self, text: &str) -> String {
        text.bold().to_string()
    }

    fn source(&self, text: &str) -> String {
        tokenize(text)
            .into_iter()
            .map(|(kind, s)| match kind {
                TexToken::Text => s.to_string(),
                TexToken::Command => s.blue().bold().to_string(),
                TexToken::Brace => s.magenta().to_string(),
                TexToken::Math => s.yellow().to_string(),
                TexToken::Comment => s.dimmed().italic().to_string(),
            })
            .collect()
    }
}

/// When to colorize the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Colorize only when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl FromStr for ColorChoice {
    type Err = TexrefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            other => Err(TexrefError::invalid_argument(format!(
                "unknown color mode '{}' (expected auto, always or never)",
                other
            ))),
        }
    }
}

impl ColorChoice {
    /// Resolves the choice against the actual stdout.
    pub fn style(self) -> Box<dyn Style> {
        let colorize = match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => io::stdout().is_terminal(),
        };

        if colorize {
            Box::new(AnsiStyle::new())
        } else {
            Box::new(PlainStyle)
        }
    }
}

/// Display width of the terminal on stdout.
///
/// When stdout is not a terminal, `$COLUMNS` is used, then [`DEFAULT_WIDTH`].
pub fn terminal_width() -> usize {
    let tty = terminal_size::terminal_size().map(|(Width(w), _)| usize::from(w));
    let columns = std::env::var("COLUMNS").ok();
    resolve_width(tty, columns.as_deref())
}

/// Picks the first usable width: terminal, then `$COLUMNS`, then the default.
fn resolve_width(tty: Option<usize>, columns: Option<&str>) -> usize {
    tty.filter(|&w| w > 0)
        .or_else(|| {
            columns
                .and_then(|v| v.trim().parse::<usize>().ok())
                .filter(|&w| w > 0)
        })
        .unwrap_or(DEFAULT_WIDTH)
}

/// Truncates `text` to `max_length` characters, appending `...` if cut.
pub fn ellipsis(text: &str, max_length: usize) -> String {
    if text.chars().count() > max_length {
        let cut: String = text.chars().take(max_length).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

/// Source line as shown under a reference: backslashes removed, fitted to `width`.
pub fn context_snippet(text: &str, width: usize) -> String {
    let stripped = text.replace('\\', "");
    ellipsis(&stripped, width.saturating_sub(CONTEXT_MARGIN))
}

/// Writes the text report for `graph` to `out`.
pub fn render_report<W: Write>(
    out: &mut W,
    graph: &LabelGraph,
    style: &dyn Style,
    width: usize,
) -> io::Result<()> {
    for usage in graph.sorted_usage() {
        let Some(label) = graph.label(usage.id) else {
            continue;
        };
        let defined_at = style.location(&label.location());

        if usage.count == 0 {
            writeln!(
                out,
                "{} (defined at {}) is {} referenced!",
                style.unused(&label.name),
                defined_at,
                style.unused("NOT")
            )?;
        } else {
            writeln!(
                out,
                "{} (defined at {}) is referenced {} times:",
                style.used(&label.name),
                defined_at,
                style.used(&usage.count.to_string())
            )?;
            for reference in graph.references_to(usage.id) {
                writeln!(out, "    {}:", style.location(&reference.location()))?;
                writeln!(
                    out,
                    "        {}",
                    style.source(&context_snippet(&reference.text, width))
                )?;
            }
        }

        writeln!(out)?;
    }

    Ok(())
}

/// Renders the text report into a string.
pub fn report_to_string(
    graph: &LabelGraph,
    style: &dyn Style,
    width: usize,
) -> io::Result<String> {
    let mut buf: Vec<u8> = Vec::new();
    render_report(&mut buf, graph, style, width)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Prints the text report to stdout.
pub fn print_plain(graph: &LabelGraph, style: &dyn Style, width: usize) -> TexrefResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_report(&mut out, graph, style, width).with_path("<stdout>")?;
    out.flush().with_path("<stdout>")
}

/// Builds the JSON form of the report.
pub fn report_json(graph: &LabelGraph) -> serde_json::Value {
    let labels: Vec<_> = graph
        .sorted_usage()
        .iter()
        .filter_map(|usage| {
            let label = graph.label(usage.id)?;
            let references: Vec<_> = graph
                .references_to(usage.id)
                .map(|r| {
                    json!({
                        "file": r.file,
                        "line": r.span.line_start(),
                        "column": r.span.column_start(),
                        "text": r.text,
                    })
                })
                .collect();
            Some(json!({
                "name": label.name,
                "file": label.file,
                "line": label.span.line_start(),
                "column": label.span.column_start(),
                "count": usage.count,
                "references": references,
            }))
        })
        .collect();

    let dangling: Vec<_> = graph
        .dangling_references()
        .map(|r| {
            json!({
                "name": r.name,
                "file": r.file,
                "line": r.span.line_start(),
                "column": r.span.column_start(),
            })
        })
        .collect();

    let duplicates: Vec<_> = graph
        .duplicate_labels()
        .into_iter()
        .map(|l| {
            json!({
                "name": l.name,
                "file": l.file,
                "line": l.span.line_start(),
                "column": l.span.column_start(),
            })
        })
        .collect();

    json!({
        "stats": graph.stats(),
        "labels": labels,
        "dangling": dangling,
        "duplicates": duplicates,
    })
}

/// Prints the report in JSON format.
///
/// Falls back to the compact form if pretty printing fails.
pub fn print_json(graph: &LabelGraph) {
    let value = report_json(graph);
    match serde_json::to_string_pretty(&value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            tracing::warn!(error = %e, "pretty JSON serialization failed");
            println!("{}", value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::labels::{extract_labels, extract_references};

    fn graph_for(text: &str) -> LabelGraph {
        let doc = Document::from_text("main.tex", text);
        let labels = extract_labels(doc.name(), doc.lines());
        let references = extract_references(doc.name(), doc.lines(), &labels);
        LabelGraph::new(labels, references)
    }

    const SAMPLE: &str = "\\label{sec:intro}\nSee \\ref{sec:intro} for details.\n\\label{sec:unused}\n";

    #[test]
    fn test_plain_report() {
        let graph = graph_for(SAMPLE);
        let report = report_to_string(&graph, &PlainStyle, 80).unwrap();
        assert_eq!(
            report,
            "sec:intro (defined at main.tex:1:7) is referenced 1 times:\n\
             \x20   main.tex:2:9:\n\
             \x20       See ref{sec:intro} for details.\n\
             \n\
             sec:unused (defined at main.tex:3:7) is NOT referenced!\n\
             \n"
        );
    }

    #[test]
    fn test_dangling_reference_not_listed() {
        let graph = graph_for("\\ref{missing}\n");
        assert_eq!(report_to_string(&graph, &PlainStyle, 80).unwrap(), "");
    }

    #[test]
    fn test_context_is_truncated() {
        let long = format!("\\ref{{a}} {}", "x".repeat(100));
        let graph = graph_for(&format!("\\label{{a}}\n{}\n", long));
        let report = report_to_string(&graph, &PlainStyle, 30).unwrap();
        let context = report.lines().nth(2).unwrap_or_default().trim_start();
        assert_eq!(context.chars().count(), 23);
        assert!(context.ends_with("..."));
        assert!(context.starts_with("ref{a}"));
    }

    #[test]
    fn test_width_fallback_chain() {
        assert_eq!(resolve_width(Some(200), Some("120")), 200);
        assert_eq!(resolve_width(None, Some(" 120 ")), 120);
        assert_eq!(resolve_width(Some(0), Some("120")), 120);
        assert_eq!(resolve_width(None, Some("wide")), DEFAULT_WIDTH);
        assert_eq!(resolve_width(None, Some("0")), DEFAULT_WIDTH);
        assert_eq!(resolve_width(None, None), DEFAULT_WIDTH);
    }

    #[test]
    fn test_context_fits_wide_terminal() {
        let long = format!("\\ref{{a}} {}", "x".repeat(180));
        let graph = graph_for(&format!("\\label{{a}}\n{}\n", long));
        let width = resolve_width(Some(200), None);
        let report = report_to_string(&graph, &PlainStyle, width).unwrap();
        let context = report.lines().nth(2).unwrap_or_default().trim_start();
        assert_eq!(context.chars().count(), 187);
        assert!(!context.ends_with("..."));
    }

    #[test]
    fn test_ellipsis() {
        assert_eq!(ellipsis("short", 10), "short");
        assert_eq!(ellipsis("exactly10!", 10), "exactly10!");
        assert_eq!(ellipsis("abcdefghijk", 3), "abc...");
        assert_eq!(ellipsis("äöüß", 2), "äö...");
    }

    #[test]
    fn test_context_snippet_narrow_width() {
        assert_eq!(context_snippet("\\ref{a}", 5), "...");
    }

    #[test]
    fn test_color_choice_parse() {
        assert_eq!("auto".parse::<ColorChoice>().unwrap(), ColorChoice::Auto);
        assert_eq!("ALWAYS".parse::<ColorChoice>().unwrap(), ColorChoice::Always);
        assert_eq!("never".parse::<ColorChoice>().unwrap(), ColorChoice::Never);
        assert!("sometimes".parse::<ColorChoice>().is_err());
    }

    #[test]
    fn test_ansi_style_wraps_in_escapes() {
        let style = AnsiStyle::new();
        let unused = style.unused("fig:a");
        assert!(unused.contains("fig:a"));
        assert!(unused.starts_with("\x1b["));
        assert!(style.source("ref{fig:a}").contains("fig:a"));
    }

    #[test]
    fn test_json_report() {
        let graph = graph_for("\\label{a}\n\\label{b}\n\\ref{b}\n\\ref{zzz}\n");
        let value = report_json(&graph);

        assert_eq!(value["stats"]["total_labels"], 2);
        assert_eq!(value["stats"]["dangling_references"], 1);
        assert_eq!(value["labels"][0]["name"], "b");
        assert_eq!(value["labels"][0]["count"], 1);
        assert_eq!(value["labels"][0]["references"][0]["line"], 3);
        assert_eq!(value["labels"][1]["count"], 0);
        assert_eq!(value["dangling"][0]["name"], "zzz");
        assert!(value["duplicates"].as_array().is_some_and(|d| d.is_empty()));
    }
}
