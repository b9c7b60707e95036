//! texref-core: LaTeX cross-reference usage analysis.
//!
//! Finds every `\label{...}` definition and every `\...ref{...}` usage in a
//! document, links each usage to the label it names, and counts how often
//! each label is referenced so unused labels stand out.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use texref_core::prelude::*;
//!
//! let result = Texref::open("thesis.tex")?.analyze();
//! print_plain(&result.graph, &PlainStyle, 80)?;
//! ```
//!
//! # Module Organization
//!
//! - [`document`]: Loading documents from files or standard input
//! - [`position`]: Flattened offset to line/column mapping
//! - [`labels`]: Label and reference scanners, usage aggregation
//! - [`report`]: Plain/colored text and JSON reports
//! - [`highlight`]: TeX highlighting for context lines
//! - [`builder`]: Fluent builder API
//! - [`inputs`]: `\input` expansion (feature `inputs`)
//! - [`error`]: Typed error handling
//!
//! # Cargo Features
//!
//! - `inputs` (default): Enable `\input` expansion and the input tree

pub mod builder;
pub mod common;
pub mod config;
pub mod document;
pub mod error;
pub mod highlight;
pub mod labels;
pub mod logging;
pub mod position;
pub mod prelude;
pub mod report;
pub mod span;

#[cfg(feature = "inputs")]
pub mod inputs;

// Error types
pub use error::{IoResultExt, TexrefError, TexrefResult};

// Builder API
pub use builder::{AnalysisResult, Texref};

// Configuration
pub use config::{load_config, load_config_file, OutputConfig, OutputFormat, TexrefConfig};

// Documents and positions
pub use document::{Document, STDIN_LABEL, STDIN_NAME};
pub use position::{column_of_offset, line_of_offset, locate};
pub use span::TextSpan;

// Label analysis
pub use labels::{
    extract_labels, extract_references, resolve_label, Label, LabelGraph, LabelId, LabelStats,
    LabelUsage, Reference,
};

// Logging
pub use logging::{init_structured_logging, log_event, log_info};

// Reporting
pub use report::{
    print_json, print_plain, render_report, report_json, report_to_string, terminal_width,
    AnsiStyle, ColorChoice, PlainStyle, Style,
};

#[cfg(feature = "inputs")]
pub use inputs::{expand_inputs, input_tree, render_input_tree, InputExpander, InputFile};
