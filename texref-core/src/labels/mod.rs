//! Label and reference analysis.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────┐     ┌───────────────────────┐
//! │ label_extractor.rs  │────▶│ reference_extractor.rs│
//! │  ─────────────────  │     │  ───────────────────  │
//! │  Extract \label{}   │     │  Extract \...ref{},   │
//! │  definitions        │     │  resolve to labels    │
//! └──────────┬──────────┘     └──────────┬────────────┘
//!            │                           │
//!            └───────────┬───────────────┘
//!                        ▼
//!            ┌─────────────────────┐
//!            │   label_graph.rs    │
//!            │  ─────────────────  │
//!            │  Count usages per   │
//!            │  label, find unused │
//!            └─────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use texref_core::labels::{extract_labels, extract_references, LabelGraph};
//!
//! let labels = extract_labels("main.tex", &lines);
//! let references = extract_references("main.tex", &lines, &labels);
//! let graph = LabelGraph::new(labels, references);
//!
//! for label in graph.unused_labels() {
//!     println!("Unused label '{}' at {}", label.name, label.location());
//! }
//! ```

pub mod label_extractor;
pub mod label_graph;
pub mod reference_extractor;

pub use label_extractor::{extract_labels, Label, LabelId};
pub use label_graph::{LabelGraph, LabelStats, LabelUsage};
pub use reference_extractor::{extract_references, resolve_label, Reference};
