//! Builder pattern API for texref analysis.
//!
//! ```rust,ignore
//! use texref_core::prelude::*;
//!
//! let result = Texref::open("thesis.tex")?.analyze();
//! for label in result.unused_labels() {
//!     println!("Unused: {}", label.name);
//! }
//! ```

use tracing::info;

use crate::document::Document;
use crate::error::TexrefResult;
use crate::labels::{extract_labels, extract_references, Label, LabelGraph, LabelStats, Reference};

/// Builder for configuring a label analysis.
#[derive(Debug, Clone)]
pub struct Texref {
    document: Document,
    /// Accepted for future reference validation; no effect yet
    check: bool,
}

impl Texref {
    /// Create an analysis over an in-memory document.
    pub fn new(document: Document) -> Self {
        Self {
            document,
            check: false,
        }
    }

    /// Create an analysis over `filename`, or standard input for `-`.
    pub fn open(filename: &str) -> TexrefResult<Self> {
        Ok(Self::new(Document::open(filename)?))
    }

    /// Request reference validation. Currently accepted and ignored.
    pub fn check(mut self, enabled: bool) -> Self {
        self.check = enabled;
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Run the analysis.
    pub fn analyze(&self) -> AnalysisResult {
        let name = self.document.name();
        let lines = self.document.lines();

        let labels = extract_labels(name, lines);
        let references = extract_references(name, lines, &labels);
        let graph = LabelGraph::new(labels, references);
        let stats = graph.stats();

        info!(
            file = %name,
            labels = stats.total_labels,
            unused = stats.unused_labels,
            references = stats.total_references,
            dangling = stats.dangling_references,
            check = self.check,
            "analysis complete"
        );

        AnalysisResult { graph, stats }
    }
}

/// Result of a label analysis.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub graph: LabelGraph,
    pub stats: LabelStats,
}

impl AnalysisResult {
    pub fn labels(&self) -> &[Label] {
        self.graph.labels()
    }

    pub fn references(&self) -> &[Reference] {
        self.graph.references()
    }

    pub fn unused_labels(&self) -> Vec<&Label> {
        self.graph.unused_labels().collect()
    }

    pub fn dangling_references(&self) -> Vec<&Reference> {
        self.graph.dangling_references().collect()
    }

    pub fn duplicate_labels(&self) -> Vec<&Label> {
        self.graph.duplicate_labels()
    }
}
