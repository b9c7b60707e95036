//! Label usage aggregation.
//!
//! Counts, for every label, the references resolved to it. Labels nobody
//! references keep a count of zero and are never dropped. Unresolved
//! references contribute to no count and to no usage list.
//!
//! Performance characteristics:
//! - Build: O(|L| + |R|) where L = labels, R = references
//! - Ordering: O(|L| log |L|) stable sort

use std::collections::HashMap;

use serde::Serialize;

use super::label_extractor::{Label, LabelId};
use super::reference_extractor::Reference;

/// A label together with its usage count.
#[derive(Debug, Clone, Serialize)]
pub struct LabelUsage {
    pub id: LabelId,
    pub count: usize,
}

/// Statistics about label usage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LabelStats {
    pub total_labels: usize,
    pub unused_labels: usize,
    pub duplicate_labels: usize,
    pub total_references: usize,
    pub resolved_references: usize,
    pub dangling_references: usize,
}

/// Labels and references of one scan session, with usage counts.
#[derive(Debug, Clone, Default)]
pub struct LabelGraph {
    labels: Vec<Label>,
    references: Vec<Reference>,
    /// Count per label, indexed by `LabelId`
    counts: Vec<usize>,
}

impl LabelGraph {
    /// Builds the graph and counts resolved references per label.
    pub fn new(labels: Vec<Label>, references: Vec<Reference>) -> Self {
        let mut counts = vec![0usize; labels.len()];

        for reference in &references {
            if let Some(LabelId(index)) = reference.label {
                if let Some(count) = counts.get_mut(index) {
                    *count += 1;
                }
            }
        }

        Self {
            labels,
            references,
            counts,
        }
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    pub fn label(&self, id: LabelId) -> Option<&Label> {
        self.labels.get(id.0)
    }

    /// Number of references resolved to `id`.
    pub fn count(&self, id: LabelId) -> usize {
        self.counts.get(id.0).copied().unwrap_or(0)
    }

    /// Usage count of every label, keyed by the label itself.
    pub fn usage_counts(&self) -> HashMap<&Label, usize> {
        self.labels.iter().zip(self.counts.iter().copied()).collect()
    }

    /// Labels ordered by count, most used first. Ties keep definition order.
    pub fn sorted_usage(&self) -> Vec<LabelUsage> {
        let mut usage: Vec<LabelUsage> = self
            .counts
            .iter()
            .enumerate()
            .map(|(index, &count)| LabelUsage {
                id: LabelId(index),
                count,
            })
            .collect();

        // sort_by is stable
        usage.sort_by(|a, b| b.count.cmp(&a.count));
        usage
    }

    /// References resolved to `id`, in document order.
    pub fn references_to(&self, id: LabelId) -> impl Iterator<Item = &Reference> {
        self.references.iter().filter(move |r| r.label == Some(id))
    }

    /// Labels with no resolved reference, in definition order.
    pub fn unused_labels(&self) -> impl Iterator<Item = &Label> {
        self.labels
            .iter()
            .zip(self.counts.iter())
            .filter(|&(_, &count)| count == 0)
            .map(|(label, _)| label)
    }

    /// References naming no known label.
    pub fn dangling_references(&self) -> impl Iterator<Item = &Reference> {
        self.references.iter().filter(|r| !r.is_resolved())
    }

    /// Labels whose name was already defined earlier in the set.
    ///
    /// References never resolve to these.
    pub fn duplicate_labels(&self) -> Vec<&Label> {
        let mut first_seen: HashMap<&str, usize> = HashMap::new();
        let mut duplicates = Vec::new();

        for (index, label) in self.labels.iter().enumerate() {
            if *first_seen.entry(label.name.as_str()).or_insert(index) != index {
                duplicates.push(label);
            }
        }

        duplicates
    }

    /// Summary statistics.
    pub fn stats(&self) -> LabelStats {
        let resolved = self.references.iter().filter(|r| r.is_resolved()).count();

        LabelStats {
            total_labels: self.labels.len(),
            unused_labels: self.counts.iter().filter(|&&c| c == 0).count(),
            duplicate_labels: self.duplicate_labels().len(),
            total_references: self.references.len(),
            resolved_references: resolved,
            dangling_references: self.references.len() - resolved,
        }
    }
}
