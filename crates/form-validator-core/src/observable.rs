// File: form-validator-core/src/observable.rs
// Purpose: Dependency edges from observed elements to the targets they re-validate

use crate::dom::NodeId;
use std::collections::HashMap;

/// Maps an observable element to the targets its changes re-validate
///
/// Targets are kept in insertion order without duplicates.
#[derive(Debug, Clone, Default)]
pub struct ObservableGraph {
    edges: HashMap<NodeId, Vec<NodeId>>,
}

impl ObservableGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that changes to `observable` must re-validate `target`
    ///
    /// A target never observes itself: its own input already re-validates it.
    pub fn add(&mut self, target: NodeId, observable: NodeId) {
        if observable == target {
            return;
        }

        let targets = self.edges.entry(observable).or_default();
        if !targets.contains(&target) {
            targets.push(target);
        }
    }

    /// Targets depending on `observable`, empty if none
    pub fn targets_of(&self, observable: NodeId) -> &[NodeId] {
        self.edges
            .get(&observable)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_observed(&self, element: NodeId) -> bool {
        self.edges.contains_key(&element)
    }

    /// Total number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }
}
