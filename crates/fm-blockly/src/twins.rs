//! Valves sharing one actuator.

use std::collections::BTreeSet;

use fm_core::NodeId;
use fm_graph::{GraphResult, MachineGraph};

/// Twin groups collected while reading valve blocks.
///
/// Overlapping groups are merged, so two valves naming each other produce a
/// single group.
#[derive(Debug, Clone, Default)]
pub struct TwinCollector {
    groups: Vec<BTreeSet<NodeId>>,
}

impl TwinCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, group: BTreeSet<NodeId>) {
        let mut merged = group;
        self.groups.retain(|existing| {
            if existing.is_disjoint(&merged) {
                true
            } else {
                merged.extend(existing.iter().copied());
                false
            }
        });
        self.groups.push(merged);
    }

    pub fn groups(&self) -> &[BTreeSet<NodeId>] {
        &self.groups
    }

    /// Register every group with the graph. Groups of one valve carry no
    /// information and are skipped.
    pub fn apply(&self, graph: &mut MachineGraph) -> GraphResult<usize> {
        let mut applied = 0;
        for group in self.groups.iter().filter(|g| g.len() > 1) {
            graph.set_valves_as_twins(group)?;
            applied += 1;
        }
        Ok(applied)
    }
}
