//! Valve route plugin function and its truth table.

use std::collections::{BTreeMap, BTreeSet};

use fm_core::PortIndex;

use crate::error::{FunctionError, FunctionResult};
use crate::plugin::PluginConfiguration;
use crate::traits::PluginFunction;

/// Pins joined together at one valve position.
pub type PinGroup = BTreeSet<PortIndex>;

/// Mapping from valve position to the groups of pins it connects.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TruthTable {
    rows: BTreeMap<i64, Vec<PinGroup>>,
}

impl TruthTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the pin groups for a position; each position may appear once.
    pub fn insert(&mut self, position: i64, groups: Vec<PinGroup>) -> FunctionResult<()> {
        if self.rows.contains_key(&position) {
            return Err(FunctionError::DuplicatePosition { position });
        }
        self.rows.insert(position, groups);
        Ok(())
    }

    pub fn position(&self, position: i64) -> Option<&[PinGroup]> {
        self.rows.get(&position).map(Vec::as_slice)
    }

    pub fn positions(&self) -> impl Iterator<Item = i64> + '_ {
        self.rows.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Highest pin mentioned anywhere in the table.
    pub fn max_pin(&self) -> Option<PortIndex> {
        self.rows
            .values()
            .flat_map(|groups| groups.iter())
            .filter_map(|group| group.last().copied())
            .max()
    }
}

/// Routing valve driven by a hardware plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValvePluginRouteFunction {
    configuration: PluginConfiguration,
}

impl ValvePluginRouteFunction {
    pub fn new(configuration: PluginConfiguration) -> Self {
        Self { configuration }
    }
}

impl PluginFunction for ValvePluginRouteFunction {
    fn configuration(&self) -> &PluginConfiguration {
        &self.configuration
    }
}
