//! Pump plugin function.

use crate::plugin::PluginConfiguration;
use crate::range::PumpWorkingRange;
use crate::traits::PluginFunction;

/// Flow direction capability of a pump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PumpDirection {
    /// Liquid only moves from the in-port to the out-port.
    Unidirectional,
    /// The pump can reverse.
    Bidirectional,
}

impl PumpDirection {
    pub fn from_reversible(reversible: bool) -> Self {
        if reversible {
            Self::Bidirectional
        } else {
            Self::Unidirectional
        }
    }
}

/// Pump driven by a hardware plugin within a flow-rate working range.
#[derive(Debug, Clone, PartialEq)]
pub struct PumpPluginFunction {
    configuration: PluginConfiguration,
    /// Flow rates the pump can deliver.
    pub working_range: PumpWorkingRange,
    /// Whether the pump can run in reverse.
    pub reversible: bool,
}

impl PumpPluginFunction {
    pub fn new(
        configuration: PluginConfiguration,
        working_range: PumpWorkingRange,
        reversible: bool,
    ) -> Self {
        Self {
            configuration,
            working_range,
            reversible,
        }
    }

    pub fn direction(&self) -> PumpDirection {
        PumpDirection::from_reversible(self.reversible)
    }
}

impl PluginFunction for PumpPluginFunction {
    fn configuration(&self) -> &PluginConfiguration {
        &self.configuration
    }
}
