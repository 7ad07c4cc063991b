//! fm-functions: function value objects attached to machine devices.
//!
//! Provides:
//! - Plugin-backed pump and valve functions (`PumpPluginFunction`,
//!   `ValvePluginRouteFunction`) with their plugin configuration
//! - Valve truth tables
//! - Instrument functions for containers (heaters, stirrers, sensors, ...)
//! - Working ranges over uom quantities
//!
//! # Example
//!
//! ```
//! use fm_functions::{PluginConfiguration, PumpPluginFunction, PumpDirection, PumpWorkingRange};
//! use fm_core::units::ml_per_s;
//!
//! let range = PumpWorkingRange::new(ml_per_s(0.01), ml_per_s(1.0), "pump").unwrap();
//! let pump = PumpPluginFunction::new(PluginConfiguration::new("pump", "Evoprog"), range, false);
//! assert_eq!(pump.direction(), PumpDirection::Unidirectional);
//! ```

pub mod error;
pub mod function;
pub mod plugin;
pub mod pump;
pub mod range;
pub mod traits;
pub mod valve;

// Re-exports
pub use error::{FunctionError, FunctionResult};
pub use function::{Function, FunctionKind};
pub use plugin::PluginConfiguration;
pub use pump::{PumpDirection, PumpPluginFunction};
pub use range::{
    CentrifugationWorkingRange, ElectrophoresisWorkingRange, HeaterWorkingRange,
    LightWorkingRange, MeasureFluorescenceWorkingRange, MeasureOdWorkingRange, PumpWorkingRange,
    ShakeWorkingRange, StirWorkingRange, WorkingRange,
};
pub use traits::PluginFunction;
pub use valve::{PinGroup, TruthTable, ValvePluginRouteFunction};
