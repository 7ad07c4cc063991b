//! Core traits for functions bound to hardware plugins.

use crate::plugin::PluginConfiguration;

/// A function whose behavior is provided by a hardware plugin.
///
/// The translator only records which plugin a device needs and with which
/// parameters; binding to a concrete driver happens in a later stage.
pub trait PluginFunction: Send + Sync {
    /// Plugin configuration captured from the block payload.
    fn configuration(&self) -> &PluginConfiguration;

    /// Block type name the plugin was configured from.
    fn name(&self) -> &str {
        &self.configuration().name
    }

    /// Plugin type used to pick the driver.
    fn plugin_type(&self) -> &str {
        &self.configuration().plugin_type
    }
}
