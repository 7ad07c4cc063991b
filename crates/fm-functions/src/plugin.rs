//! Plugin configuration shared by pump and valve functions.

use std::collections::BTreeMap;

use crate::error::{FunctionError, FunctionResult};

/// Name, plugin type and free-form parameters of a plugin-backed function.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PluginConfiguration {
    pub name: String,
    pub plugin_type: String,
    params: BTreeMap<String, String>,
}

impl PluginConfiguration {
    pub fn new(name: impl Into<String>, plugin_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            plugin_type: plugin_type.into(),
            params: BTreeMap::new(),
        }
    }

    /// Add a parameter; a name may only be set once.
    pub fn insert_param(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> FunctionResult<()> {
        let name = name.into();
        if self.params.contains_key(&name) {
            return Err(FunctionError::DuplicateParam { name });
        }
        self.params.insert(name, value.into());
        Ok(())
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }
}
