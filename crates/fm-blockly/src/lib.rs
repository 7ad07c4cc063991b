//! fm-blockly: translate block-editor machine documents into machine graphs.
//!
//! The translator reads configuration blocks (pumps, valves, containers),
//! assigns each block reference a node id, builds the typed nodes, and then
//! resolves the pin-to-pin wiring into graph edges, honoring declared port
//! directions. Valves that share an actuator are registered as twins.

pub mod builder;
pub mod connections;
pub mod error;
pub mod functions;
pub mod inputs;
pub mod model;
pub mod registry;
pub mod schema;
pub mod translator;
pub mod twins;

use std::path::Path;

pub use builder::DeviceKind;
pub use connections::{
    ConnectionResolver, DirectionRegistry, PendingConnections, PortDirections, TargetKey,
};
pub use error::{
    DirectionError, SchemaError, TranslationError, TranslationErrorKind, TranslationResult,
};
pub use inputs::InputKind;
pub use model::{MachineModel, ModelMapping};
pub use registry::ReferenceRegistry;
pub use schema::{BlockDef, MachineDocument, NumberField, ReferenceDef};
pub use translator::translate;
pub use twins::TwinCollector;

use error::Context;

fn load_frame(path: &Path) -> String {
    format!("load {}", path.display())
}

pub fn load_json(path: &Path) -> TranslationResult<MachineDocument> {
    let read = || -> TranslationResult<MachineDocument> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    };
    read().with_context(|| load_frame(path))
}

pub fn load_yaml(path: &Path) -> TranslationResult<MachineDocument> {
    let read = || -> TranslationResult<MachineDocument> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    };
    read().with_context(|| load_frame(path))
}

/// Load a document, choosing the format from the file extension.
pub fn load_document(path: &Path) -> TranslationResult<MachineDocument> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("json") => load_json(path),
        Some("yaml" | "yml") => load_yaml(path),
        other => Err(TranslationErrorKind::UnsupportedFormat(
            other.unwrap_or_default().to_string(),
        ))
        .with_context(|| load_frame(path)),
    }
}

/// Load and translate a document file.
pub fn translate_file(path: &Path) -> TranslationResult<(MachineModel, ModelMapping)> {
    let document = load_document(path)?;
    translate(&document)
}
