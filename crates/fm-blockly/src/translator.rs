//! Translation driver.

use fm_core::units::{self, VolumeRate};
use fm_graph::MachineGraph;
use tracing::info;

use crate::builder::build_node;
use crate::connections::{ConnectionResolver, DirectionRegistry, PendingConnections};
use crate::error::{Context, SchemaError, TranslationResult};
use crate::model::{MachineModel, ModelMapping};
use crate::registry::ReferenceRegistry;
use crate::schema::MachineDocument;
use crate::twins::TwinCollector;

/// State owned by one translation.
#[derive(Debug, Default)]
pub(crate) struct Translation {
    pub(crate) registry: ReferenceRegistry,
    pub(crate) pending: PendingConnections,
    pub(crate) directions: DirectionRegistry,
    pub(crate) twins: TwinCollector,
    pub(crate) graph: MachineGraph,
}

/// Machine-wide settings from the top of the document.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Settings {
    default_rate: VolumeRate,
    integer_precision: u32,
    decimal_precision: u32,
}

fn required<'a, T>(value: &'a Option<T>, field: &str) -> Result<&'a T, SchemaError> {
    value.as_ref().ok_or_else(|| SchemaError::missing(field))
}

impl Settings {
    fn from_document(document: &MachineDocument) -> Result<Self, SchemaError> {
        let rate = required(&document.default_rate, "default_rate")?;
        let volume_units = required(&document.default_rate_volume_units, "default_rate_volume_units")?;
        let time_units = required(&document.default_rate_time_units, "default_rate_time_units")?;
        let integer = required(&document.integer_precission, "integer_precission")?;
        let decimal = required(&document.decimal_precission, "decimal_precission")?;
        required(&document.connections, "connections")?;

        Ok(Self {
            default_rate: units::volume_rate(
                rate.real("default_rate")?,
                volume_units,
                time_units,
            )?,
            integer_precision: integer.count("integer_precission")?,
            decimal_precision: decimal.count("decimal_precission")?,
        })
    }
}

impl Translation {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn run(mut self, document: &MachineDocument) -> TranslationResult<(MachineModel, ModelMapping)> {
        let settings = Settings::from_document(document)?;
        let blocks = required(&document.connections, "connections")?;
        info!(blocks = blocks.len(), "translating machine document");

        for (index, block) in blocks.iter().enumerate() {
            build_node(&mut self, block).with_context(|| match &block.reference {
                Some(reference) => format!("block '{reference}'"),
                None => format!("block #{index}"),
            })?;
        }

        let pending = std::mem::take(&mut self.pending);
        let edges = ConnectionResolver::new(&mut self.graph, &self.directions, &self.registry, pending)
            .resolve_all()
            .context("resolve connections")?;
        let twins = self.twins.apply(&mut self.graph).context("apply twins")?;

        info!(
            nodes = self.graph.node_count(),
            edges,
            twins,
            directed = self.directions.len(),
            "machine graph built"
        );

        let model = MachineModel::new(
            self.graph,
            settings.default_rate,
            settings.integer_precision,
            settings.decimal_precision,
        );
        let mapping = ModelMapping::from_model(&model, &self.registry);
        Ok((model, mapping))
    }
}

/// Translate a machine document into a machine model and its mapping.
///
/// Each call starts from fresh registries; no state is shared between calls.
pub fn translate(document: &MachineDocument) -> TranslationResult<(MachineModel, ModelMapping)> {
    Translation::new().run(document).context("translate")
}
