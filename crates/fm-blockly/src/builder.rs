//! Node classifier and builder: one configuration block to one graph node,
//! plus its pending connections, port directions and twins.

use core::str::FromStr;
use std::collections::BTreeSet;

use fm_core::{NodeId, PortIndex};
use fm_graph::{ContainerKind, ContainerNode, Node, PumpNode, ValveNode};
use serde_json::Value;
use tracing::debug;

use crate::connections::PortDirections;
use crate::error::{Context, SchemaError, TranslationResult};
use crate::functions;
use crate::schema::{BlockDef, Fields, NumberField, ReferenceDef, value_count};
use crate::translator::Translation;

/// Device kinds a configuration block can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    OpenContainer,
    CloseContainer,
    Pump,
    Valve,
}

impl DeviceKind {
    pub const ALL: [DeviceKind; 4] = [
        DeviceKind::OpenContainer,
        DeviceKind::CloseContainer,
        DeviceKind::Pump,
        DeviceKind::Valve,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            DeviceKind::OpenContainer => "OPEN_CONTAINER",
            DeviceKind::CloseContainer => "CLOSE_CONTAINER",
            DeviceKind::Pump => "PUMP",
            DeviceKind::Valve => "VALVE",
        }
    }
}

impl FromStr for DeviceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DeviceKind::ALL
            .into_iter()
            .find(|kind| kind.tag() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Build the node for `block` and record everything it declares.
pub(crate) fn build_node(state: &mut Translation, block: &BlockDef) -> TranslationResult<NodeId> {
    let reference = block
        .reference
        .as_deref()
        .ok_or_else(|| SchemaError::missing("reference"))?;
    let missing = |field: &str| SchemaError::MissingField {
        block: Some(reference.to_string()),
        field: field.to_string(),
    };

    let tag = block.kind.as_deref().ok_or_else(|| missing("type"))?;
    let payload = block.functions.as_ref().ok_or_else(|| missing("functions"))?;
    let pins = block
        .number_pins
        .as_ref()
        .ok_or_else(|| missing("number_pins"))?
        .count("number_pins")?;
    if pins < 1 {
        return Err(SchemaError::invalid("number_pins", "a block needs at least one pin").into());
    }
    let port_count = pins as PortIndex;

    let kind: DeviceKind = tag.parse().map_err(|tag| SchemaError::UnknownNodeType {
        block: reference.to_string(),
        tag,
    })?;

    let id = state.registry.resolve(reference);
    if state.graph.node(id).is_some() {
        return Err(SchemaError::DuplicateReference {
            reference: reference.to_string(),
        }
        .into());
    }
    debug!(reference, kind = kind.tag(), %id, pins, "building node");

    let node = match kind {
        DeviceKind::OpenContainer | DeviceKind::CloseContainer => {
            let extra = block
                .extra_functions
                .as_ref()
                .ok_or_else(|| missing("extra_functions"))?;
            let container_kind = if kind == DeviceKind::OpenContainer {
                ContainerKind::Open
            } else {
                ContainerKind::Closed
            };
            Node::Container(container_node(id, port_count, container_kind, payload, extra)?)
        }
        DeviceKind::Pump => Node::Pump(pump_node(id, port_count, payload)?),
        DeviceKind::Valve => Node::Valve(valve_node(id, port_count, payload)?),
    };
    state.graph.add_node(node)?;

    if kind == DeviceKind::Valve {
        collect_twins(state, id, reference, block, payload).context("twins")?;
    }
    declare_directions(state, id, reference, port_count, block)?;
    record_ports(state, id, reference, port_count, block)?;
    Ok(id)
}

fn container_node(
    id: NodeId,
    port_count: PortIndex,
    kind: ContainerKind,
    payload: &Value,
    extra: &Value,
) -> TranslationResult<ContainerNode> {
    let (min_volume, capacity) = functions::glassware(payload).context("functions")?;
    let mut node = ContainerNode::new(id, port_count, kind, min_volume, capacity);
    for function in functions::extra_functions(extra).context("extra_functions")? {
        node.add_function(function);
    }
    Ok(node)
}

fn pump_node(id: NodeId, port_count: PortIndex, payload: &Value) -> TranslationResult<PumpNode> {
    let function = functions::pump_function(payload).context("functions")?;
    Ok(PumpNode {
        id,
        port_count,
        direction: function.direction(),
        function,
    })
}

fn valve_node(id: NodeId, port_count: PortIndex, payload: &Value) -> TranslationResult<ValveNode> {
    let (function, truth_table) = functions::valve_function(payload).context("functions")?;
    Ok(ValveNode {
        id,
        port_count,
        truth_table,
        function,
    })
}

/// `number_twins` and `twin<i>` live in the valve payload; older documents
/// put them on the block itself.
fn twin_fields<'a>(block: &'a BlockDef, payload: &'a Value) -> Option<(&'a Fields, &'a Value)> {
    if let Some(obj) = payload.as_object() {
        if let Some(count) = obj.get("number_twins") {
            return Some((obj, count));
        }
    }
    block
        .fields
        .get("number_twins")
        .map(|count| (&block.fields, count))
}

fn collect_twins(
    state: &mut Translation,
    id: NodeId,
    reference: &str,
    block: &BlockDef,
    payload: &Value,
) -> Result<(), SchemaError> {
    let Some((fields, count)) = twin_fields(block, payload) else {
        return Ok(());
    };
    let count = value_count(count, "number_twins")?;

    let mut group = BTreeSet::from([id]);
    for i in 1..=count {
        let field = format!("twin{i}");
        let value = fields.get(&field).ok_or_else(|| SchemaError::MissingField {
            block: Some(reference.to_string()),
            field: field.clone(),
        })?;
        let key = state
            .registry
            .resolve_target(&ReferenceDef::from_value(value, &field)?);
        group.insert(key.node);
    }

    debug!(reference, twins = group.len() - 1, "twin valves");
    state.twins.add(group);
    Ok(())
}

fn port_list(
    ports: &[NumberField],
    field: &'static str,
    reference: &str,
    port_count: PortIndex,
) -> Result<BTreeSet<PortIndex>, SchemaError> {
    let mut out = BTreeSet::new();
    for port in ports {
        let number = port.count(field)? as PortIndex;
        if number < 1 || number > port_count {
            return Err(SchemaError::InvalidPortList {
                block: reference.to_string(),
                reason: format!("{field} names port {number}, expected 1..={port_count}"),
            });
        }
        out.insert(number - 1);
    }
    Ok(out)
}

fn declare_directions(
    state: &mut Translation,
    id: NodeId,
    reference: &str,
    port_count: PortIndex,
    block: &BlockDef,
) -> TranslationResult<()> {
    let (ins, outs) = match (&block.in_ports, &block.out_ports) {
        (None, None) => return Ok(()),
        (Some(ins), Some(outs)) => (ins, outs),
        (Some(_), None) | (None, Some(_)) => {
            let field = if block.in_ports.is_none() { "in_ports" } else { "out_ports" };
            return Err(SchemaError::MissingField {
                block: Some(reference.to_string()),
                field: field.to_string(),
            }
            .into());
        }
    };

    let directions = PortDirections {
        ins: port_list(ins, "in_ports", reference, port_count)?,
        outs: port_list(outs, "out_ports", reference, port_count)?,
    };
    if let Some(port) = directions.ins.intersection(&directions.outs).next() {
        return Err(SchemaError::InvalidPortList {
            block: reference.to_string(),
            reason: format!("port {} is both in and out", port + 1),
        }
        .into());
    }

    debug!(reference, ins = ?directions.ins, outs = ?directions.outs, "port directions");
    state.directions.register(id, reference, directions)?;
    Ok(())
}

fn record_ports(
    state: &mut Translation,
    id: NodeId,
    reference: &str,
    port_count: PortIndex,
    block: &BlockDef,
) -> Result<(), SchemaError> {
    for i in 1..=port_count {
        let field = format!("port{i}");
        let value = block
            .fields
            .get(&field)
            .ok_or_else(|| SchemaError::MissingPort {
                block: reference.to_string(),
                port: field.clone(),
            })?;
        let key = state
            .registry
            .resolve_target(&ReferenceDef::from_value(value, &field)?);
        if state.pending.insert(id, key, i - 1).is_some() {
            return Err(SchemaError::DuplicateConnection {
                block: reference.to_string(),
                target: state.registry.display(key.node),
            });
        }
    }
    Ok(())
}
