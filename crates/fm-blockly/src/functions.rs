//! Function payload parsers: turn the `functions` / `extra_functions`
//! objects of a block into fm-functions value objects.

use fm_core::units::{self, Volume};
use fm_functions::{
    Function, FunctionKind, LightWorkingRange, MeasureFluorescenceWorkingRange, PinGroup,
    PluginConfiguration, PumpPluginFunction, PumpWorkingRange, TruthTable,
    ValvePluginRouteFunction, WorkingRange,
};
use serde_json::Value;

use crate::error::SchemaError;
use crate::inputs::process_input;
use crate::schema::{
    Fields, as_object, require, require_array, require_bool, require_count, require_real,
    require_str, value_integer, value_pin, value_real, value_str,
};

const FUNCTION_LIST: &str = "functions_list";

/// Plugin name, type and `name<i>` / `value<i>` parameters.
pub fn plugin_configuration(obj: &Fields) -> Result<PluginConfiguration, SchemaError> {
    let name = require_str(obj, "block_type")?;
    let plugin_type = require_str(obj, "type")?;
    let params = require_count(obj, "paramsNumber")?;

    let mut configuration = PluginConfiguration::new(name, plugin_type);
    for i in 0..params {
        let name_field = format!("name{i}");
        let value_field = format!("value{i}");
        let param = value_str(require(obj, &name_field)?, &name_field)?;
        let value = process_input(require(obj, &value_field)?)?;
        configuration.insert_param(param, value)?;
    }
    Ok(configuration)
}

/// Pump payload: plugin configuration, `reversible` flag and flow-rate range.
pub fn pump_function(payload: &Value) -> Result<PumpPluginFunction, SchemaError> {
    let obj = as_object(payload, "functions")?;
    let configuration = plugin_configuration(obj)?;
    let reversible = require_bool(obj, "reversible")?;

    let min = units::volume_rate(
        require_real(obj, "minRange")?,
        require_str(obj, "minRangeVolumeUnits")?,
        require_str(obj, "minRangeTimeUnits")?,
    )?;
    let max = units::volume_rate(
        require_real(obj, "maxRange")?,
        require_str(obj, "maxRangeVolumeUnits")?,
        require_str(obj, "maxRangeTimeUnits")?,
    )?;
    let range = PumpWorkingRange::new(min, max, "pump")?;

    Ok(PumpPluginFunction::new(configuration, range, reversible))
}

/// Valve payload: plugin configuration and `truthTable`.
pub fn valve_function(
    payload: &Value,
) -> Result<(ValvePluginRouteFunction, TruthTable), SchemaError> {
    let obj = as_object(payload, "functions")?;
    let configuration = plugin_configuration(obj)?;

    let mut table = TruthTable::new();
    for row in require_array(obj, "truthTable")? {
        let row = as_object(row, "truthTable")?;
        let position = value_integer(require(row, "position")?, "position")?;
        let groups = require_array(row, "connected_pins")?
            .iter()
            .map(pin_group)
            .collect::<Result<Vec<_>, _>>()?;
        table.insert(position, groups)?;
    }

    Ok((ValvePluginRouteFunction::new(configuration), table))
}

fn pin_group(value: &Value) -> Result<PinGroup, SchemaError> {
    value
        .as_array()
        .ok_or_else(|| SchemaError::invalid("connected_pins", "expected a list of pins"))?
        .iter()
        .map(|pin| value_pin(pin, "connected_pins"))
        .collect()
}

/// Container payload: `(min volume, capacity)`.
pub fn glassware(payload: &Value) -> Result<(Volume, Volume), SchemaError> {
    let obj = as_object(payload, "functions")?;
    let min = units::volume(
        require_real(obj, "minVolume")?,
        require_str(obj, "minVolumeUnits")?,
    )?;
    let max = units::volume(
        require_real(obj, "maxVolume")?,
        require_str(obj, "maxVolumeUnits")?,
    )?;
    WorkingRange::new(min, max, "glassware")?;
    Ok((min, max))
}

/// Instrument functions of a container.
///
/// Accepts a `functions_list` wrapper, a single function object, or
/// `null` / `{}` for none.
pub fn extra_functions(payload: &Value) -> Result<Vec<Function>, SchemaError> {
    let obj = match payload {
        Value::Null => return Ok(Vec::new()),
        other => as_object(other, "extra_functions")?,
    };
    if obj.is_empty() {
        return Ok(Vec::new());
    }

    let tag = require_str(obj, "type")?;
    if tag != FUNCTION_LIST {
        return Ok(vec![single_function(obj)?]);
    }

    require_array(obj, "functionsList")?
        .iter()
        .map(|item| single_function(as_object(item, "functionsList")?))
        .collect()
}

/// One instrument function, dispatched on its `type` tag.
pub fn single_function(obj: &Fields) -> Result<Function, SchemaError> {
    let tag = require_str(obj, "type")?;
    let kind: FunctionKind = tag.parse().map_err(|tag| SchemaError::UnknownFunctionType { tag })?;

    let function = match kind {
        FunctionKind::Electrophorer => {
            let min = units::electric_field(
                require_real(obj, "minRange")?,
                require_str(obj, "minRageEFieldUnits")?,
                require_str(obj, "minRageLengthUnits")?,
            )?;
            let max = units::electric_field(
                require_real(obj, "maxRange")?,
                require_str(obj, "maxRageEFieldUnits")?,
                require_str(obj, "maxRageLengthUnits")?,
            )?;
            Function::Electrophoresis(WorkingRange::new(min, max, "electrophorer")?)
        }
        FunctionKind::Light => Function::Light(LightWorkingRange {
            wavelength: bounded(obj, "Wavelength", "wavelength", units::length)?,
            intensity: bounded(obj, "Intensity", "intensity", units::luminous_intensity)?,
        }),
        FunctionKind::Heater => Function::Heat(bounded(obj, "Range", "heater", units::temperature)?),
        FunctionKind::FluorescenceSensor => {
            Function::MeasureFluorescence(MeasureFluorescenceWorkingRange {
                emission: bounded(obj, "Emission", "emission", units::length)?,
                excitation: bounded(obj, "Excitation", "excitation", units::length)?,
            })
        }
        FunctionKind::OdSensor => Function::MeasureOd(bounded(obj, "Range", "od sensor", units::length)?),
        FunctionKind::LuminiscenceSensor => Function::MeasureLuminiscence,
        FunctionKind::VolumeSensor => Function::MeasureVolume,
        FunctionKind::TemperatureSensor => Function::MeasureTemperature,
        FunctionKind::Stirer => Function::Stir(bounded(obj, "Range", "stirer", units::frequency)?),
        FunctionKind::Shaker => Function::Shake(bounded(obj, "Range", "shaker", units::frequency)?),
        FunctionKind::Centrifugator => {
            Function::Centrifugate(bounded(obj, "Range", "centrifugator", units::frequency)?)
        }
    };
    Ok(function)
}

/// Read `min<Suffix>`, `min<Suffix>Units`, `max<Suffix>`, `max<Suffix>Units`.
fn bounded<Q, F>(
    obj: &Fields,
    suffix: &'static str,
    what: &'static str,
    build: F,
) -> Result<WorkingRange<Q>, SchemaError>
where
    Q: PartialOrd + Copy + core::fmt::Debug,
    F: Fn(f64, &str) -> fm_core::FmResult<Q>,
{
    let read = |bound: &str| -> Result<Q, SchemaError> {
        let value_field = format!("{bound}{suffix}");
        let units_field = format!("{value_field}Units");
        let value = value_real(require(obj, &value_field)?, what)?;
        Ok(build(value, require_str(obj, &units_field)?)?)
    };
    let min = read("min")?;
    let max = read("max")?;
    Ok(WorkingRange::new(min, max, what)?)
}
