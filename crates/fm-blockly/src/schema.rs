//! Document schema: the JSON (or YAML) emitted by the block editor.
//!
//! Top-level and block fields the translator always needs are typed.
//! Function payloads and the numbered `port<i>` / `twin<i>` fields are kept
//! as `serde_json::Value` and read by the block parsers.

use fm_core::numeric::{parse_count, parse_real, real_to_count};
use fm_core::{PortIndex, Real};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::SchemaError;

/// Free-form JSON object.
pub type Fields = Map<String, Value>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MachineDocument {
    #[serde(default)]
    pub default_rate: Option<NumberField>,
    #[serde(default)]
    pub default_rate_volume_units: Option<String>,
    #[serde(default)]
    pub default_rate_time_units: Option<String>,
    #[serde(default)]
    pub integer_precission: Option<NumberField>,
    #[serde(default)]
    pub decimal_precission: Option<NumberField>,
    #[serde(default)]
    pub connections: Option<Vec<BlockDef>>,
}

/// One configuration block of the machine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BlockDef {
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub functions: Option<Value>,
    #[serde(default)]
    pub number_pins: Option<NumberField>,
    /// `null` is a valid payload here (no extra functions), distinct from absent.
    #[serde(default, deserialize_with = "present")]
    pub extra_functions: Option<Value>,
    #[serde(default)]
    pub in_ports: Option<Vec<NumberField>>,
    #[serde(default)]
    pub out_ports: Option<Vec<NumberField>>,
    /// `port<i>`, `number_twins`, `twin<i>` and anything else.
    #[serde(flatten)]
    pub fields: Fields,
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

/// A number written either as a JSON number or as a numeric string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum NumberField {
    Number(Real),
    Text(String),
}

impl NumberField {
    pub fn real(&self, what: &'static str) -> Result<Real, SchemaError> {
        match self {
            NumberField::Number(v) => Ok(fm_core::ensure_finite(*v, what)?),
            NumberField::Text(text) => Ok(parse_real(text, what)?),
        }
    }

    pub fn count(&self, what: &'static str) -> Result<u32, SchemaError> {
        match self {
            NumberField::Number(v) => Ok(real_to_count(*v, what)?),
            NumberField::Text(text) => Ok(parse_count(text, what)?),
        }
    }
}

impl From<Real> for NumberField {
    fn from(v: Real) -> Self {
        NumberField::Number(v)
    }
}

/// Reference to another block, possibly through copy wrappers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ReferenceDef {
    Direct { reference: String },
    Copy { copy: Box<ReferenceDef> },
}

impl ReferenceDef {
    /// Parse the reference object stored in `field`.
    pub fn from_value(value: &Value, field: &str) -> Result<Self, SchemaError> {
        ReferenceDef::deserialize(value).map_err(|_| SchemaError::InvalidReference {
            field: field.to_string(),
        })
    }
}

pub(crate) fn require<'a>(obj: &'a Fields, field: &str) -> Result<&'a Value, SchemaError> {
    obj.get(field).ok_or_else(|| SchemaError::missing(field))
}

pub(crate) fn as_object<'a>(value: &'a Value, field: &str) -> Result<&'a Fields, SchemaError> {
    value
        .as_object()
        .ok_or_else(|| SchemaError::invalid(field, "expected an object"))
}

pub(crate) fn value_str<'a>(value: &'a Value, field: &str) -> Result<&'a str, SchemaError> {
    value
        .as_str()
        .ok_or_else(|| SchemaError::invalid(field, "expected a string"))
}

pub(crate) fn require_str<'a>(obj: &'a Fields, field: &str) -> Result<&'a str, SchemaError> {
    value_str(require(obj, field)?, field)
}

pub(crate) fn value_real(value: &Value, what: &'static str) -> Result<Real, SchemaError> {
    match value {
        Value::Number(n) => match n.as_f64() {
            Some(v) => NumberField::Number(v).real(what),
            None => Err(SchemaError::invalid(what, "number out of range")),
        },
        Value::String(text) => Ok(parse_real(text, what)?),
        _ => Err(SchemaError::invalid(what, "expected a number")),
    }
}

pub(crate) fn require_real(obj: &Fields, field: &'static str) -> Result<Real, SchemaError> {
    value_real(require(obj, field)?, field)
}

pub(crate) fn value_count(value: &Value, what: &'static str) -> Result<u32, SchemaError> {
    match value {
        Value::String(text) => Ok(parse_count(text, what)?),
        other => Ok(real_to_count(value_real(other, what)?, what)?),
    }
}

pub(crate) fn require_count(obj: &Fields, field: &'static str) -> Result<u32, SchemaError> {
    value_count(require(obj, field)?, field)
}

pub(crate) fn value_pin(value: &Value, what: &'static str) -> Result<PortIndex, SchemaError> {
    value_count(value, what).map(|v| v as PortIndex)
}

/// Integral value that may be negative (valve positions).
pub(crate) fn value_integer(value: &Value, what: &'static str) -> Result<i64, SchemaError> {
    if let Some(v) = value.as_i64() {
        return Ok(v);
    }
    let real = value_real(value, what)?;
    if real.fract() != 0.0 || real.abs() > i64::MAX as Real {
        return Err(SchemaError::invalid(what, format!("{real} is not an integer")));
    }
    Ok(real as i64)
}

pub(crate) fn require_bool(obj: &Fields, field: &str) -> Result<bool, SchemaError> {
    match require(obj, field)? {
        Value::Bool(b) => Ok(*b),
        Value::String(s) if s == "true" => Ok(true),
        Value::String(s) if s == "false" => Ok(false),
        _ => Err(SchemaError::invalid(field, "expected a boolean")),
    }
}

pub(crate) fn require_array<'a>(obj: &'a Fields, field: &str) -> Result<&'a [Value], SchemaError> {
    require(obj, field)?
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| SchemaError::invalid(field, "expected a list"))
}
