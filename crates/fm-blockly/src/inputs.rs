//! Input blocks: the literal values plugged into plugin parameters.

use core::str::FromStr;

use serde_json::Value;

use crate::error::SchemaError;
use crate::schema::{as_object, require, require_array, value_str};

/// Input block kinds produced by the block editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    MathNumber,
    NumberList,
    Text,
    TextList,
}

impl FromStr for InputKind {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "math_number" => Ok(InputKind::MathNumber),
            "number_list" => Ok(InputKind::NumberList),
            "text" => Ok(InputKind::Text),
            "text_list" => Ok(InputKind::TextList),
            other => Err(SchemaError::UnknownInputType {
                tag: other.to_string(),
            }),
        }
    }
}

/// Render an input block as the string handed to the plugin.
///
/// Lists are flattened to comma separated values.
pub fn process_input(value: &Value) -> Result<String, SchemaError> {
    let obj = as_object(value, "input")?;
    let kind: InputKind = value_str(require(obj, "block_type")?, "block_type")?.parse()?;

    match kind {
        InputKind::MathNumber => scalar(require(obj, "value")?, "value"),
        InputKind::Text => scalar(require(obj, "TEXT")?, "TEXT"),
        InputKind::NumberList | InputKind::TextList => {
            let items = require_array(obj, "containerList")?
                .iter()
                .map(process_input)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(items.join(","))
        }
    }
}

fn scalar(value: &Value, field: &str) -> Result<String, SchemaError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(SchemaError::invalid(field, "expected a literal")),
    }
}
