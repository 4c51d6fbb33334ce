//! Shared serialization utilities.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Deserialize an optional amount in minor units.
///
/// The upstream sends integers, but floats (`1250.0`) and numeric strings
/// show up on some aggregate endpoints; they are rounded to whole cents.
/// Anything else is treated as absent rather than failing the record.
pub fn minor_units<'de, D>(d: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(d)?;
    Ok(value.as_ref().and_then(value_as_i64))
}

/// Deserialize an optional count or id that may arrive as a number or string.
pub fn lenient_u64<'de, D>(d: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(d)?;
    Ok(value
        .as_ref()
        .and_then(value_as_i64)
        .and_then(|n| u64::try_from(n).ok()))
}

/// Deserialize any scalar into its textual form; null and containers are absent.
pub fn lenient_string<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(d)?;
    Ok(value.as_ref().and_then(scalar_to_string))
}

fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.round() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f.round() as i64))
        }
        _ => None,
    }
}

pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Tool parameters are string-typed. Hosts occasionally send `5` or `true`
/// where `"5"` or `"true"` is declared; convert scalars so the typed
/// argument structs still bind. Null becomes absent.
pub fn stringify_arguments(arguments: Map<String, Value>) -> Map<String, Value> {
    arguments
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::Null => None,
            Value::Array(_) | Value::Object(_) => Some((key, value)),
            scalar => scalar_to_string(&scalar).map(|s| (key, Value::String(s))),
        })
        .collect()
}
