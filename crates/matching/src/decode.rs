//! Lenient field decoders.
//!
//! Persisted sightings are not always well formed: tags may have been stored
//! as a JSON string, timestamps come in several shapes. A bad field decodes
//! as empty instead of failing the whole record.

use crate::VisualTag;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Visual tags from an array or a JSON-encoded array string. Elements that
/// are not tags are skipped.
pub(crate) fn lenient_tags<'de, D>(deserializer: D) -> Result<Vec<VisualTag>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.map(tags_from_value).unwrap_or_default())
}

fn tags_from_value(value: Value) -> Vec<VisualTag> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        Value::String(encoded) => match serde_json::from_str::<Value>(&encoded) {
            Ok(inner @ Value::Array(_)) => tags_from_value(inner),
            _ => {
                tracing::debug!("Discarding malformed encoded tag list");
                Vec::new()
            }
        },
        _ => Vec::new(),
    }
}

/// Creation time from an RFC 3339 string, epoch milliseconds, or a
/// `{seconds, nanoseconds}` object.
pub(crate) fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| timestamp_from_value(&v)))
}

fn timestamp_from_value(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(text) => DateTime::parse_from_rfc3339(text)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
            .and_then(DateTime::from_timestamp_millis),
        Value::Object(map) => {
            let seconds = map
                .get("seconds")
                .or_else(|| map.get("_seconds"))
                .and_then(Value::as_i64)?;
            let nanos = map
                .get("nanoseconds")
                .or_else(|| map.get("_nanoseconds"))
                .and_then(Value::as_u64)
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(0);
            DateTime::from_timestamp(seconds, nanos)
        }
        _ => None,
    }
}
