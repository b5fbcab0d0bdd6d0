use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A short excerpt of a conversation transcript.
///
/// Typed view used for sampling: `id` is normalized to a string and the other
/// fields are kept alongside. The snippets endpoint serves the raw entries
/// from [`parse_snippets_metadata`] instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snippet {
    #[serde(
        default,
        deserialize_with = "deserialize_snippet_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Snippet {
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            fields: Map::new(),
        }
    }
}

/// Ingestion has produced both string and numeric ids.
fn deserialize_snippet_id<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Parse the `snippets_metadata` column (read with a `::text` cast) into its
/// array entries, exactly as stored.
///
/// Accepts a JSON array, JSON `null`, an absent value, or a JSON string whose
/// content is itself the serialized array (rows written by the older
/// text-column variant).
pub fn parse_snippets_metadata(raw: Option<&str>) -> Result<Vec<Value>> {
    let raw = match raw.map(str::trim) {
        Some(text) if !text.is_empty() => text,
        _ => return Ok(Vec::new()),
    };

    let value: Value = serde_json::from_str(raw).context("snippets_metadata is not valid JSON")?;
    parse_value(value, true)
}

fn parse_value(value: Value, allow_nested_text: bool) -> Result<Vec<Value>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => Ok(items),
        Value::String(inner) if allow_nested_text => {
            if inner.trim().is_empty() {
                return Ok(Vec::new());
            }
            let nested: Value = serde_json::from_str(&inner)
                .context("snippets_metadata text is not valid JSON")?;
            parse_value(nested, false)
        }
        other => Err(anyhow::anyhow!(
            "snippets_metadata must be a JSON array, got {}",
            json_kind(&other)
        )),
    }
}

/// Typed view of `snippets_metadata` for sampling. Entries that are not
/// objects are skipped.
pub fn decode_snippets_metadata(raw: Option<&str>) -> Result<Vec<Snippet>> {
    Ok(parse_snippets_metadata(raw)?
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(_) => serde_json::from_value::<Snippet>(item).ok(),
            other => {
                tracing::warn!(entry = %other, "Skipping non-object snippet entry");
                None
            }
        })
        .collect())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Id of a raw entry for matching: strings as-is, numbers in decimal.
fn raw_snippet_id(entry: &Value) -> Option<String> {
    match entry.get("id")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Keep raw entries whose id is in `ids`; an empty filter keeps everything.
///
/// Kept entries are returned unchanged, in stored order.
pub fn filter_raw_snippets(entries: Vec<Value>, ids: &[String]) -> Vec<Value> {
    if ids.is_empty() {
        return entries;
    }
    entries
        .into_iter()
        .filter(|entry| raw_snippet_id(entry).is_some_and(|id| ids.contains(&id)))
        .collect()
}
