pub mod xml_utils;

use domain_types::{errors, router_response_types::ResponseParams};
use error_stack::{Report, ResultExt};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub use domain_types::utils::convert_amount;

type Error = Report<errors::ConnectorError>;

pub fn serialize_to_xml_string_with_root<T: Serialize>(
    root_name: &str,
    data: &T,
) -> Result<String, Error> {
    let xml_content = quick_xml::se::to_string_with_root(root_name, data)
        .change_context(errors::ConnectorError::RequestEncodingFailed)
        .attach_printable("Failed to serialize XML with root")?;

    let full_xml = format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>{xml_content}");
    Ok(full_xml)
}

fn diagnostic(message: String) -> ResponseParams {
    let mut params = ResponseParams::new();
    params.insert("message".to_string(), Value::String(message));
    params
}

/// Decodes a JSON object body. Anything that is not a JSON object degrades to a mapping holding
/// a single diagnostic `message`, so a garbled body still classifies as a failure.
pub fn parse_json_params(body: &[u8], connector_label: &str) -> ResponseParams {
    if body.iter().all(u8::is_ascii_whitespace) {
        return ResponseParams::new();
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(params)) => params,
        _ => {
            tracing::warn!(connector = connector_label, "received a non-JSON response");
            diagnostic(format!(
                "A non-JSON response was received from {connector_label} where one was expected. \
                 The raw response was:\n\n{}",
                String::from_utf8_lossy(body)
            ))
        }
    }
}

/// Flattens an XML body into a single-level mapping, see [`xml_utils::flatten_tag_tree`].
pub fn parse_xml_params(body: &[u8], connector_label: &str) -> ResponseParams {
    let raw = String::from_utf8_lossy(body);
    match xml_utils::flatten_tag_tree(&raw) {
        Ok(params) => params,
        Err(error) => {
            tracing::warn!(connector = connector_label, %error, "received a non-XML response");
            diagnostic(format!(
                "A non-XML response was received from {connector_label} where one was expected. \
                 The raw response was:\n\n{raw}"
            ))
        }
    }
}

/// Reads a response field as text. Numbers are rendered, `null` and containers are absent.
pub fn get_param_as_string(params: &ResponseParams, key: &str) -> Option<String> {
    params.get(key).and_then(value_as_string)
}

fn value_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(value) => Some(value.clone()),
        Value::Number(value) => Some(value.to_string()),
        Value::Bool(value) => Some(value.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// A field whose value does not have the expected shape reads as absent, leaving the rest of
/// the response intact. Use with `#[serde(default, deserialize_with = "..")]`.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Like [`lenient`], but numbers and booleans are rendered as text.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_as_string(&Value::deserialize(deserializer)?))
}

/// Like [`lenient`], but numeric strings are accepted.
pub fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    })
}

/// Splits a delimited reference into exactly `N` positional segments. Missing trailing segments
/// and empty segments both come back as `None`.
pub fn split_reference<const N: usize>(reference: &str, delimiter: char) -> [Option<String>; N] {
    let mut segments = reference.split(delimiter);
    std::array::from_fn(|_| {
        segments
            .next()
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
    })
}

/// Joins positional segments, writing absent ones as empty strings so positions are preserved.
pub fn join_reference(segments: &[Option<&str>], delimiter: char) -> String {
    segments
        .iter()
        .map(|segment| segment.unwrap_or_default())
        .collect::<Vec<_>>()
        .join(&delimiter.to_string())
}
