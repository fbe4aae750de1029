use crate::error::{ClientError, Result};
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Keys that never name a form field in an error body.
const NON_FIELD_KEYS: [&str; 7] = ["error", "detail", "message", "non_field_errors", "data", "isSuccess", "code"];

/// Decodes a response into `T`, or into a [`ClientError::Http`] carrying the
/// backend's message (or `fallback` when the body offers none).
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response, fallback: &str) -> Result<T> {
    let status = response.status();
    let bytes = response.bytes().await.map_err(ClientError::Network)?;

    if !status.is_success() {
        return Err(http_error(status.as_u16(), &bytes, fallback));
    }

    let body = if bytes.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).map_err(ClientError::Decode)?
    };

    serde_json::from_value(unwrap_success(body)).map_err(ClientError::Decode)
}

/// Like [`read_json`] for endpoints whose success body is irrelevant.
pub(crate) async fn read_empty(response: Response, fallback: &str) -> Result<()> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let bytes = response.bytes().await.map_err(ClientError::Network)?;
    Err(http_error(status.as_u16(), &bytes, fallback))
}

fn http_error(status: u16, bytes: &[u8], fallback: &str) -> ClientError {
    let body = serde_json::from_slice::<Value>(bytes).unwrap_or(Value::Null);
    let message = extract_error_message(&body, fallback);
    tracing::debug!(status, message = %message, "request rejected");
    ClientError::Http { status, message }
}

/// Strips the `{data, error, isSuccess}` wrapper some backend renderers add.
fn unwrap_success(body: Value) -> Value {
    match body {
        Value::Object(mut map) if map.contains_key("isSuccess") && map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Picks the most specific human-readable message out of an error body.
///
/// Precedence: a wrapped `error` object, `detail`, `message`, the first
/// `non_field_errors` entry, the first field-level error as `field: message`,
/// a bare string body, and finally `fallback`.
#[must_use]
pub fn extract_error_message(body: &Value, fallback: &str) -> String {
    message_from(body).unwrap_or_else(|| fallback.to_string())
}

fn message_from(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => {
            let text = text.trim();
            (!text.is_empty()).then(|| text.to_string())
        }
        Value::Array(items) => items.iter().find_map(message_from),
        Value::Object(map) => message_from_object(map),
        _ => None,
    }
}

fn message_from_object(map: &Map<String, Value>) -> Option<String> {
    ["error", "detail", "message", "non_field_errors"]
        .iter()
        .find_map(|key| map.get(*key).and_then(message_from))
        .or_else(|| {
            map.iter()
                .filter(|(field, _)| !NON_FIELD_KEYS.contains(&field.as_str()))
                .find_map(|(field, errors)| message_from(errors).map(|message| format!("{field}: {message}")))
        })
}
