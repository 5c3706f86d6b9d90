use serde_json::Value;
use thiserror::Error;

/// Failures talking to the Resy API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, TLS, connect, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Resy returned status {status}{}", suffix(.message))]
    Status { status: u16, message: Option<String> },

    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

fn suffix(message: &Option<String>) -> String {
    message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
}

/// Extracts the string `message` field from a Resy error body.
///
/// Empty, non-JSON or differently shaped bodies yield `None`.
pub fn error_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
