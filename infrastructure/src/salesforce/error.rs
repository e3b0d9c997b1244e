//! Mapping of HTTP failures onto [`ConnectionError`]
//!
//! The REST and Tooling APIs report failures as a JSON array:
//!
//! ```json
//! [{"message": "No such column 'Foo'", "errorCode": "INVALID_FIELD", "fields": []}]
//! ```
//!
//! The OAuth endpoint uses `{"error": "...", "error_description": "..."}`.

use serde::Deserialize;
use serde_json::Value;
use sfmcp_application::ConnectionError;
use sfmcp_domain::RecordError;

#[derive(Debug, Deserialize)]
struct OAuthError {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Every error entry in a REST error body
pub fn record_errors(body: &Value) -> Vec<RecordError> {
    let entries = match body {
        Value::Array(items) => items.clone(),
        Value::Object(_) => vec![body.clone()],
        _ => Vec::new(),
    };
    entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<RecordError>(entry).ok())
        .collect()
}

/// Turn a non-success response into a connection error
///
/// The first entry's `errorCode` becomes the error class; without one the
/// HTTP status is used.
pub fn api_error(status: u16, body: &str) -> ConnectionError {
    let parsed: Value = serde_json::from_str(body).unwrap_or(Value::Null);

    if let Some(first) = record_errors(&parsed).into_iter().next() {
        let code = first
            .status_code
            .clone()
            .unwrap_or_else(|| format!("HTTP_{}", status));
        return ConnectionError::api(code, first.message);
    }

    if let Ok(oauth) = serde_json::from_value::<OAuthError>(parsed) {
        let message = oauth.error_description.unwrap_or_else(|| oauth.error.clone());
        return ConnectionError::Auth(format!("{}: {}", oauth.error, message));
    }

    let snippet: String = body.chars().take(200).collect();
    ConnectionError::api(format!("HTTP_{}", status), snippet)
}

pub fn transport(err: reqwest::Error) -> ConnectionError {
    if err.is_timeout() {
        ConnectionError::Transport(format!("request timed out: {}", err))
    } else {
        ConnectionError::Transport(err.to_string())
    }
}

pub fn decode(what: &str, err: impl std::fmt::Display) -> ConnectionError {
    ConnectionError::Decode(format!("{}: {}", what, err))
}
