//! Port trait implementation for `HttpLogSource`.
//!
//! Decodes the endpoint's payload into core [`LogEntry`] values and maps
//! internal errors onto [`LogSourceError`].

use async_trait::async_trait;
use serde_json::Value;
use tailsync_core::{LogEntry, LogSourceError, LogSourcePort, LogSourceResult, PageSize};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::client::HttpLogSource;
use crate::error::{HttpResult, HttpSourceError};
use crate::http::{HttpBackend, RawResponse};
use crate::url::build_logs_url;

/// Message used when an error response carries no `message` field.
const FALLBACK_ERROR_MESSAGE: &str = "Unexpected error";

// ============================================================================
// Error Mapping
// ============================================================================

/// Convert internal `HttpSourceError` to core `LogSourceError`.
pub(crate) fn map_error(err: HttpSourceError) -> LogSourceError {
    match err {
        HttpSourceError::ApiRequestFailed { status, message } => {
            LogSourceError::Status { status, message }
        }
        HttpSourceError::InvalidResponse { message } => LogSourceError::InvalidResponse { message },
        HttpSourceError::JsonParse(e) => LogSourceError::InvalidResponse {
            message: e.to_string(),
        },
        HttpSourceError::Network(e) => LogSourceError::Network {
            message: e.to_string(),
        },
        e @ (HttpSourceError::UnusableBaseUrl { .. }
        | HttpSourceError::EmptyServiceId
        | HttpSourceError::InvalidUrl { .. }) => LogSourceError::Configuration {
            message: e.to_string(),
        },
    }
}

// ============================================================================
// Payload Decoding
// ============================================================================

/// Decode a log endpoint response.
///
/// - Non-success status: error carrying the body's `message` field.
/// - JSON array: decoded entries, in server order.
/// - Any other JSON shape (including `null`): an empty page.
fn decode_page(response: &RawResponse) -> HttpResult<Vec<LogEntry>> {
    if !response.is_success() {
        let message = serde_json::from_str::<Value>(&response.body)
            .ok()
            .and_then(|json| {
                json.get("message")
                    .or_else(|| json.get("error"))
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());
        return Err(HttpSourceError::ApiRequestFailed {
            status: response.status,
            message,
        });
    }

    let json: Value = serde_json::from_str(&response.body)?;
    if json.is_array() {
        return Ok(serde_json::from_value(json)?);
    }

    debug!(kind = json_kind(&json), "Log payload is not an array, treating as empty");
    Ok(Vec::new())
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// Port Implementation
// ============================================================================

#[async_trait]
impl<B: HttpBackend> LogSourcePort for HttpLogSource<B> {
    async fn fetch(
        &self,
        cancel: &CancellationToken,
        service_id: &str,
        page_size: PageSize,
    ) -> LogSourceResult<Vec<LogEntry>> {
        if cancel.is_cancelled() {
            return Err(LogSourceError::Cancelled);
        }

        let url = build_logs_url(&self.base_url, &self.logs_path, service_id, page_size)
            .map_err(map_error)?;

        // Dropping the backend future aborts the underlying request
        let response = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(LogSourceError::Cancelled),
            response = self.backend.get(&url) => response.map_err(map_error)?,
        };

        decode_page(&response).map_err(map_error)
    }
}
