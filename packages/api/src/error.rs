//! Error taxonomy for calls to the backend.
//!
//! Three families matter to the views: the credential is missing or was
//! rejected (redirect to login), the network failed (transient notice), or
//! the server refused the request (transient notice, with the server's own
//! wording when it sent any).

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("no session credential is stored")]
    MissingCredential,
    #[error("credential rejected by the server (status {status})")]
    Unauthorized { status: u16 },
    #[error("request rejected with status {status}")]
    Rejected { status: u16, body: Value },
    #[error("network failure: {0}")]
    Transport(String),
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Missing or rejected credential: the session is over.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::MissingCredential | ApiError::Unauthorized { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { status } | ApiError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Human-readable reason supplied by the server, if any.
    ///
    /// Looks at the usual REST framework keys, in order.
    pub fn server_message(&self) -> Option<String> {
        let ApiError::Rejected { body, .. } = self else {
            return None;
        };
        ["error", "detail", "message", "non_field_errors"]
            .iter()
            .find_map(|key| body.get(key).and_then(flatten_message))
    }
}

fn flatten_message(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(flatten_message).collect();
            (!parts.is_empty()).then(|| parts.join(" "))
        }
        _ => None,
    }
}
