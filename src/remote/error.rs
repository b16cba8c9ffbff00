//! Error type for remote store operations.

use serde::Deserialize;
use thiserror::Error;

use crate::model::PersonId;

/// Failure of a single remote round trip.
///
/// The store's own detail is carried opaquely so callers can surface it
/// without interpreting it.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The placeholder configuration is in use; no request was sent.
    #[error("Remote store is not configured")]
    SetupRequired,

    /// The configured base URL cannot be used to build request URLs
    #[error("Invalid remote store URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Failed to reach the store
    #[error("Connection to remote store failed: {source}")]
    Connection {
        #[source]
        source: reqwest::Error,
    },

    /// Request exceeded the configured timeout
    #[error("Remote store request timed out")]
    Timeout {
        #[source]
        source: reqwest::Error,
    },

    /// The targeted row does not exist
    #[error("No {table} row with id {id}")]
    NotFound { table: &'static str, id: String },

    /// The store rejected the request (constraint violation, bad key, ...)
    #[error("Remote store error {status}: {message}")]
    Upstream {
        status: u16,
        code: Option<String>,
        message: String,
        details: Option<String>,
        hint: Option<String>,
    },

    /// The response body did not match the expected shape
    #[error("Unexpected response from remote store: {0}")]
    Decode(String),

    /// The person's duaas were deleted but the person row was not
    #[error("Deleted duaas of person {person_id} but not the person: {source}")]
    CascadeIncomplete {
        person_id: PersonId,
        #[source]
        source: Box<RemoteError>,
    },
}

impl RemoteError {
    /// Short stable name for logs.
    pub fn error_type(&self) -> &'static str {
        match self {
            RemoteError::SetupRequired => "setup_required",
            RemoteError::InvalidUrl { .. } => "invalid_url",
            RemoteError::Connection { .. } => "connection_error",
            RemoteError::Timeout { .. } => "timeout",
            RemoteError::NotFound { .. } => "not_found",
            RemoteError::Upstream { .. } => "upstream_error",
            RemoteError::Decode(_) => "decode_error",
            RemoteError::CascadeIncomplete { .. } => "cascade_incomplete",
        }
    }

    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RemoteError::Timeout { source: err }
        } else if err.is_decode() {
            RemoteError::Decode(err.to_string())
        } else {
            RemoteError::Connection { source: err }
        }
    }

    /// Build an `Upstream` error from a non-success status and raw body.
    ///
    /// PostgREST error bodies are `{code, message, details, hint}`; any other
    /// body is kept verbatim as the message.
    pub(crate) fn from_response_body(status: u16, body: &str) -> Self {
        match serde_json::from_str::<PostgrestErrorBody>(body) {
            Ok(parsed) => RemoteError::Upstream {
                status,
                code: parsed.code,
                message: parsed.message.unwrap_or_else(|| body.to_string()),
                details: parsed.details,
                hint: parsed.hint,
            },
            Err(_) => RemoteError::Upstream {
                status,
                code: None,
                message: body.to_string(),
                details: None,
                hint: None,
            },
        }
    }
}

#[derive(Deserialize)]
struct PostgrestErrorBody {
    code: Option<String>,
    message: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}
