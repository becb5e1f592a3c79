//! API errors and response payloads

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::error;

use super::Cause;

/// HTTP status codes used by API errors
pub mod status {
    /// Malformed or invalid request
    pub const BAD_REQUEST: u16 = 400;
    /// Missing or invalid credentials
    pub const UNAUTHORIZED: u16 = 401;
    /// Authenticated but not permitted
    pub const FORBIDDEN: u16 = 403;
    /// Resource does not exist
    pub const NOT_FOUND: u16 = 404;
    /// Resource state does not allow the request
    pub const PRECONDITION_FAILED: u16 = 412;
    /// Unexpected server side failure
    pub const INTERNAL_SERVER_ERROR: u16 = 500;
}

/// Status marker of error response payloads
pub const STATUS_ERR: &str = "ERR";

/// An error surfaced to API clients with an HTTP status
///
/// # Examples
///
/// ```
/// use newsdesk::taxonomy::ApiError;
///
/// let error = ApiError::not_found().message("Item not found").build();
/// assert_eq!(error.status_code(), 404);
///
/// let response = error.to_response();
/// assert_eq!(response.status, "ERR");
/// assert_eq!(response.message, "Item not found");
/// assert!(response.issues.is_none());
/// ```
#[derive(Debug)]
pub struct ApiError {
    status_code: u16,
    message: Option<String>,
    payload: Option<Value>,
    cause: Option<Cause>,
}

/// JSON body returned to API clients for an [`ApiError`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Always [`STATUS_ERR`]
    pub status: String,
    /// Human readable message, empty when none was given
    pub message: String,
    /// Structured details about the failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issues: Option<Value>,
}

impl ApiError {
    /// Start building an error with an arbitrary status code
    pub fn builder(status_code: u16) -> ApiErrorBuilder {
        ApiErrorBuilder::new(status_code)
    }

    /// 400 Bad Request
    pub fn bad_request() -> ApiErrorBuilder {
        ApiErrorBuilder::new(status::BAD_REQUEST)
    }

    /// 401 Unauthorized, with payload `{"auth": 1}` unless replaced
    pub fn unauthorized() -> ApiErrorBuilder {
        ApiErrorBuilder::new(status::UNAUTHORIZED).payload(json!({ "auth": 1 }))
    }

    /// 403 Forbidden
    pub fn forbidden() -> ApiErrorBuilder {
        ApiErrorBuilder::new(status::FORBIDDEN)
    }

    /// 404 Not Found
    pub fn not_found() -> ApiErrorBuilder {
        ApiErrorBuilder::new(status::NOT_FOUND)
    }

    /// 412 Precondition Failed
    pub fn precondition_failed() -> ApiErrorBuilder {
        ApiErrorBuilder::new(status::PRECONDITION_FAILED)
    }

    /// 500 Internal Server Error
    pub fn internal() -> ApiErrorBuilder {
        ApiErrorBuilder::new(status::INTERNAL_SERVER_ERROR)
    }

    /// Unique identifier generation failed
    pub fn identifier_generation() -> ApiErrorBuilder {
        ApiErrorBuilder::new(status::INTERNAL_SERVER_ERROR)
            .message("Failed to generate unique_id")
            .payload(json!({ "unique_id": 1 }))
    }

    /// Workflow transition is not allowed from the item's current state
    pub fn invalid_state_transition() -> ApiErrorBuilder {
        ApiErrorBuilder::new(status::PRECONDITION_FAILED).message("Workflow transition is invalid.")
    }

    /// HTTP status code
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Human readable message
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Structured payload
    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    /// Original failure, if any
    pub fn cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }

    /// Render the JSON response body
    pub fn to_response(&self) -> ApiErrorResponse {
        ApiErrorResponse {
            status: STATUS_ERR.to_string(),
            message: self.message.clone().unwrap_or_default(),
            issues: self.payload.clone(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status_code, self.message.as_deref().unwrap_or_default())
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_ref()
            .map(|cause| cause.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Builder for [`ApiError`]
///
/// Logging happens in [`build`](ApiErrorBuilder::build): the cause when one
/// was attached, otherwise the message when one was set.
#[must_use]
#[derive(Debug)]
pub struct ApiErrorBuilder {
    status_code: u16,
    message: Option<String>,
    payload: Option<Value>,
    cause: Option<Cause>,
}

impl ApiErrorBuilder {
    /// Create a builder for the given status code
    pub fn new(status_code: u16) -> Self {
        Self {
            status_code,
            message: None,
            payload: None,
            cause: None,
        }
    }

    /// Set the human readable message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set the structured payload reported as `issues`
    pub fn payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Remove any payload, including a default one
    pub fn without_payload(mut self) -> Self {
        self.payload = None;
        self
    }

    /// Attach the original failure
    pub fn cause(mut self, cause: impl Into<Cause>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Build the error, logging it
    pub fn build(self) -> ApiError {
        let status = self.status_code;
        match (&self.cause, &self.message) {
            (Some(cause), message) => error!(
                status,
                cause = ?cause,
                "{}",
                message.as_deref().map_or_else(|| cause.to_string(), str::to_string)
            ),
            (None, Some(message)) => {
                error!(status, "HTTP Exception {status} has been raised: {message}")
            }
            (None, None) => {}
        }

        ApiError {
            status_code: self.status_code,
            message: self.message,
            payload: self.payload,
            cause: self.cause,
        }
    }
}
