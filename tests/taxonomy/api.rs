//! API errors and their response payloads

use std::io;

use newsdesk::taxonomy::{status, ApiError};
use newsdesk::Error;
use serde_json::json;

use crate::init_logging;

#[test]
fn test_unauthorized_defaults() {
    init_logging();
    let error = ApiError::unauthorized().message("Please login").build();
    assert_eq!(error.status_code(), status::UNAUTHORIZED);

    let body = serde_json::to_value(error.to_response()).unwrap();
    assert_eq!(
        body,
        json!({ "status": "ERR", "message": "Please login", "issues": { "auth": 1 } })
    );
}

#[test]
fn test_payload_can_be_replaced_or_removed() {
    let replaced = ApiError::unauthorized().payload(json!({ "token": "expired" })).build();
    assert_eq!(replaced.payload(), Some(&json!({ "token": "expired" })));

    let removed = ApiError::unauthorized().without_payload().build();
    let body = serde_json::to_value(removed.to_response()).unwrap();
    assert_eq!(body, json!({ "status": "ERR", "message": "" }));
}

#[test]
fn test_identifier_generation() {
    let error = ApiError::identifier_generation().build();
    assert_eq!(error.status_code(), 500);
    assert_eq!(error.message(), Some("Failed to generate unique_id"));
    assert_eq!(error.payload(), Some(&json!({ "unique_id": 1 })));
}

#[test]
fn test_invalid_state_transition() {
    let error = ApiError::invalid_state_transition().build();
    assert_eq!(error.status_code(), status::PRECONDITION_FAILED);
    assert_eq!(error.to_string(), "412: Workflow transition is invalid.");
}

#[test]
fn test_cause_is_error_source() {
    init_logging();
    let error = ApiError::internal()
        .cause(io::Error::other("disk full"))
        .build();
    let source = std::error::Error::source(&error).unwrap();
    assert_eq!(source.to_string(), "disk full");
    assert!(error.message().is_none());
}

#[test]
fn test_api_error_through_crate_error() {
    let error: Error = ApiError::forbidden().message("Not allowed").build().into();
    assert_eq!(error.status_code(), Some(403));
    assert_eq!(error.code(), None);
    assert_eq!(error.to_string(), "403: Not allowed");
}
