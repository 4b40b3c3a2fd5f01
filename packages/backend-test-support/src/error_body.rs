//! Assertions for the `{ error, code, trace_id }` error contract.

use actix_web::http::header::HeaderMap;
use actix_web::http::StatusCode;
use serde::Deserialize;

/// Mirror of the backend's error body, decoded independently.
#[derive(Debug, Deserialize)]
pub struct ErrorBodyLike {
    pub error: String,
    pub code: String,
    pub trace_id: String,
}

/// Check status, code, message and that `trace_id` matches `x-trace-id`.
///
/// Returns the decoded body for further assertions.
pub fn assert_error_body(
    status: StatusCode,
    headers: &HeaderMap,
    body: &[u8],
    expected_status: StatusCode,
    expected_code: &str,
    expected_error_contains: Option<&str>,
) -> ErrorBodyLike {
    assert_eq!(status, expected_status, "unexpected status");

    let parsed: ErrorBodyLike = serde_json::from_slice(body).unwrap_or_else(|e| {
        panic!(
            "error body is not valid JSON ({e}): {}",
            String::from_utf8_lossy(body)
        )
    });

    assert_eq!(parsed.code, expected_code, "unexpected error code");
    assert!(!parsed.error.is_empty(), "error message must not be empty");
    if let Some(fragment) = expected_error_contains {
        assert!(
            parsed.error.contains(fragment),
            "error {:?} should contain {fragment:?}",
            parsed.error
        );
    }

    let header = headers
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .expect("x-trace-id header should be present");
    assert_eq!(parsed.trace_id, header, "trace_id must match x-trace-id");
    assert_ne!(parsed.trace_id, "unknown", "trace_id must come from the request scope");

    parsed
}
