//! Response assertions for API tests.
//!
//! `check_response` reports a mismatch as an `ApiError`; `assert_response`
//! panics with the same message so it can be called directly from a
//! `#[test]` function.

use serde_json::Value;

use crate::error::ApiError;
use crate::http::HttpResponse;

/// Compare a response against an expected status and, optionally, an
/// expected JSON body.
///
/// The status is checked first. The body comparison is structural equality
/// of parsed JSON values, so key order and whitespace do not matter.
pub fn check_response(
    response: &HttpResponse,
    expected_status: u16,
    expected_json: Option<&Value>,
) -> Result<(), ApiError> {
    if response.status != expected_status {
        return Err(ApiError::StatusMismatch {
            expected: expected_status,
            actual: response.status,
            body: response.body.clone(),
        });
    }
    if let Some(expected) = expected_json {
        let actual = response.json_body()?;
        if &actual != expected {
            return Err(ApiError::JsonMismatch {
                expected: expected.clone(),
                actual,
            });
        }
    }
    Ok(())
}

/// Panicking form of `check_response`.
#[track_caller]
pub fn assert_response(
    response: &HttpResponse,
    expected_status: u16,
    expected_json: Option<&Value>,
) {
    if let Err(e) = check_response(response, expected_status, expected_json) {
        panic!("{e}");
    }
}
