//! Response classification.
//!
//! # Design
//! FreshBooks reports application failures inside HTTP 200 bodies as
//! `{response: {"@status": "fail", error: "..."}}`. `classify` is the one
//! gate every response passes through: a body either comes back unchanged
//! or becomes an `ApiError::Api` — a fail status never escapes
//! untranslated. `convert_transport_error` is the matching converter for
//! failures at the HTTP layer; it extracts what it can from the error body
//! and must never fail itself.

use serde_json::Value;

use crate::error::ApiError;

/// Status value FreshBooks uses to signal an embedded failure.
const FAIL_STATUS: &str = "fail";

/// Inspect a deserialized response body for an embedded failure.
///
/// A body whose `response."@status"` equals `"fail"` (case-insensitive)
/// becomes an `ApiError::Api` carrying code 400, a message built from the
/// optional `error` field, and the whole `response` object as diagnostics.
/// Bodies without a `response` object or without a status field are passed
/// through unchanged — there is nothing to classify.
pub fn classify(body: Value) -> Result<Value, ApiError> {
    let failed = body
        .get("response")
        .and_then(|r| r.get("@status"))
        .and_then(Value::as_str)
        .is_some_and(|s| s.eq_ignore_ascii_case(FAIL_STATUS));
    if !failed {
        return Ok(body);
    }

    let response = body["response"].clone();
    let mut message = String::from("FreshBooks error ");
    if let Some(error) = response.get("error").and_then(Value::as_str) {
        message.push_str(&format!("[{error}] "));
    }

    Err(ApiError::Api {
        message,
        code: 400,
        response,
    })
}

/// Convert a failed HTTP exchange into an `ApiError::Transport`.
///
/// Best-effort: the error body is parsed as the mapping form and searched
/// for the `error` and `referral_link` fields FreshBooks puts in its error
/// replies (at the top level or under `response`). Malformed or empty
/// bodies degrade to a generic message; this function never fails. A
/// `status` of 0 means no HTTP status was received (connection failure).
pub fn convert_transport_error(status: u16, body: &str) -> ApiError {
    let parsed: Value = serde_json::from_str(body).unwrap_or(Value::Null);

    let mut message = match find_field(&parsed, "error") {
        Some(error) => format!("FreshBooks error [{error}]"),
        None if status == 0 => "FreshBooks request failed".to_string(),
        None => format!("HTTP error {status}"),
    };
    if let Some(link) = find_field(&parsed, "referral_link") {
        message.push_str(&format!(" (see {link})"));
    }

    ApiError::Transport {
        message,
        code: status,
        body: parsed,
    }
}

/// Look up a string field at the top level of the error body, falling back
/// to the nested `response` object.
fn find_field<'a>(body: &'a Value, field: &str) -> Option<&'a str> {
    body.get(field)
        .or_else(|| body.get("response").and_then(|r| r.get(field)))
        .and_then(Value::as_str)
}
