//! Request envelope construction.
//!
//! # Design
//! FreshBooks expects every call as a single `request` document carrying
//! the method name under the reserved `@method` key, and the transport
//! expects that document under a `body` field. `build_request` is the one
//! place this nesting is produced; it is a pure transformation with no
//! side effects.

use serde_json::{json, Map, Value};

use crate::error::ApiError;

/// Reserved key carrying the upstream method name inside the `request`
/// object.
pub const METHOD_KEY: &str = "@method";

/// Wrap a method name and an optional payload into the FreshBooks request
/// envelope: `{body: {request: {"@method": <method>, ...payload}}}`.
///
/// The method name must be non-empty. A payload containing the reserved
/// `@method` key is rejected — merge precedence between the injected
/// method and a caller-supplied one would otherwise be undefined.
pub fn build_request(
    method: &str,
    payload: Option<&Map<String, Value>>,
) -> Result<Value, ApiError> {
    if method.is_empty() {
        return Err(ApiError::InvalidRequest(
            "method name must not be empty".to_string(),
        ));
    }

    let mut request = Map::new();
    request.insert(METHOD_KEY.to_string(), Value::String(method.to_string()));

    if let Some(fields) = payload {
        if fields.contains_key(METHOD_KEY) {
            return Err(ApiError::InvalidRequest(format!(
                "payload must not contain the reserved {METHOD_KEY} key"
            )));
        }
        for (key, value) in fields {
            request.insert(key.clone(), value.clone());
        }
    }

    Ok(json!({ "body": { "request": request } }))
}
