//! Response envelope decoding.
//!
//! The API answers with a top-level JSON object. Most resources wrap their
//! payload under a `response` key; a few (such as `version`) put the fields at
//! the top level. Which shape applies is a property of the endpoint, expressed
//! here as an [`Envelope`].

use crate::error::{body_fragment, Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key holding the payload of wrapped responses.
pub const RESPONSE_KEY: &str = "response";

/// Where an endpoint's payload lives inside the top-level object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Envelope {
    /// Payload is under the `response` key
    #[default]
    Wrapped,
    /// Payload is the top-level object itself
    Bare,
}

/// A decoded response body together with its HTTP status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawResponse {
    status: u16,
    body: Value,
}

impl RawResponse {
    /// Create a raw response.
    #[must_use]
    pub const fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// HTTP status the body arrived with.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// The decoded top-level JSON value.
    #[must_use]
    pub const fn body(&self) -> &Value {
        &self.body
    }

    /// Consume the response and return the decoded body.
    #[must_use]
    pub fn into_body(self) -> Value {
        self.body
    }

    /// Select the payload for the given envelope.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DecodeFailure`] if a wrapped payload is missing.
    pub fn payload(&self, envelope: Envelope) -> Result<&Value> {
        extract_payload(&self.body, envelope)
    }
}

/// Parse a response body and check that its top level is a JSON object.
///
/// # Errors
///
/// Returns [`Error::DecodeFailure`] if the body is not JSON or not an object.
pub fn decode_body(status: u16, body: &str) -> Result<RawResponse> {
    let value: Value = serde_json::from_str(body).map_err(|err| {
        Error::decode(format!("invalid JSON body ({err}): {}", body_fragment(body)))
    })?;

    if !value.is_object() {
        return Err(Error::decode(format!(
            "expected a JSON object at the top level, found {}",
            value_kind(&value)
        )));
    }

    Ok(RawResponse::new(status, value))
}

/// Select the payload of a decoded body.
///
/// # Errors
///
/// Returns [`Error::DecodeFailure`] if a wrapped payload is missing or null.
pub fn extract_payload(body: &Value, envelope: Envelope) -> Result<&Value> {
    match envelope {
        Envelope::Bare => Ok(body),
        Envelope::Wrapped => match body.get(RESPONSE_KEY) {
            Some(Value::Null) | None => Err(Error::decode(format!(
                "missing `{RESPONSE_KEY}` key in response envelope"
            ))),
            Some(payload) => Ok(payload),
        },
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_object_bodies() {
        let raw = decode_body(200, r#"{"error": false, "response": {"revision": 3}}"#).unwrap();
        assert_eq!(raw.status(), 200);
        assert_eq!(raw.body()["response"]["revision"], 3);
    }

    #[test]
    fn rejects_invalid_json() {
        let err = decode_body(200, "<html>oops</html>").unwrap_err();
        assert!(matches!(err, Error::DecodeFailure { ref detail } if detail.contains("<html>")));
    }

    #[test]
    fn rejects_non_object_top_level() {
        let err = decode_body(200, "[1, 2, 3]").unwrap_err();
        assert_eq!(
            err,
            Error::decode("expected a JSON object at the top level, found an array")
        );

        assert!(decode_body(200, "null").is_err());
        assert!(decode_body(200, "\"text\"").is_err());
    }

    #[test]
    fn wrapped_envelope_selects_response_key() {
        let body = json!({"error": false, "response": {"rules": "be nice"}});
        let payload = extract_payload(&body, Envelope::Wrapped).unwrap();
        assert_eq!(payload, &json!({"rules": "be nice"}));
    }

    #[test]
    fn wrapped_envelope_requires_response_key() {
        let body = json!({"error": true, "descriptor": "Unknown resource"});
        let err = extract_payload(&body, Envelope::Wrapped).unwrap_err();
        assert!(matches!(err, Error::DecodeFailure { .. }));

        let body = json!({"response": null});
        assert!(extract_payload(&body, Envelope::Wrapped).is_err());
    }

    #[test]
    fn bare_envelope_uses_top_level() {
        let body = json!({"name": "1.0.0", "stage": "Beta"});
        let raw = RawResponse::new(200, body.clone());
        assert_eq!(raw.payload(Envelope::Bare).unwrap(), &body);
    }
}
