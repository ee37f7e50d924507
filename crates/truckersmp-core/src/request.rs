//! Generic endpoint requests.
//!
//! A [`Request`] bundles everything that differs between endpoints: the
//! descriptor, the envelope shape and the hydration step turning the payload
//! into a model. Executing it is the job of [`crate::client::ApiClient::get`].

use crate::endpoint::Endpoint;
use crate::envelope::{Envelope, RawResponse};
use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// Turns a decoded payload into a model.
pub type Hydrator<M> = fn(&Value) -> Result<M>;

/// Deserialize a model from a payload, failing on missing or mistyped fields.
///
/// # Errors
///
/// Returns [`crate::Error::DecodeFailure`] if the payload does not match `M`.
pub fn hydrate<M>(payload: &Value) -> Result<M>
where
    M: DeserializeOwned,
{
    M::deserialize(payload).map_err(Into::into)
}

/// A typed request for one endpoint.
pub struct Request<M> {
    endpoint: Endpoint,
    envelope: Envelope,
    hydrate: Hydrator<M>,
}

impl<M> Request<M>
where
    M: DeserializeOwned,
{
    /// Create a request whose model is deserialized straight from the payload.
    #[must_use]
    pub fn new(endpoint: Endpoint, envelope: Envelope) -> Self {
        Self::with_hydrator(endpoint, envelope, hydrate::<M>)
    }
}

impl<M> Request<M> {
    /// Create a request with a custom hydration step.
    #[must_use]
    pub fn with_hydrator(endpoint: Endpoint, envelope: Envelope, hydrate: Hydrator<M>) -> Self {
        Self {
            endpoint,
            envelope,
            hydrate,
        }
    }

    /// The endpoint descriptor.
    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// The envelope shape.
    #[must_use]
    pub const fn envelope(&self) -> Envelope {
        self.envelope
    }

    /// Select the payload of `raw` and hydrate the model.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::DecodeFailure`] if the payload is missing or malformed.
    pub fn hydrate(&self, raw: &RawResponse) -> Result<M> {
        let payload = raw.payload(self.envelope)?;
        (self.hydrate)(payload)
    }
}

impl<M> Clone for Request<M> {
    fn clone(&self) -> Self {
        Self {
            endpoint: self.endpoint.clone(),
            envelope: self.envelope,
            hydrate: self.hydrate,
        }
    }
}

impl<M> fmt::Debug for Request<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("endpoint", &self.endpoint)
            .field("envelope", &self.envelope)
            .finish_non_exhaustive()
    }
}

/// Deserialize a list payload. An empty array is an empty list; `null` is not.
///
/// # Errors
///
/// Returns [`crate::Error::DecodeFailure`] if the payload is not a list of `M`.
pub fn hydrate_list<M>(payload: &Value) -> Result<Vec<M>>
where
    M: DeserializeOwned,
{
    if !payload.is_array() {
        return Err(Error::decode(format!(
            "expected a list payload, found {}",
            if payload.is_null() { "null" } else { "a non-list value" }
        )));
    }
    Vec::<M>::deserialize(payload).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Rules {
        rules: String,
        revision: u32,
    }

    #[test]
    fn hydrates_wrapped_payload() {
        let request = Request::<Rules>::new(Endpoint::get("rules"), Envelope::Wrapped);
        let raw = RawResponse::new(
            200,
            json!({"error": false, "response": {"rules": "be nice", "revision": 7}}),
        );

        let rules = request.hydrate(&raw).unwrap();
        assert_eq!(
            rules,
            Rules {
                rules: "be nice".into(),
                revision: 7
            }
        );
    }

    #[test]
    fn missing_field_is_a_decode_failure() {
        let request = Request::<Rules>::new(Endpoint::get("rules"), Envelope::Wrapped);
        let raw = RawResponse::new(200, json!({"response": {"rules": "be nice"}}));

        let err = request.hydrate(&raw).unwrap_err();
        assert!(
            matches!(err, Error::DecodeFailure { ref detail } if detail.contains("revision")),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn mistyped_field_is_a_decode_failure() {
        let raw = RawResponse::new(200, json!({"rules": "x", "revision": "seven"}));
        let request = Request::<Rules>::new(Endpoint::get("rules"), Envelope::Bare);
        assert!(matches!(
            request.hydrate(&raw),
            Err(Error::DecodeFailure { .. })
        ));
    }

    #[test]
    fn custom_hydrator_is_used() {
        fn revision_only(payload: &Value) -> Result<u64> {
            payload["revision"]
                .as_u64()
                .ok_or_else(|| Error::decode("revision is not a number"))
        }

        let request =
            Request::with_hydrator(Endpoint::get("rules"), Envelope::Wrapped, revision_only);
        let raw = RawResponse::new(200, json!({"response": {"revision": 12}}));
        assert_eq!(request.hydrate(&raw).unwrap(), 12);
    }

    #[test]
    fn hydrate_list_rejects_null() {
        let err = hydrate_list::<Rules>(&Value::Null).unwrap_err();
        assert!(
            matches!(err, Error::DecodeFailure { ref detail } if detail.contains("null")),
            "unexpected error: {err:?}"
        );
        assert!(hydrate_list::<Rules>(&json!({"rules": "a", "revision": 1})).is_err());

        let list: Vec<Rules> = hydrate_list(&json!([])).unwrap();
        assert!(list.is_empty());

        let list: Vec<Rules> =
            hydrate_list(&json!([{"rules": "a", "revision": 1}, {"rules": "b", "revision": 2}]))
                .unwrap();
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn debug_and_clone() {
        let request = Request::<Rules>::new(Endpoint::get("rules"), Envelope::Wrapped);
        let clone = request.clone();
        assert_eq!(clone.endpoint(), request.endpoint());
        assert!(format!("{request:?}").contains("rules"));
    }
}
