//! Request constructors, one per endpoint.
//!
//! Each function only describes the call; execute it with
//! [`crate::TruckersMpClient::execute`] or [`truckersmp_core::ApiClient::get`].

use crate::models::{Company, CompanyEvent, GameTime, Rules, Server, Version};
use truckersmp_core::request::hydrate_list;
use truckersmp_core::{CompanyId, Endpoint, Envelope, EventId, Request};

/// `GET vtc/{company}/events/{event}`
#[must_use]
pub fn company_event(company: CompanyId, event: EventId) -> Request<CompanyEvent> {
    Request::new(
        Endpoint::get(format!("vtc/{company}/events/{event}")),
        Envelope::Wrapped,
    )
}

/// `GET vtc/{company}/events`
#[must_use]
pub fn company_events(company: CompanyId) -> Request<Vec<CompanyEvent>> {
    Request::with_hydrator(
        Endpoint::get(format!("vtc/{company}/events")),
        Envelope::Wrapped,
        hydrate_list::<CompanyEvent>,
    )
}

/// `GET vtc/{company}`
#[must_use]
pub fn company(company: CompanyId) -> Request<Company> {
    Request::new(Endpoint::get(format!("vtc/{company}")), Envelope::Wrapped)
}

/// `GET rules`
#[must_use]
pub fn rules() -> Request<Rules> {
    Request::new(Endpoint::get("rules"), Envelope::Wrapped)
}

/// `GET version`. The payload is the top-level object.
#[must_use]
pub fn version() -> Request<Version> {
    Request::new(Endpoint::get("version"), Envelope::Bare)
}

/// `GET servers`
#[must_use]
pub fn servers() -> Request<Vec<Server>> {
    Request::with_hydrator(
        Endpoint::get("servers"),
        Envelope::Wrapped,
        hydrate_list::<Server>,
    )
}

/// `GET game_time`. The payload is the top-level object.
#[must_use]
pub fn game_time() -> Request<GameTime> {
    Request::new(Endpoint::get("game_time"), Envelope::Bare)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_substitute_ids() {
        let request = company_event(CompanyId::new(5), EventId::new(10));
        assert_eq!(request.endpoint().path(), "vtc/5/events/10");
        assert_eq!(request.endpoint().cache_key().as_str(), "vtc/5/events/10");
        assert_eq!(request.envelope(), Envelope::Wrapped);

        assert_eq!(company_events(CompanyId::new(5)).endpoint().path(), "vtc/5/events");
        assert_eq!(company(CompanyId::new(7)).endpoint().path(), "vtc/7");
    }

    #[test]
    fn envelopes_per_endpoint() {
        assert_eq!(rules().envelope(), Envelope::Wrapped);
        assert_eq!(servers().envelope(), Envelope::Wrapped);
        assert_eq!(version().envelope(), Envelope::Bare);
        assert_eq!(game_time().envelope(), Envelope::Bare);
    }

    #[test]
    fn every_request_is_a_get() {
        let methods = [
            rules().endpoint().method().clone(),
            version().endpoint().method().clone(),
            servers().endpoint().method().clone(),
            game_time().endpoint().method().clone(),
        ];
        assert!(methods.iter().all(|m| m.as_str() == "GET"));
    }
}
