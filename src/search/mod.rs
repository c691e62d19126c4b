//! Flight search view
//!
//! The view moves through Idle → Searching → Success | Failed. One lookup
//! runs per submit; submits while a lookup is pending are ignored.

use serde_json::Value;
use tracing::{debug, warn};

use crate::FlightLookupError;
use crate::i18n::{Dictionary, Locale};
use crate::models::{FlightStatusResponse, FlightSummary};

pub mod page;

pub use page::router;

/// Why a search ended without a result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Provider or transport failure
    Fetch,
    /// The provider answered with zero flights
    NotFound,
}

impl FailureKind {
    /// Localized message shown inline
    #[must_use]
    pub fn message(self, dictionary: &Dictionary) -> &str {
        match self {
            FailureKind::Fetch => &dictionary.error_fetch,
            FailureKind::NotFound => &dictionary.error_not_found,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchState {
    #[default]
    Idle,
    Searching {
        flight_code: String,
    },
    Success(FlightSummary),
    Failed(FailureKind),
}

/// State of one search page
#[derive(Debug, Clone, Default)]
pub struct SearchView {
    locale: Locale,
    input: String,
    state: SearchState,
}

impl SearchView {
    #[must_use]
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            input: String::new(),
            state: SearchState::Idle,
        }
    }

    #[must_use]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    #[must_use]
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Text last typed into the search box
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self.state, SearchState::Searching { .. })
    }

    #[must_use]
    pub fn summary(&self) -> Option<&FlightSummary> {
        match &self.state {
            SearchState::Success(summary) => Some(summary),
            _ => None,
        }
    }

    #[must_use]
    pub fn failure(&self) -> Option<FailureKind> {
        match self.state {
            SearchState::Failed(kind) => Some(kind),
            _ => None,
        }
    }

    /// Start a search.
    ///
    /// Returns the trimmed code to look up, or `None` when the input is blank
    /// or a lookup is already pending. Any previous result or error is cleared.
    pub fn submit(&mut self, input: &str) -> Option<String> {
        if self.is_pending() {
            debug!("Ignoring submit while a lookup is pending");
            return None;
        }

        self.input = input.to_string();
        let flight_code = input.trim();
        if flight_code.is_empty() {
            return None;
        }

        let flight_code = flight_code.to_string();
        self.state = SearchState::Searching {
            flight_code: flight_code.clone(),
        };
        Some(flight_code)
    }

    /// Settle the pending search with the proxy's answer
    pub fn resolve(&mut self, outcome: Result<Value, FlightLookupError>) {
        if !self.is_pending() {
            warn!("Received a lookup result with no search pending");
            return;
        }

        self.state = match outcome {
            Ok(body) => match interpret_body(body) {
                Ok(summary) => SearchState::Success(summary),
                Err(kind) => SearchState::Failed(kind),
            },
            Err(e) => {
                warn!("Flight lookup failed: {}", e);
                SearchState::Failed(FailureKind::Fetch)
            }
        };
    }
}

/// Map a proxy body to a summary or a failure kind
fn interpret_body(body: Value) -> Result<FlightSummary, FailureKind> {
    let response: FlightStatusResponse = serde_json::from_value(body).map_err(|e| {
        warn!("Unexpected flight status body: {}", e);
        FailureKind::Fetch
    })?;

    if let Some(error) = response.error {
        warn!("Aviation API error: {}", error);
        return Err(FailureKind::Fetch);
    }

    let record = response
        .data
        .as_deref()
        .and_then(<[Value]>::first)
        .ok_or(FailureKind::NotFound)?;

    FlightSummary::try_from(record).map_err(|e| {
        warn!("Could not map flight record: {}", e);
        FailureKind::Fetch
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn record() -> Value {
        json!({
            "flight": { "iata": "AF123" },
            "departure": {
                "airport": "Charles De Gaulle",
                "iata": "CDG",
                "timezone": "Europe/Paris",
                "scheduled": "2024-06-01T08:30:00+00:00"
            },
            "arrival": {
                "airport": "John F Kennedy International",
                "iata": "JFK",
                "timezone": "America/New_York",
                "scheduled": "2024-06-01T16:45:00+00:00"
            }
        })
    }

    fn searching() -> SearchView {
        let mut view = SearchView::new(Locale::EnUs);
        assert_eq!(view.submit("AF123"), Some("AF123".to_string()));
        view
    }

    #[test]
    fn test_starts_idle() {
        let view = SearchView::new(Locale::Fr);
        assert_eq!(view.state(), &SearchState::Idle);
        assert!(!view.is_pending());
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn test_blank_submit_is_ignored(#[case] input: &str) {
        let mut view = SearchView::new(Locale::Fr);
        assert_eq!(view.submit(input), None);
        assert_eq!(view.state(), &SearchState::Idle);
    }

    #[test]
    fn test_submit_enters_searching() {
        let mut view = SearchView::new(Locale::Fr);
        assert_eq!(view.submit("  AF123 "), Some("AF123".to_string()));
        assert_eq!(
            view.state(),
            &SearchState::Searching {
                flight_code: "AF123".to_string()
            }
        );
        assert_eq!(view.input(), "  AF123 ");
    }

    #[test]
    fn test_submit_while_pending_is_ignored() {
        let mut view = searching();
        assert_eq!(view.submit("BA456"), None);
        assert_eq!(
            view.state(),
            &SearchState::Searching {
                flight_code: "AF123".to_string()
            }
        );
    }

    #[test]
    fn test_record_resolves_to_success() {
        let mut view = searching();
        view.resolve(Ok(json!({ "data": [record()] })));

        let summary = view.summary().unwrap();
        assert_eq!(summary.flight_number, "AF123");
        assert_eq!(summary.departure_location, "CDG (Charles De Gaulle)");
        assert_eq!(summary.arrival_location, "JFK (John F Kennedy International)");
        assert!(view.failure().is_none());
    }

    #[rstest]
    #[case(json!({ "data": [] }), FailureKind::NotFound)]
    #[case(json!({ "pagination": { "count": 0 } }), FailureKind::NotFound)]
    #[case(json!({ "data": null }), FailureKind::NotFound)]
    #[case(json!({ "error": { "code": "invalid_access_key" } }), FailureKind::Fetch)]
    #[case(json!({ "error": "Upstream API error: 503 Service Unavailable - " }), FailureKind::Fetch)]
    #[case(json!({ "data": [{ "flight": { "iata": "AF123" } }] }), FailureKind::Fetch)]
    #[case(json!({ "data": "unexpected" }), FailureKind::Fetch)]
    fn test_body_resolves_to_failure(#[case] body: Value, #[case] expected: FailureKind) {
        let mut view = searching();
        view.resolve(Ok(body));
        assert_eq!(view.failure(), Some(expected));
        assert!(view.summary().is_none());
    }

    #[test]
    fn test_error_field_wins_over_data() {
        let mut view = searching();
        view.resolve(Ok(json!({ "error": "boom", "data": [record()] })));
        assert_eq!(view.failure(), Some(FailureKind::Fetch));
    }

    #[test]
    fn test_call_failure_resolves_to_fetch_error() {
        let mut view = searching();
        view.resolve(Err(FlightLookupError::upstream("connection refused")));
        assert_eq!(view.failure(), Some(FailureKind::Fetch));
    }

    #[test]
    fn test_new_submit_clears_previous_result() {
        let mut view = searching();
        view.resolve(Ok(json!({ "data": [record()] })));
        assert!(view.summary().is_some());

        assert_eq!(view.submit("BA456"), Some("BA456".to_string()));
        assert!(view.summary().is_none());
        assert!(view.is_pending());

        view.resolve(Ok(json!({ "data": [] })));
        assert_eq!(view.failure(), Some(FailureKind::NotFound));

        assert_eq!(view.submit("AF123"), Some("AF123".to_string()));
        assert!(view.failure().is_none());
    }

    #[test]
    fn test_resolve_without_pending_search_is_ignored() {
        let mut view = SearchView::new(Locale::Fr);
        view.resolve(Ok(json!({ "data": [record()] })));
        assert_eq!(view.state(), &SearchState::Idle);
    }

    #[test]
    fn test_failure_messages_are_localized() {
        let fr = Dictionary::load(Locale::Fr).unwrap();
        let en = Dictionary::load(Locale::EnUs).unwrap();
        assert_eq!(FailureKind::NotFound.message(&en), en.error_not_found);
        assert_eq!(FailureKind::Fetch.message(&fr), fr.error_fetch);
    }
}
