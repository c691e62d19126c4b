//! Aviation data provider client
//!
//! Fetches flight status from the aviationstack `flights` endpoint. The
//! provider sits behind [`FlightDataProvider`] so the proxy can be driven
//! without network access.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};

use crate::config::AviationConfig;
use crate::{FlightLookupError, Result, VERSION};

/// Number of upstream body characters kept in diagnostics
const DIAGNOSTIC_LEN: usize = 100;

/// Source of flight-status data
#[async_trait]
pub trait FlightDataProvider: Send + Sync {
    /// Look up a flight by IATA code, returning the provider body unchanged
    async fn flight_status(&self, flight_iata: &str) -> Result<Value>;
}

/// HTTP client for the aviationstack API
pub struct AviationStackClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl AviationStackClient {
    /// Create a new client
    pub fn new(config: &AviationConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(format!("FlightLookup/{VERSION}"))
            .build()
            .map_err(|e| FlightLookupError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Whether a credential is configured
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    fn flight_status_url(&self, api_key: &str, flight_iata: &str) -> String {
        format!(
            "{}/flights?access_key={}&flight_iata={}&limit=1",
            self.base_url,
            urlencoding::encode(api_key),
            urlencoding::encode(flight_iata)
        )
    }
}

#[async_trait]
impl FlightDataProvider for AviationStackClient {
    #[instrument(skip(self))]
    async fn flight_status(&self, flight_iata: &str) -> Result<Value> {
        let Some(api_key) = self.api_key.as_deref() else {
            error!("Missing aviation API key");
            return Err(FlightLookupError::config("Aviation API key is not configured"));
        };

        let url = self.flight_status_url(api_key, flight_iata);
        info!("Fetching from: {}", redact(&url, api_key));
        let start_time = Instant::now();

        let response = self.client.get(&url).send().await.map_err(|e| {
            let cause = describe_transport_error(e, api_key);
            warn!("Network error calling aviation API: {}", cause);
            FlightLookupError::upstream(format!("Failed to fetch flight data: {cause}"))
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            let cause = describe_transport_error(e, api_key);
            warn!("Failed to read aviation API response: {}", cause);
            FlightLookupError::upstream(format!("Failed to read upstream response: {cause}"))
        })?;

        info!(
            "Upstream status: {} in {:.3}s",
            status,
            start_time.elapsed().as_secs_f64()
        );

        if !status.is_success() {
            return Err(FlightLookupError::upstream(format!(
                "Upstream API error: {} - {}",
                status,
                truncate_chars(&body, DIAGNOSTIC_LEN)
            )));
        }

        serde_json::from_str(&body).map_err(|e| {
            debug!("Upstream body is not JSON: {}", e);
            FlightLookupError::upstream(format!(
                "Invalid JSON from upstream: {}...",
                truncate_chars(&body, DIAGNOSTIC_LEN)
            ))
        })
    }
}

/// reqwest errors embed the request URL, and with it the access key
fn describe_transport_error(error: reqwest::Error, api_key: &str) -> String {
    redact(&error.without_url().to_string(), api_key)
}

/// Hide the credential before a URL or message reaches the logs
fn redact(text: &str, api_key: &str) -> String {
    if api_key.is_empty() {
        return text.to_string();
    }
    text.replace(&*urlencoding::encode(api_key), "***")
        .replace(api_key, "***")
}

/// First `max` characters of `text`
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
