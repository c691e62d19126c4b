#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::{Router, body::Body, http::Request, response::Response};
use flightlookup::{AppState, FlightDataProvider, FlightLookupError, web};
use serde_json::{Value, json};
use tower::ServiceExt;

/// Provider returning a fixed body, or an upstream error when `body` is `None`
pub struct StubProvider {
    body: Option<Value>,
    calls: AtomicUsize,
}

impl StubProvider {
    pub fn returning(body: Value) -> Arc<Self> {
        Arc::new(Self {
            body: Some(body),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            body: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FlightDataProvider for StubProvider {
    async fn flight_status(&self, _flight_iata: &str) -> flightlookup::Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.body
            .clone()
            .ok_or_else(|| FlightLookupError::upstream("Upstream API error: 502 Bad Gateway - "))
    }
}

pub fn app(provider: Arc<dyn FlightDataProvider>) -> Router {
    web::router(AppState::new(provider), "static")
}

pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

pub fn af123_record() -> Value {
    json!({
        "flight_date": "2024-06-01",
        "flight_status": "scheduled",
        "flight": { "number": "123", "iata": "AF123", "icao": "AFR123" },
        "departure": {
            "airport": "Charles De Gaulle",
            "timezone": "Europe/Paris",
            "iata": "CDG",
            "scheduled": "2024-06-01T08:30:00+00:00"
        },
        "arrival": {
            "airport": "John F Kennedy International",
            "timezone": "America/New_York",
            "iata": "JFK",
            "scheduled": "2024-06-01T16:45:00+00:00"
        }
    })
}
