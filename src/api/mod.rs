use axum::{
    Router,
    extract::{Query, State, rejection::QueryRejection},
    response::Json,
    routing::get,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::{error, instrument};

use crate::{FlightLookupError, Result, aviation::FlightDataProvider, web::AppState};

#[derive(Debug, Default, Deserialize)]
pub struct FlightQuery {
    pub flight_iata: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/flights", get(get_flight))
}

async fn get_flight(
    State(state): State<AppState>,
    query: std::result::Result<Query<FlightQuery>, QueryRejection>,
) -> Result<Json<Value>> {
    let Query(query) = query.map_err(|rejection| {
        FlightLookupError::bad_request(format!("Invalid query string: {}", rejection.body_text()))
    })?;

    lookup_flight(state.provider(), query.flight_iata.as_deref())
        .await
        .map(Json)
}

/// Relay one flight lookup to the provider.
///
/// A blank or absent code is a bad request; everything the provider returns
/// on success is passed through untouched.
#[instrument(skip(provider))]
pub async fn lookup_flight(
    provider: &dyn FlightDataProvider,
    flight_iata: Option<&str>,
) -> Result<Value> {
    let flight_iata = flight_iata
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .ok_or_else(|| FlightLookupError::bad_request("Flight IATA code is required"))?;

    provider.flight_status(flight_iata).await.inspect_err(|e| {
        error!("Flight API Error: {}", e);
    })
}
