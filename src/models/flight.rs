//! Provider response shapes and the display-ready flight summary

use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::FlightLookupError;
use crate::i18n::Locale;

/// Envelope returned by the flight-status endpoint (and relayed by the proxy)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlightStatusResponse {
    /// Matching flights, kept raw until one is mapped
    #[serde(default)]
    pub data: Option<Vec<Value>>,
    /// Set by the provider or by the proxy when the lookup failed
    #[serde(default)]
    pub error: Option<Value>,
}

/// One flight entry as reported by the provider
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlightRecord {
    #[serde(default)]
    pub flight: FlightIdent,
    #[serde(default)]
    pub departure: AirportSchedule,
    #[serde(default)]
    pub arrival: AirportSchedule,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlightIdent {
    #[serde(default)]
    pub iata: Option<String>,
}

/// Departure or arrival side of a flight record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AirportSchedule {
    #[serde(default)]
    pub airport: Option<String>,
    #[serde(default)]
    pub iata: Option<String>,
    /// IANA time zone name, e.g. `Europe/Paris`
    #[serde(default)]
    pub timezone: Option<String>,
    /// RFC 3339 timestamp
    #[serde(default)]
    pub scheduled: Option<String>,
}

impl AirportSchedule {
    /// `"CDG (Charles De Gaulle)"`, or the bare code when the airport name is unknown
    #[must_use]
    pub fn location_label(&self) -> Option<String> {
        let iata = self.iata.as_deref().filter(|s| !s.is_empty())?;
        Some(match self.airport.as_deref().filter(|s| !s.is_empty()) {
            Some(airport) => format!("{iata} ({airport})"),
            None => iata.to_string(),
        })
    }
}

/// Display-ready record built from one provider response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightSummary {
    pub flight_number: String,
    pub departure_scheduled: String,
    pub departure_time_zone: String,
    pub departure_location: String,
    pub arrival_scheduled: String,
    pub arrival_time_zone: String,
    pub arrival_location: String,
}

impl TryFrom<FlightRecord> for FlightSummary {
    type Error = FlightLookupError;

    fn try_from(record: FlightRecord) -> Result<Self, Self::Error> {
        let missing =
            |field: &str| FlightLookupError::upstream(format!("Flight record is missing {field}"));

        let flight_number = record
            .flight
            .iata
            .filter(|s| !s.is_empty())
            .ok_or_else(|| missing("flight.iata"))?;
        let departure_location = record
            .departure
            .location_label()
            .ok_or_else(|| missing("departure.iata"))?;
        let arrival_location = record
            .arrival
            .location_label()
            .ok_or_else(|| missing("arrival.iata"))?;

        Ok(Self {
            flight_number,
            departure_scheduled: record
                .departure
                .scheduled
                .ok_or_else(|| missing("departure.scheduled"))?,
            departure_time_zone: record.departure.timezone.unwrap_or_default(),
            departure_location,
            arrival_scheduled: record
                .arrival
                .scheduled
                .ok_or_else(|| missing("arrival.scheduled"))?,
            arrival_time_zone: record.arrival.timezone.unwrap_or_default(),
            arrival_location,
        })
    }
}

impl TryFrom<&Value> for FlightSummary {
    type Error = FlightLookupError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let record = FlightRecord::deserialize(value)
            .map_err(|e| FlightLookupError::upstream(format!("Malformed flight record: {e}")))?;
        record.try_into()
    }
}

impl FlightSummary {
    /// Scheduled departure formatted for the locale
    #[must_use]
    pub fn departure_display(&self, locale: Locale) -> String {
        format_scheduled(&self.departure_scheduled, &self.departure_time_zone, locale)
    }

    /// Scheduled arrival formatted for the locale
    #[must_use]
    pub fn arrival_display(&self, locale: Locale) -> String {
        format_scheduled(&self.arrival_scheduled, &self.arrival_time_zone, locale)
    }
}

fn locale_format(locale: Locale) -> &'static str {
    match locale {
        Locale::Fr => "%d/%m/%Y %H:%M:%S",
        Locale::EnUs => "%-m/%-d/%Y, %-I:%M:%S %p",
    }
}

/// Render a provider timestamp in the airport's zone, falling back to the raw string
#[must_use]
pub fn format_scheduled(raw: &str, time_zone: &str, locale: Locale) -> String {
    let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) else {
        return raw.to_string();
    };
    let format = locale_format(locale);

    match time_zone.parse::<Tz>() {
        Ok(tz) => timestamp.with_timezone(&tz).format(format).to_string(),
        Err(_) => timestamp.format(format).to_string(),
    }
}
