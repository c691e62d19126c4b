//! Data models for the flight lookup service

pub mod flight;

pub use flight::{AirportSchedule, FlightRecord, FlightStatusResponse, FlightSummary};
