//! `FlightLookup` - localized flight status lookup
//!
//! This library provides the aviation data proxy, the locale dictionaries
//! and the server-rendered search page.

pub mod api;
pub mod aviation;
pub mod config;
pub mod error;
pub mod i18n;
pub mod models;
pub mod search;
pub mod telemetry;
pub mod web;

// Re-export core types for public API
pub use aviation::{AviationStackClient, FlightDataProvider};
pub use config::FlightLookupConfig;
pub use error::FlightLookupError;
pub use i18n::{Dictionary, Locale};
pub use models::FlightSummary;
pub use search::{FailureKind, SearchState, SearchView};
pub use web::AppState;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, FlightLookupError>;
