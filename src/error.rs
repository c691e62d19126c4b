//! Error types and handling for the flight lookup service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Main error type for the flight lookup service
#[derive(Error, Debug)]
pub enum FlightLookupError {
    /// The caller omitted required input
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Deployment misconfiguration, e.g. a missing provider credential
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The aviation provider failed or returned a malformed body
    #[error("Upstream error: {message}")]
    Upstream { message: String },
}

impl FlightLookupError {
    /// Create a new bad request error
    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new upstream error
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// HTTP status reported to the caller
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            FlightLookupError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            FlightLookupError::Config { .. } | FlightLookupError::Upstream { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get a user-friendly error message
    ///
    /// Configuration details stay in the logs; upstream diagnostics are
    /// passed through so the caller can see the provider's status.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            FlightLookupError::BadRequest { message } | FlightLookupError::Upstream { message } => {
                message.clone()
            }
            FlightLookupError::Config { .. } => "API configuration error".to_string(),
        }
    }
}

impl IntoResponse for FlightLookupError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.user_message() }));
        (self.status_code(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let bad_request = FlightLookupError::bad_request("missing code");
        assert!(matches!(bad_request, FlightLookupError::BadRequest { .. }));

        let config_err = FlightLookupError::config("missing API key");
        assert!(matches!(config_err, FlightLookupError::Config { .. }));

        let upstream_err = FlightLookupError::upstream("503");
        assert!(matches!(upstream_err, FlightLookupError::Upstream { .. }));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            FlightLookupError::bad_request("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            FlightLookupError::config("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            FlightLookupError::upstream("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_user_messages() {
        let config_err = FlightLookupError::config("AVIATION_API_KEY is not set");
        assert_eq!(config_err.user_message(), "API configuration error");

        let upstream_err = FlightLookupError::upstream("Upstream API error: 503");
        assert!(upstream_err.user_message().contains("503"));

        let bad_request = FlightLookupError::bad_request("Flight IATA code is required");
        assert_eq!(bad_request.user_message(), "Flight IATA code is required");
    }

    #[tokio::test]
    async fn test_response_is_json_error() {
        let response = FlightLookupError::upstream("Upstream API error: 503").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "error": "Upstream API error: 503" }));
    }
}
