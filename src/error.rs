//! Pipeline error definitions.
//!
//! Quota exhaustion is a fail-fast error value inside the rate governor;
//! only the HTTP boundary turns it into a 429. The IP gatekeeper builds its
//! own 403 responses instead (see `http::response`), which keeps the two
//! rejection styles distinct on purpose.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors surfaced by the admission pipeline.
#[derive(Debug, Error)]
pub enum AdmissionError {
    /// The (route, client) bucket is exhausted for the current window.
    #[error("too many requests for {route_key} from {client}")]
    TooManyRequests { route_key: String, client: String },
}

impl IntoResponse for AdmissionError {
    fn into_response(self) -> Response {
        match self {
            AdmissionError::TooManyRequests { .. } => {
                (StatusCode::TOO_MANY_REQUESTS, "Too Many Requests").into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_error_maps_to_429() {
        let err = AdmissionError::TooManyRequests {
            route_key: "/admin/*".into(),
            client: "203.0.113.7".into(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }
}
