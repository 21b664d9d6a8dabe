//! Rejection response construction.
//!
//! # Responsibilities
//! - Build the 403 responses produced by the IP gatekeeper
//! - Attach the fixed security headers to every rejection
//! - Negotiate JSON vs plain-text bodies from the Accept header / path
//!
//! # Design Decisions
//! - Security headers are unconditional on rejections; a blocked client
//!   gets no rendering latitude
//! - `/api` paths are JSON clients even without an Accept header

use axum::body::Body;
use axum::http::{header, HeaderValue, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Why the IP gatekeeper refused a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    /// The client address is on the blocklist.
    AccessDenied,
    /// The heuristic detector flagged the request.
    Suspicious,
    /// No client address could be resolved.
    NoClientIp,
}

impl BlockReason {
    pub fn message(&self) -> &'static str {
        match self {
            BlockReason::AccessDenied => "Access Denied",
            BlockReason::Suspicious => "Suspicious request detected",
            BlockReason::NoClientIp => "Unable to verify request origin",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            BlockReason::AccessDenied => "IP_BLOCKED",
            BlockReason::Suspicious => "SUSPICIOUS_REQUEST",
            BlockReason::NoClientIp => "NO_CLIENT_IP",
        }
    }
}

/// Does this client expect a JSON error body?
pub fn wants_json(req: &Request<Body>) -> bool {
    let accepts_json = req
        .headers()
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("application/json"));
    accepts_json || req.uri().path().starts_with("/api")
}

/// Build the 403 rejection for a gatekeeper block decision.
pub fn blocked(req: &Request<Body>, reason: BlockReason) -> Response {
    let mut response = if wants_json(req) {
        let body = json!({
            "error": reason.message(),
            "code": reason.code(),
        });
        (StatusCode::FORBIDDEN, axum::Json(body)).into_response()
    } else {
        (StatusCode::FORBIDDEN, reason.message()).into_response()
    };

    let headers = response.headers_mut();
    headers.insert(
        "X-Content-Type-Options",
        HeaderValue::from_static("nosniff"),
    );
    headers.insert("X-Frame-Options", HeaderValue::from_static("DENY"));
    headers.insert(
        "X-XSS-Protection",
        HeaderValue::from_static("1; mode=block"),
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[test]
    fn plain_clients_get_text() {
        let response = blocked(&get("/articles"), BlockReason::AccessDenied);
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(content_type.starts_with("text/plain"));
    }

    #[test]
    fn api_paths_get_json_without_accept_header() {
        let response = blocked(&get("/api/articles"), BlockReason::Suspicious);
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(content_type.starts_with("application/json"));
    }

    #[test]
    fn accept_header_selects_json() {
        let req = Request::builder()
            .uri("/articles")
            .header(header::ACCEPT, "application/json")
            .body(Body::empty())
            .unwrap();
        assert!(wants_json(&req));
    }

    #[test]
    fn rejections_carry_security_headers() {
        let response = blocked(&get("/test"), BlockReason::NoClientIp);
        assert_eq!(response.headers()["X-Content-Type-Options"], "nosniff");
        assert_eq!(response.headers()["X-Frame-Options"], "DENY");
        assert_eq!(response.headers()["X-XSS-Protection"], "1; mode=block");
    }
}
