//! Client identity resolution.
//!
//! # Responsibilities
//! - Define the `ClientIp` request extension set by the IP gatekeeper
//! - Derive an address from proxy headers / peer address with one fixed
//!   precedence, shared by every stage that needs it
//!
//! # Design Decisions
//! - An identity already attached to the request always wins, so resolution
//!   is idempotent within one request's lifetime
//! - First hop of X-Forwarded-For is the client; later hops are proxies

use std::net::{IpAddr, SocketAddr};

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::Request;

/// Client address attached to the request by the IP gatekeeper and reused
/// by every downstream stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientIp(pub IpAddr);

/// Resolve the client address, preferring an identity attached by an
/// earlier stage over re-deriving it from headers.
pub fn resolve(req: &Request<Body>) -> Option<IpAddr> {
    if let Some(ClientIp(ip)) = req.extensions().get::<ClientIp>() {
        return Some(*ip);
    }
    derive(req)
}

/// Derive the client address from the request alone:
/// X-Forwarded-For (first hop), then X-Real-Ip, then the peer address.
pub fn derive(req: &Request<Body>) -> Option<IpAddr> {
    if let Some(forwarded) = header_str(req, "x-forwarded-for") {
        if let Some(first) = forwarded.split(',').next() {
            if let Ok(ip) = first.trim().parse() {
                return Some(ip);
            }
        }
    }
    if let Some(real_ip) = header_str(req, "x-real-ip") {
        if let Ok(ip) = real_ip.trim().parse() {
            return Some(ip);
        }
    }
    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
}

fn header_str<'a>(req: &'a Request<Body>, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|v| v.to_str().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> axum::http::request::Builder {
        Request::builder().uri("/test")
    }

    #[test]
    fn forwarded_for_first_hop_wins() {
        let req = request()
            .header("X-Forwarded-For", "203.0.113.7, 10.0.0.1")
            .header("X-Real-Ip", "198.51.100.2")
            .body(Body::empty())
            .unwrap();
        assert_eq!(derive(&req), Some("203.0.113.7".parse().unwrap()));
    }

    #[test]
    fn real_ip_used_when_forwarded_for_invalid() {
        let req = request()
            .header("X-Forwarded-For", "not-an-ip")
            .header("X-Real-Ip", "198.51.100.2")
            .body(Body::empty())
            .unwrap();
        assert_eq!(derive(&req), Some("198.51.100.2".parse().unwrap()));
    }

    #[test]
    fn falls_back_to_peer_address() {
        let mut req = request().body(Body::empty()).unwrap();
        req.extensions_mut()
            .insert(ConnectInfo::<SocketAddr>("192.0.2.1:4711".parse().unwrap()));
        assert_eq!(derive(&req), Some("192.0.2.1".parse().unwrap()));
    }

    #[test]
    fn attached_identity_overrides_headers() {
        let mut req = request()
            .header("X-Forwarded-For", "203.0.113.7")
            .body(Body::empty())
            .unwrap();
        let attached: IpAddr = "2001:db8::1".parse().unwrap();
        req.extensions_mut().insert(ClientIp(attached));
        assert_eq!(resolve(&req), Some(attached));
    }

    #[test]
    fn no_source_resolves_to_none() {
        let req = request().body(Body::empty()).unwrap();
        assert_eq!(resolve(&req), None);
    }
}
