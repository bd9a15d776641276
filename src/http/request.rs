//! Request handling.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4)
//! - Extract the lookup path (host + URI path) from a request
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Host port is ignored; import paths never carry one

use axum::http::{header, HeaderValue, Request};
use percent_encoding::percent_decode_str;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Generates a fresh UUID v4 request ID for every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Access to per-request values set by the middleware stack.
pub trait RequestExt {
    /// The request ID, or `"unknown"` when none was set.
    fn request_id(&self) -> &str;

    /// Host the request was addressed to, without port.
    fn request_host(&self) -> Option<&str>;

    /// `host + path` with the path percent-decoded, the key rules are
    /// matched against. `None` when there is no host or the decoded path
    /// is not UTF-8.
    fn lookup_path(&self) -> Option<String>;
}

impl<B> RequestExt for Request<B> {
    fn request_id(&self) -> &str {
        self.headers()
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
    }

    fn request_host(&self) -> Option<&str> {
        let host = match self.uri().host() {
            Some(host) => host,
            None => {
                let value = self.headers().get(header::HOST)?.to_str().ok()?;
                strip_port(value)
            }
        };
        if host.is_empty() {
            None
        } else {
            Some(host)
        }
    }

    fn lookup_path(&self) -> Option<String> {
        let host = self.request_host()?;
        let path = percent_decode_str(self.uri().path()).decode_utf8().ok()?;
        Some(format!("{}{}", host, path))
    }
}

fn strip_port(host: &str) -> &str {
    // Bracketed IPv6 literal: keep the brackets, drop the port.
    if host.starts_with('[') {
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }
    match host.rsplit_once(':') {
        Some((name, port)) if port.bytes().all(|b| b.is_ascii_digit()) => name,
        _ => host,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_path_from_host_header() {
        let req = Request::builder()
            .uri("/x86/x86asm")
            .header("Host", "rsc.io")
            .body(())
            .unwrap();
        assert_eq!(req.request_host(), Some("rsc.io"));
        assert_eq!(req.lookup_path().as_deref(), Some("rsc.io/x86/x86asm"));
    }

    #[test]
    fn test_port_is_stripped() {
        let req = Request::builder()
            .uri("/go")
            .header("Host", "9fans.net:8080")
            .body(())
            .unwrap();
        assert_eq!(req.lookup_path().as_deref(), Some("9fans.net/go"));
    }

    #[test]
    fn test_absolute_uri_wins() {
        let req = Request::builder()
            .uri("http://rsc.io/quote")
            .header("Host", "other.example")
            .body(())
            .unwrap();
        assert_eq!(req.lookup_path().as_deref(), Some("rsc.io/quote"));
    }

    #[test]
    fn test_path_is_percent_decoded() {
        let req = Request::builder()
            .uri("/x%38%36/x86asm")
            .header("Host", "rsc.io")
            .body(())
            .unwrap();
        assert_eq!(req.lookup_path().as_deref(), Some("rsc.io/x86/x86asm"));
    }

    #[test]
    fn test_invalid_utf8_path_has_no_lookup_key() {
        let req = Request::builder()
            .uri("/%ff%fe")
            .header("Host", "rsc.io")
            .body(())
            .unwrap();
        assert_eq!(req.lookup_path(), None);
    }

    #[test]
    fn test_missing_host() {
        let req = Request::builder().uri("/pkg").body(()).unwrap();
        assert_eq!(req.request_host(), None);
        assert_eq!(req.lookup_path(), None);
    }

    #[test]
    fn test_request_id_default() {
        let req = Request::builder().body(()).unwrap();
        assert_eq!(req.request_id(), "unknown");

        let mut make = MakeRequestUuid;
        let id = make.make_request_id(&req).unwrap();
        assert_eq!(id.header_value().len(), 36);
    }

    #[test]
    fn test_strip_port_variants() {
        assert_eq!(strip_port("a.com"), "a.com");
        assert_eq!(strip_port("a.com:443"), "a.com");
        assert_eq!(strip_port("[::1]:8080"), "[::1]");
    }
}
