//! Client IP extraction
//!
//! Prefers forwarded headers (reverse proxy deployments), falls back to the
//! peer address of the connection.

use actix_web::HttpRequest;
use actix_web::http::header::HeaderMap;

/// Extract the client IP for a request.
pub fn extract_client_ip(req: &HttpRequest) -> Option<String> {
    extract_forwarded_ip_from_headers(req.headers())
        .or_else(|| req.connection_info().peer_addr().map(String::from))
}

/// 优先 X-Forwarded-For（取第一个，即原始客户端 IP），其次 X-Real-IP
pub fn extract_forwarded_ip_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|h| h.to_str().ok())
                .map(String::from)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header::{HeaderName, HeaderValue};

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(
                HeaderName::from_bytes(name.as_bytes()).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        map
    }

    #[test]
    fn test_forwarded_for_first_entry_wins() {
        let map = headers(&[("x-forwarded-for", "203.0.113.7, 10.0.0.1")]);
        assert_eq!(
            extract_forwarded_ip_from_headers(&map),
            Some("203.0.113.7".to_string())
        );
    }

    #[test]
    fn test_real_ip_fallback() {
        let map = headers(&[("x-real-ip", "198.51.100.4")]);
        assert_eq!(
            extract_forwarded_ip_from_headers(&map),
            Some("198.51.100.4".to_string())
        );
    }

    #[test]
    fn test_no_headers() {
        let map = HeaderMap::new();
        assert_eq!(extract_forwarded_ip_from_headers(&map), None);
    }
}
