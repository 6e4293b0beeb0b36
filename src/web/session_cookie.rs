//! Signed session cookie and anti-forgery token.
//!
//! The session id is a UUID carried as `sid=<uuid>.<hmac-sha256 hex>`.
//! Tampered or unsigned cookies are treated as absent and the caller starts
//! a fresh session. The anti-forgery token is an HMAC over the session id
//! under a domain prefix; it is embedded in the form and checked on every
//! mutating submission.

use axum::http::{HeaderMap, header};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

use crate::config::BedsideConfig;

type HmacSha256 = Hmac<Sha256>;

pub const SESSION_COOKIE: &str = "sid";
const CSRF_PREFIX: &str = "csrf:";

fn keyed_mac(secret: &str, payload: &[u8]) -> HmacSha256 {
    // HMAC accepts keys of any length.
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).expect("hmac key");
    mac.update(payload);
    mac
}

fn sign(secret: &str, payload: &str) -> String {
    hex::encode(keyed_mac(secret, payload.as_bytes()).finalize().into_bytes())
}

fn verify(secret: &str, payload: &str, signature_hex: &str) -> bool {
    let Ok(signature) = hex::decode(signature_hex) else {
        return false;
    };
    keyed_mac(secret, payload.as_bytes())
        .verify_slice(&signature)
        .is_ok()
}

/// `Set-Cookie` value for a session id.
pub fn build_cookie(config: &BedsideConfig, session_id: &str) -> String {
    let mut cookie = format!(
        "{}={}.{}; Path=/; HttpOnly; SameSite=Lax",
        SESSION_COOKIE,
        session_id,
        sign(&config.session_secret, session_id)
    );
    if config.public {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Extracts a verified session id from the request cookies, or nothing if
/// the cookie is missing, malformed or carries a bad signature.
pub fn extract(headers: &HeaderMap, secret: &str) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    for part in raw.split(';') {
        let part = part.trim();
        let Some(rest) = part.strip_prefix(SESSION_COOKIE) else {
            continue;
        };
        let Some(value) = rest.strip_prefix('=') else {
            continue;
        };
        let Some((id, signature)) = value.rsplit_once('.') else {
            continue;
        };
        if Uuid::parse_str(id).is_ok() && verify(secret, id, signature) {
            return Some(id.to_string());
        }
    }
    None
}

/// Anti-forgery token bound to a session.
pub fn csrf_token(secret: &str, session_id: &str) -> String {
    sign(secret, &format!("{CSRF_PREFIX}{session_id}"))
}

/// Constant-time check of a submitted anti-forgery token.
pub fn verify_csrf(secret: &str, session_id: &str, token: &str) -> bool {
    verify(secret, &format!("{CSRF_PREFIX}{session_id}"), token)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-secret";

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, value.parse().unwrap());
        headers
    }

    #[test]
    fn cookie_round_trips() {
        let id = Uuid::new_v4().to_string();
        let config = BedsideConfig {
            session_secret: SECRET.to_string(),
            ..test_config()
        };
        let cookie = build_cookie(&config, &id);
        let pair = cookie.split(';').next().unwrap();

        let headers = headers_with_cookie(pair);
        assert_eq!(extract(&headers, SECRET), Some(id));
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let id = Uuid::new_v4().to_string();
        let headers =
            headers_with_cookie(&format!("sid={}.{}", id, "00".repeat(32)));
        assert_eq!(extract(&headers, SECRET), None);
    }

    #[test]
    fn non_uuid_ids_are_rejected_even_when_signed() {
        let signed = sign(SECRET, "not-a-uuid");
        let headers = headers_with_cookie(&format!("sid=not-a-uuid.{}", signed));
        assert_eq!(extract(&headers, SECRET), None);
    }

    #[test]
    fn other_cookies_are_skipped() {
        let id = Uuid::new_v4().to_string();
        let pair = format!("sid={}.{}", id, sign(SECRET, &id));
        let headers = headers_with_cookie(&format!("theme=dark; {}; lang=en", pair));
        assert_eq!(extract(&headers, SECRET), Some(id));
    }

    #[test]
    fn csrf_token_is_bound_to_the_session() {
        let token = csrf_token(SECRET, "session-a");
        assert!(verify_csrf(SECRET, "session-a", &token));
        assert!(!verify_csrf(SECRET, "session-b", &token));
        assert!(!verify_csrf(SECRET, "session-a", "deadbeef"));
        assert!(!verify_csrf(SECRET, "session-a", "not-hex"));
    }

    fn test_config() -> BedsideConfig {
        BedsideConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            groq_api_key: "unused".to_string(),
            groq_base_url: "http://localhost:9".to_string(),
            model: "test-model".to_string(),
            completion_timeout: 5,
            completion_stream: false,
            session_secret: SECRET.to_string(),
            session_ttl: 1800,
            public: false,
            rate_limit_per_minute: 60,
            log_level: "info".to_string(),
        }
    }

    #[test]
    fn public_mode_marks_the_cookie_secure() {
        let config = BedsideConfig { public: true, ..test_config() };
        let cookie = build_cookie(&config, &Uuid::new_v4().to_string());
        assert!(cookie.ends_with("; Secure"));
        assert!(cookie.contains("HttpOnly"));
    }
}
