/**
 * Cookie Handling
 *
 * Builds the `Set-Cookie` header values for the session and CSRF cookies
 * and extracts named values from an incoming `Cookie` header. Both
 * cookies are HttpOnly, Secure, and SameSite=None so a cross-site
 * frontend can use them; the CSRF token itself reaches the frontend
 * through the `GET /csrf` response body, not by reading the cookie.
 */

use axum::http::header::COOKIE;
use axum::http::HeaderMap;

/// Name of the session cookie holding the JWT.
pub const SESSION_COOKIE: &str = "token";

/// Name of the CSRF cookie for the double-submit check.
pub const CSRF_COOKIE: &str = "csrf_token";

fn build(name: &str, value: &str, domain: &str, max_age: Option<u64>) -> String {
    let mut cookie = format!("{}={}; Path=/; HttpOnly; Secure; SameSite=None", name, value);
    if !domain.is_empty() {
        cookie.push_str("; Domain=");
        cookie.push_str(domain);
    }
    if let Some(secs) = max_age {
        cookie.push_str(&format!("; Max-Age={}", secs));
    }
    cookie
}

/// Session cookie carrying a freshly issued token.
pub fn session_cookie(token: &str, domain: &str, max_age_secs: u64) -> String {
    build(SESSION_COOKIE, token, domain, Some(max_age_secs))
}

/// Expired session cookie, set on logout.
pub fn clear_session_cookie(domain: &str) -> String {
    build(SESSION_COOKIE, "", domain, Some(0))
}

/// CSRF cookie for the double-submit check. Session-scoped (no Max-Age).
pub fn csrf_cookie(token: &str, domain: &str) -> String {
    build(CSRF_COOKIE, token, domain, None)
}

/// Extract a named cookie value from the request headers.
pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    let raw = headers.get(COOKIE)?.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then_some(value)
    })
}
