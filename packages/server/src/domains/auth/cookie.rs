//! Session cookie lifecycle.
//!
//! One cookie carries the session token. It is created on login/registration
//! and overwritten with an empty, `Max-Age=0` copy on logout.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use super::jwt::TOKEN_TTL_SECONDS;

pub const SESSION_COOKIE_NAME: &str = "admin_token";

/// Builds session cookies with the attributes for the current environment
#[derive(Debug, Clone, Copy)]
pub struct SessionCookies {
    secure: bool,
}

impl SessionCookies {
    /// `secure` should be true in production only
    pub fn new(secure: bool) -> Self {
        Self { secure }
    }

    pub fn is_secure(&self) -> bool {
        self.secure
    }

    /// Cookie carrying a freshly issued token
    pub fn issue(&self, token: String) -> Cookie<'static> {
        self.build(token, TOKEN_TTL_SECONDS)
    }

    /// Cookie instructing the browser to drop the session
    pub fn clear(&self) -> Cookie<'static> {
        self.build(String::new(), 0)
    }

    fn build(&self, value: String, max_age_seconds: i64) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE_NAME, value))
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .path("/")
            .max_age(Duration::seconds(max_age_seconds))
            .build()
    }
}

/// Read the session token from the request cookies
pub fn session_token(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE_NAME)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header::COOKIE, HeaderMap, HeaderValue};

    #[test]
    fn test_issue_sets_session_attributes() {
        let cookie = SessionCookies::new(false).issue("tok".to_string()).to_string();

        assert!(cookie.starts_with("admin_token=tok"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=604800"));
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn test_secure_in_production() {
        let cookie = SessionCookies::new(true).issue("tok".to_string()).to_string();
        assert!(cookie.contains("Secure"));
    }

    #[test]
    fn test_clear_expires_immediately() {
        let cookie = SessionCookies::new(false).clear().to_string();

        assert!(cookie.starts_with("admin_token=;"));
        assert!(cookie.contains("Max-Age=0"));
        assert!(cookie.contains("HttpOnly"));
    }

    #[test]
    fn test_session_token_from_jar() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; admin_token=abc.def.ghi"),
        );
        let jar = CookieJar::from_headers(&headers);
        assert_eq!(session_token(&jar).as_deref(), Some("abc.def.ghi"));

        let empty = CookieJar::from_headers(&HeaderMap::new());
        assert_eq!(session_token(&empty), None);
    }

    #[test]
    fn test_empty_cookie_value_is_no_session() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("admin_token="));
        let jar = CookieJar::from_headers(&headers);
        assert_eq!(session_token(&jar), None);
    }
}
