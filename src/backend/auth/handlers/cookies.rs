//! Session cookies
//!
//! Both tokens travel as `HttpOnly`, `Secure` cookies scoped to `/`. They
//! carry no `Max-Age`; the `exp` claim inside each JWT bounds its validity.

use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::backend::auth::sessions::TokenPair;

pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

fn token_cookie(name: &'static str, value: String) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .secure(true)
        .path("/")
        .build()
}

/// Add both token cookies to the jar
pub fn with_tokens(jar: CookieJar, tokens: &TokenPair) -> CookieJar {
    jar.add(token_cookie(ACCESS_TOKEN_COOKIE, tokens.access_token.clone()))
        .add(token_cookie(REFRESH_TOKEN_COOKIE, tokens.refresh_token.clone()))
}

fn removal_cookie(name: &'static str) -> Cookie<'static> {
    let mut cookie = token_cookie(name, String::new());
    cookie.make_removal();
    cookie
}

/// Expire both token cookies
///
/// Removal cookies are always emitted, whether or not the request carried
/// the cookies.
pub fn without_tokens(jar: CookieJar) -> CookieJar {
    jar.add(removal_cookie(ACCESS_TOKEN_COOKIE))
        .add(removal_cookie(REFRESH_TOKEN_COOKIE))
}

/// Non-empty cookie value, if the cookie is present
pub fn cookie_value(jar: &CookieJar, name: &str) -> Option<String> {
    jar.get(name)
        .map(|cookie| cookie.value().trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::SET_COOKIE;
    use axum::response::IntoResponse;

    #[test]
    fn test_token_cookies_are_http_only_and_secure() {
        let tokens = TokenPair {
            access_token: "access".into(),
            refresh_token: "refresh".into(),
        };
        let response = with_tokens(CookieJar::new(), &tokens).into_response();
        let cookies: Vec<String> = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .map(|value| value.to_str().unwrap().to_string())
            .collect();

        assert_eq!(cookies.len(), 2);
        for cookie in &cookies {
            assert!(cookie.contains("HttpOnly"), "{cookie}");
            assert!(cookie.contains("Secure"), "{cookie}");
            assert!(cookie.contains("Path=/"), "{cookie}");
        }
        assert!(cookies.iter().any(|c| c.starts_with("accessToken=access")));
        assert!(cookies.iter().any(|c| c.starts_with("refreshToken=refresh")));
    }

    #[test]
    fn test_without_tokens_expires_both_cookies() {
        let response = without_tokens(CookieJar::new()).into_response();
        let cookies: Vec<&str> = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .map(|value| value.to_str().unwrap())
            .collect();

        assert_eq!(cookies.len(), 2);
        assert!(cookies.iter().all(|c| c.contains("Max-Age=0")));
    }

    #[test]
    fn test_blank_cookie_is_absent() {
        let jar = CookieJar::new().add(Cookie::new(REFRESH_TOKEN_COOKIE, " "));
        assert_eq!(cookie_value(&jar, REFRESH_TOKEN_COOKIE), None);
        assert_eq!(cookie_value(&jar, ACCESS_TOKEN_COOKIE), None);
    }
}
