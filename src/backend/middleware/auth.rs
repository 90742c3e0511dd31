/**
 * Authentication Middleware
 *
 * This module protects routes that require a signed-in user. The access
 * token is read from the `accessToken` cookie, or from an
 * `Authorization: Bearer <token>` header when no cookie is sent, resolved to
 * a sanitized user through `AuthService::authenticate`, and attached to the
 * request extensions for handlers to pick up with `AuthUser`.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use crate::backend::auth::handlers::cookies::{cookie_value, ACCESS_TOKEN_COOKIE};
use crate::backend::auth::service::AuthService;
use crate::backend::auth::users::PublicUser;
use crate::backend::error::ApiError;

/// Authenticated user attached by `auth_middleware`
#[derive(Clone, Debug)]
pub struct AuthenticatedUser(pub PublicUser);

/// Read the access token from the cookie, falling back to a bearer header
pub fn access_token_from(headers: &HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    cookie_value(&jar, ACCESS_TOKEN_COOKIE).or_else(|| {
        headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
    })
}

/// Authentication middleware
///
/// Returns 401 `Unauthorized request` if no token is presented and 401
/// `Invalid access token` if the token fails verification or names a user
/// that no longer exists.
pub async fn auth_middleware(
    State(auth): State<AuthService>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = access_token_from(request.headers())
        .ok_or_else(|| ApiError::unauthorized("Unauthorized request"))?;

    let user = auth.authenticate(&token).await?;
    tracing::debug!(user_id = %user.id, "Request authenticated");

    request.extensions_mut().insert(AuthenticatedUser(user));
    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user
///
/// Only valid on routes wrapped by `auth_middleware`; elsewhere it rejects
/// with 401.
#[derive(Clone, Debug)]
pub struct AuthUser(pub PublicUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let AuthenticatedUser(user) = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                ApiError::unauthorized("Unauthorized request")
            })?;

        Ok(AuthUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header::COOKIE, HeaderValue, StatusCode};

    #[test]
    fn test_cookie_wins_over_bearer_header() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("accessToken=from-cookie; other=1"));
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));
        assert_eq!(access_token_from(&headers).as_deref(), Some("from-cookie"));
    }

    #[test]
    fn test_bearer_header_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));
        assert_eq!(access_token_from(&headers).as_deref(), Some("from-header"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));
        assert_eq!(access_token_from(&headers), None);
    }

    #[tokio::test]
    async fn test_extractor_without_middleware_is_unauthorized() {
        let request = axum::http::Request::builder()
            .uri("http://example.com")
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();

        let rejection = AuthUser::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert_eq!(rejection.status_code(), StatusCode::UNAUTHORIZED);
    }
}
