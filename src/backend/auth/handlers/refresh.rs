/**
 * Token Refresh Handler
 *
 * `POST /api/v1/users/refresh-token`. The refresh token is read from the
 * `refreshToken` cookie, or from a JSON body `{ "refreshToken": "..." }`
 * when no cookie is sent. A successful refresh rotates both tokens.
 */

use axum::{body::Bytes, extract::State, response::Json};
use axum_extra::extract::{cookie::CookieJar, WithRejection};

use crate::backend::auth::handlers::cookies::{cookie_value, with_tokens, REFRESH_TOKEN_COOKIE};
use crate::backend::auth::handlers::types::{RefreshRequest, TokenData};
use crate::backend::auth::service::AuthService;
use crate::backend::error::{ApiError, ApiResult};
use crate::shared::ApiResponse;

pub async fn refresh_access_token(
    State(auth): State<AuthService>,
    jar: CookieJar,
    WithRejection(body, _): WithRejection<Bytes, ApiError>,
) -> ApiResult<(CookieJar, Json<ApiResponse<TokenData>>)> {
    let presented = match cookie_value(&jar, REFRESH_TOKEN_COOKIE) {
        Some(token) => Some(token),
        None => token_from_body(&body)?,
    };

    let tokens = auth.refresh(presented.as_deref()).await?;
    let jar = with_tokens(jar, &tokens);

    let data = TokenData {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
    };
    Ok((jar, Json(ApiResponse::new(200, data, "Access token refreshed"))))
}

fn token_from_body(body: &[u8]) -> ApiResult<Option<String>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    let request: RefreshRequest = serde_json::from_slice(body)
        .map_err(|err| ApiError::bad_request("Invalid JSON body").with_errors(vec![err.to_string()]))?;
    Ok(request.refresh_token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_from_body() {
        assert_eq!(token_from_body(b"").unwrap(), None);
        assert_eq!(token_from_body(b"  \n").unwrap(), None);
        assert_eq!(token_from_body(b"{}").unwrap(), None);
        assert_eq!(
            token_from_body(br#"{"refreshToken":"abc"}"#).unwrap().as_deref(),
            Some("abc")
        );
        assert!(token_from_body(b"not json").is_err());
    }
}
