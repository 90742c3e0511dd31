/**
 * Login Handler
 *
 * `POST /api/v1/users/login` with a JSON body `{ username, email, password }`.
 *
 * On success both tokens are set as cookies and also returned in the body,
 * so non-browser clients can keep them. The HTTP status is 200 while the
 * envelope reports 201.
 *
 * # Security
 *
 * - Passwords are verified with bcrypt
 * - A failed login sets no cookies and leaves the stored refresh token alone
 * - Passwords and hashes are never logged or returned
 */

use axum::{extract::State, http::StatusCode, response::Json};
use axum_extra::extract::cookie::CookieJar;

use crate::backend::auth::handlers::cookies::with_tokens;
use crate::backend::auth::handlers::types::{ApiJson, LoginData, LoginRequest};
use crate::backend::auth::service::AuthService;
use crate::backend::error::ApiResult;
use crate::shared::ApiResponse;

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - Identifiers or password missing
/// * `404 Not Found` - No user with that username or email
/// * `401 Unauthorized` - Password does not match
/// * `500 Internal Server Error` - Token generation failed
///
/// # Example Request
///
/// ```http
/// POST /api/v1/users/login HTTP/1.1
/// Content-Type: application/json
///
/// { "username": "alice", "email": "alice@example.com", "password": "secret1" }
/// ```
pub async fn login(
    State(auth): State<AuthService>,
    jar: CookieJar,
    ApiJson(request): ApiJson<LoginRequest>,
) -> ApiResult<(StatusCode, CookieJar, Json<ApiResponse<LoginData>>)> {
    let outcome = auth.login(request).await?;
    let jar = with_tokens(jar, &outcome.tokens);

    let data = LoginData {
        user: outcome.user,
        access_token: outcome.tokens.access_token,
        refresh_token: outcome.tokens.refresh_token,
    };

    Ok((
        StatusCode::OK,
        jar,
        Json(ApiResponse::new(
            StatusCode::CREATED.as_u16(),
            data,
            "User logged in successfully",
        )),
    ))
}
