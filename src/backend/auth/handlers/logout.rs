/**
 * Logout Handler
 *
 * `POST /api/v1/users/logout`. Runs behind the auth middleware. Clears the
 * stored refresh token and expires both cookies.
 */

use axum::{extract::State, response::Json};
use axum_extra::extract::cookie::CookieJar;
use serde_json::{json, Value};

use crate::backend::auth::handlers::cookies::without_tokens;
use crate::backend::auth::service::AuthService;
use crate::backend::error::ApiResult;
use crate::backend::middleware::AuthUser;
use crate::shared::ApiResponse;

pub async fn logout(
    State(auth): State<AuthService>,
    AuthUser(user): AuthUser,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Json<ApiResponse<Value>>)> {
    auth.logout(user.id).await?;
    Ok((
        without_tokens(jar),
        Json(ApiResponse::new(200, json!({}), "User logged out")),
    ))
}
