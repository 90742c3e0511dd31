/**
 * Get Current User Handler
 *
 * `GET /api/v1/users/current-user`. Runs behind the auth middleware, which
 * has already resolved the access token to a sanitized user.
 */

use axum::response::Json;

use crate::backend::auth::users::PublicUser;
use crate::backend::middleware::AuthUser;
use crate::shared::ApiResponse;

pub async fn current_user(AuthUser(user): AuthUser) -> Json<ApiResponse<PublicUser>> {
    Json(ApiResponse::new(200, user, "Current user fetched successfully"))
}
