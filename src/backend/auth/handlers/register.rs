/**
 * Registration Handler
 *
 * `POST /api/v1/users/register`, a `multipart/form-data` request with text
 * fields `fullName`, `email`, `username`, `password` and file fields
 * `avatar` (required) and `coverImage` (optional).
 *
 * File parts are staged under `UPLOAD_TEMP_DIR` while the form is read.
 * The staged files belong to the `RegistrationForm` and are deleted when it
 * is dropped, after the upload or on any earlier failure.
 *
 * # Example Response
 *
 * ```json
 * {
 *   "status": 201,
 *   "data": { "id": "...", "username": "alice", "email": "alice@example.com", ... },
 *   "message": "User registered successfully. Now you can login",
 *   "success": true
 * }
 * ```
 */

use std::path::Path;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Json,
};
use axum_extra::extract::WithRejection;

use crate::backend::auth::handlers::types::RegistrationForm;
use crate::backend::auth::users::PublicUser;
use crate::backend::error::{ApiError, ApiResult, GENERIC_INTERNAL_MESSAGE};
use crate::backend::media::StagedFile;
use crate::backend::server::state::AppState;
use crate::shared::ApiResponse;

/// Registration handler
///
/// # Errors
///
/// * `400 Bad Request` - Missing field, invalid email, missing avatar, failed avatar upload
/// * `409 Conflict` - Username or email already registered
/// * `500 Internal Server Error` - Staging, hashing or persistence failure
pub async fn register(
    State(state): State<AppState>,
    WithRejection(mut multipart, _): WithRejection<Multipart, ApiError>,
) -> ApiResult<(StatusCode, Json<ApiResponse<PublicUser>>)> {
    let form = read_registration_form(&mut multipart, &state.config.upload_temp_dir).await?;
    let user = state.auth.register(form).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(
            StatusCode::CREATED.as_u16(),
            user,
            "User registered successfully. Now you can login",
        )),
    ))
}

/// Decode the multipart body, staging file parts as they arrive
async fn read_registration_form(
    multipart: &mut Multipart,
    upload_dir: &Path,
) -> ApiResult<RegistrationForm> {
    let mut form = RegistrationForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "avatar" | "coverImage" => {
                let file_name = field.file_name().map(str::to_owned);
                let content_type = field.content_type().map(str::to_owned);
                let bytes = field.bytes().await?;

                // An empty file input is the same as no file
                if bytes.is_empty() {
                    continue;
                }

                let staged = StagedFile::stage(
                    upload_dir,
                    file_name.as_deref(),
                    content_type.as_deref(),
                    &bytes,
                )
                .await
                .map_err(|err| ApiError::internal_with(GENERIC_INTERNAL_MESSAGE, err))?;

                if name == "avatar" {
                    form.avatar = Some(staged);
                } else {
                    form.cover_image = Some(staged);
                }
            }
            "fullName" => form.full_name = Some(field.text().await?),
            "email" => form.email = Some(field.text().await?),
            "username" => form.username = Some(field.text().await?),
            "password" => form.password = Some(field.text().await?),
            other => tracing::debug!(field = %other, "Ignoring unknown form field"),
        }
    }

    Ok(form)
}
