/**
 * Authentication Handler Types
 *
 * Request and response payloads used by the user endpoints. Request fields
 * are `Option` so that an absent field and a blank field are both reported
 * by validation as "required", rather than failing JSON decoding.
 */

use axum::extract::FromRequest;
use serde::{Deserialize, Serialize};

use crate::backend::auth::users::PublicUser;
use crate::backend::error::ApiError;
use crate::backend::media::StagedFile;

/// Login request
///
/// `username` and `email` are the identifiers; which of them must be present
/// depends on the configured `LoginIdentifierPolicy`.
#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Body form of a refresh request, used when no cookie is sent
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: Option<String>,
}

/// Registration form decoded from `multipart/form-data`
///
/// File parts are staged to disk as they are read; an empty or missing
/// part is `None`.
#[derive(Debug, Default)]
pub struct RegistrationForm {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub avatar: Option<StagedFile>,
    pub cover_image: Option<StagedFile>,
}

/// Login response payload
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub user: PublicUser,
    pub access_token: String,
    pub refresh_token: String,
}

/// Refresh response payload
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TokenData {
    pub access_token: String,
    pub refresh_token: String,
}

/// JSON body extractor whose rejection is the failure envelope
///
/// Malformed JSON becomes a 400 `Invalid JSON body` instead of axum's
/// plain-text rejection.
#[derive(FromRequest, Debug)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
