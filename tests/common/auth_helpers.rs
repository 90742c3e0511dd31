//! Authentication test helpers
//!
//! Request builders for the user endpoints and a registered-and-logged-in
//! fixture user.

use axum::{
    body::Body,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE, COOKIE},
        Method, Request,
    },
};
use serde_json::{json, Value};

use super::app::{TestApp, TestResponse};

pub const REGISTER_URI: &str = "/api/v1/users/register";
pub const LOGIN_URI: &str = "/api/v1/users/login";
pub const REFRESH_URI: &str = "/api/v1/users/refresh-token";
pub const LOGOUT_URI: &str = "/api/v1/users/logout";
pub const CURRENT_USER_URI: &str = "/api/v1/users/current-user";

const BOUNDARY: &str = "userauth-test-boundary";

/// Hand-assembled `multipart/form-data` body
#[derive(Default)]
pub struct MultipartBody {
    body: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn into_request(mut self, uri: &str) -> Request<Body> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(self.body))
            .expect("Failed to build multipart request")
    }
}

/// Registration form for the fixture user, without files
pub fn alice_fields() -> MultipartBody {
    MultipartBody::new()
        .text("fullName", "Alice A")
        .text("email", "alice@example.com")
        .text("username", "alice")
        .text("password", "secret1")
}

/// Registration form for the fixture user, with an avatar
pub fn alice_registration() -> MultipartBody {
    alice_fields().file("avatar", "avatar.png", "image/png", b"\x89PNG fake image")
}

pub fn alice_credentials() -> Value {
    json!({
        "username": "alice",
        "email": "alice@example.com",
        "password": "secret1"
    })
}

pub fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("Failed to build JSON request")
}

pub fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("Failed to build request")
}

/// Attach a cookie header to a request
pub fn with_cookie(mut request: Request<Body>, name: &str, value: &str) -> Request<Body> {
    let header = format!("{name}={value}")
        .parse()
        .expect("Invalid cookie header");
    request.headers_mut().insert(COOKIE, header);
    request
}

/// Attach a bearer token to a request
pub fn with_bearer(mut request: Request<Body>, token: &str) -> Request<Body> {
    let header = format!("Bearer {token}")
        .parse()
        .expect("Invalid authorization header");
    request.headers_mut().insert(AUTHORIZATION, header);
    request
}

pub async fn register_alice(app: &TestApp) -> TestResponse {
    app.send(alice_registration().into_request(REGISTER_URI)).await
}

pub async fn login_alice(app: &TestApp) -> TestResponse {
    app.send(json_request(Method::POST, LOGIN_URI, &alice_credentials()))
        .await
}

/// Tokens of a freshly registered and logged-in fixture user
pub struct SignedInUser {
    pub id: uuid::Uuid,
    pub access_token: String,
    pub refresh_token: String,
}

pub async fn sign_in_alice(app: &TestApp) -> SignedInUser {
    let registered = register_alice(app).await;
    assert_eq!(registered.status, 201, "registration failed: {:?}", registered.body);

    let login = login_alice(app).await;
    assert_eq!(login.status, 200, "login failed: {:?}", login.body);

    SignedInUser {
        id: login.body["data"]["user"]["id"]
            .as_str()
            .and_then(|id| id.parse().ok())
            .expect("login response carried no user id"),
        access_token: login.body["data"]["accessToken"]
            .as_str()
            .expect("no access token")
            .to_string(),
        refresh_token: login.body["data"]["refreshToken"]
            .as_str()
            .expect("no refresh token")
            .to_string(),
    }
}
