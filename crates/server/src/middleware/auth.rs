//! Admin authentication extractor.
//!
//! The admin pages are guarded by an optional HTTP Basic password
//! (`MINIMART_ADMIN_PASSWORD`). When no password is configured the guard
//! lets every request through; startup logs a warning for that mode.

use axum::{
    extract::FromRequestParts,
    http::{HeaderValue, StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use secrecy::ExposeSecret;

use crate::state::AppState;

/// Extractor that requires the admin password when one is configured.
///
/// # Example
///
/// ```rust,ignore
/// async fn admin_handler(_admin: RequireAdmin) -> impl IntoResponse {
///     // only reached with valid credentials (or no password configured)
/// }
/// ```
pub struct RequireAdmin;

/// Rejection challenging the client for Basic credentials.
pub struct AdminAuthRejection;

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            [(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static("Basic realm=\"minimart admin\""),
            )],
            "Unauthorized",
        )
            .into_response()
    }
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(password) = state.config().admin_password.as_ref() else {
            // No password configured: admin runs open (dev mode)
            return Ok(Self);
        };

        let authorized = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(basic_password)
            .is_some_and(|given| given == password.expose_secret());

        if authorized {
            Ok(Self)
        } else {
            Err(AdminAuthRejection)
        }
    }
}

/// Extract the password from a `Basic` authorization header value.
///
/// The username half of the credentials is ignored; only the password is
/// checked.
fn basic_password(header_value: &str) -> Option<String> {
    let encoded = header_value.strip_prefix("Basic ")?;
    let decoded = BASE64.decode(encoded.trim()).ok()?;
    let credentials = String::from_utf8(decoded).ok()?;
    let (_username, password) = credentials.split_once(':')?;
    Some(password.to_string())
}
