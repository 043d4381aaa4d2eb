//! Cookie-based identity extractor.

use axum::extract::FromRequestParts;
use axum_extra::extract::cookie::CookieJar;
use http::StatusCode;
use http::request::Parts;
use uuid::Uuid;

use crate::cookie::LUMIERE_ACCESS_TOKEN;
use crate::token::validate_access_token;

/// Router state that can hand out the JWT signing secret.
///
/// Implemented by the service's `AppState` so [`Identity`] can validate the
/// access-token cookie without a concrete state type.
pub trait JwtSecretProvider {
    fn jwt_secret(&self) -> &str;
}

/// User identity extracted from the `lumiere_access_token` cookie.
///
/// Returns 401 if the cookie is absent, expired, or fails validation.
/// Role enforcement (403) is done by handlers after extraction.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub user_role: u8,
}

impl<S> FromRequestParts<S> for Identity
where
    S: JwtSecretProvider + Send + Sync,
{
    type Rejection = StatusCode;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // In Rust 1.82+ precise capturing, `async fn` captures lifetimes differently,
    // causing E0195. Fix: extract values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let info = CookieJar::from_headers(&parts.headers)
            .get(LUMIERE_ACCESS_TOKEN)
            .and_then(|cookie| validate_access_token(cookie.value(), state.jwt_secret()).ok());

        async move {
            let info = info.ok_or(StatusCode::UNAUTHORIZED)?;
            Ok(Self {
                user_id: info.user_id,
                user_role: info.user_role,
            })
        }
    }
}
