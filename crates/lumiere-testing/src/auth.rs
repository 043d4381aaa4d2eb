//! Mock auth helpers for integration tests.
//!
//! Authenticated routes read the `lumiere_access_token` cookie. In tests,
//! `MockAuth` signs a real short-lived JWT with the test secret and returns
//! it as a `cookie` request header so no login round-trip is needed.

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::Serialize;
use uuid::Uuid;

use lumiere_auth_types::cookie::{ACCESS_TOKEN_EXP, LUMIERE_ACCESS_TOKEN};

#[derive(Serialize)]
struct TestClaims {
    sub: String,
    role: u8,
    exp: u64,
}

/// Configurable identity injected into test requests.
pub struct MockAuth {
    pub user_id: Uuid,
    pub user_role: u8,
}

impl MockAuth {
    pub fn new(user_id: Uuid, user_role: u8) -> Self {
        Self { user_id, user_role }
    }

    /// Identity with the participant role.
    pub fn participant(user_id: Uuid) -> Self {
        Self::new(user_id, 0)
    }

    /// Identity with the admin role.
    pub fn admin(user_id: Uuid) -> Self {
        Self::new(user_id, 1)
    }

    /// Sign an access token for this identity with `secret`.
    pub fn access_token(&self, secret: &str) -> String {
        let exp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs()
            + ACCESS_TOKEN_EXP;
        let claims = TestClaims {
            sub: self.user_id.to_string(),
            role: self.user_role,
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    /// Return headers as if the browser sent the access-token cookie.
    pub fn headers(&self, secret: &str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            HeaderName::from_static("cookie"),
            HeaderValue::from_str(&format!(
                "{LUMIERE_ACCESS_TOKEN}={}",
                self.access_token(secret)
            ))
            .unwrap(),
        );
        map
    }
}
