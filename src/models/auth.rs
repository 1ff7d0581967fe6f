//! Authenticated user claims extracted from the session JWT.
//!
//! The auth service owns sign-in and token issuance; this app only decodes
//! the claims carried by the identity cookie. Organization scoping and
//! role checks everywhere else key off this struct.

use std::future::{Ready, ready};

use actix_identity::Identity;
use actix_web::error::ErrorUnauthorized;
use actix_web::{Error, FromRequest, HttpRequest, dev::Payload, web};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::models::config::ServerConfig;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// Subject: the user's id at the auth service.
    pub sub: String,
    pub email: String,
    pub name: String,
    /// Organization the user belongs to; every query is scoped by it.
    pub org_id: i32,
    pub roles: Vec<String>,
    pub exp: usize,
}

impl AuthenticatedUser {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

fn decode_user(token: &str, secret: &str) -> Option<AuthenticatedUser> {
    decode::<AuthenticatedUser>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .ok()
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let identity = Identity::from_request(req, payload).into_inner();
        let config = req.app_data::<web::Data<ServerConfig>>();

        let user = match (identity, config) {
            (Ok(identity), Some(config)) => identity
                .id()
                .ok()
                .and_then(|token| decode_user(&token, &config.secret)),
            _ => None,
        };

        match user {
            Some(user) => ready(Ok(user)),
            None => ready(Err(ErrorUnauthorized("unauthorized"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};

    #[test]
    fn decode_roundtrip() {
        let user = AuthenticatedUser {
            sub: "42".into(),
            email: "admin@example.com".into(),
            name: "Admin".into(),
            org_id: 7,
            roles: vec!["isp".into(), "isp_admin".into()],
            exp: (chrono::Utc::now().timestamp() + 3600) as usize,
        };
        let token = encode(
            &Header::default(),
            &user,
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();

        let decoded = decode_user(&token, "secret").unwrap();
        assert_eq!(decoded.email, "admin@example.com");
        assert_eq!(decoded.org_id, 7);
        assert!(decoded.has_role("isp_admin"));
        assert!(!decoded.has_role("isp_agent"));

        assert!(decode_user(&token, "other-secret").is_none());
    }
}
