//! Authenticated user extracted from the identity cookie.
//!
//! The sign-in flow lives in the external auth service. It stores a signed
//! JWT as the `actix-identity` id; this module only verifies that token and
//! exposes its claims to handlers.

use std::future::{Ready, ready};

use actix_identity::IdentityExt;
use actix_web::{FromRequest, HttpRequest, dev::Payload, error::ErrorUnauthorized, web};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::types::{CompanyId, TypeConstraintError};
use crate::models::config::ServerConfig;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub sub: String,
    pub email: String,
    pub name: String,
    pub company_id: i32,
    pub roles: Vec<String>,
    pub exp: usize,
}

impl AuthenticatedUser {
    /// Tenant the user acts for.
    pub fn company(&self) -> Result<CompanyId, TypeConstraintError> {
        CompanyId::new(self.company_id)
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn to_jwt(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    pub fn from_jwt(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        let data = decode::<AuthenticatedUser>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(data.claims)
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_user(req))
    }
}

fn extract_user(req: &HttpRequest) -> Result<AuthenticatedUser, actix_web::Error> {
    let identity = req
        .get_identity()
        .map_err(|_| ErrorUnauthorized("not signed in"))?;
    let token = identity
        .id()
        .map_err(|_| ErrorUnauthorized("not signed in"))?;

    let config = req
        .app_data::<web::Data<ServerConfig>>()
        .ok_or_else(|| ErrorUnauthorized("server configuration missing"))?;

    AuthenticatedUser::from_jwt(&token, &config.secret).map_err(|err| {
        log::warn!("Rejected identity token: {err}");
        ErrorUnauthorized("invalid token")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "42".to_string(),
            email: "lead@example.com".to_string(),
            name: "Lead".to_string(),
            company_id: 7,
            roles: vec!["staffing".to_string()],
            exp: 4_102_444_800,
        }
    }

    #[test]
    fn jwt_round_trip() {
        let user = sample_user();
        let token = user.to_jwt("secret").unwrap();
        assert_eq!(AuthenticatedUser::from_jwt(&token, "secret").unwrap(), user);
    }

    #[test]
    fn jwt_with_wrong_secret_is_rejected() {
        let token = sample_user().to_jwt("secret").unwrap();
        assert!(AuthenticatedUser::from_jwt(&token, "other").is_err());
    }

    #[test]
    fn role_lookup() {
        let user = sample_user();
        assert!(user.has_role("staffing"));
        assert!(!user.has_role("staffing_admin"));
        assert_eq!(user.company().unwrap().get(), 7);
    }
}
