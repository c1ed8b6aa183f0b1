use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::auth::{AuthenticatedUser, ChefId, Claims, UserRole},
};

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or((StatusCode::UNAUTHORIZED, "Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or((StatusCode::UNAUTHORIZED, "Invalid Authorization header format"))?;

        let secret = parts
            .extensions
            .get::<JwtSecret>()
            .ok_or((StatusCode::INTERNAL_SERVER_ERROR, "JWT secret not configured"))?;

        decode_access_token(token, &secret.0)
            .map_err(|_| (StatusCode::UNAUTHORIZED, "Invalid or expired token"))
    }
}

/// Extension type to carry the JWT secret through request extensions.
#[derive(Clone)]
pub struct JwtSecret(pub String);

pub fn decode_access_token(token: &str, secret: &str) -> Result<AuthenticatedUser, anyhow::Error> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    let data = decode::<Claims>(token, &key, &validation)?;
    let claims = data.claims;

    Ok(AuthenticatedUser {
        user_id: claims.sub.parse()?,
        role: claims.role,
    })
}

/// Sign an access token. Production tokens come from the auth provider;
/// this is used by the demo seeder and tests.
pub fn issue_access_token(
    secret: &str,
    user_id: Uuid,
    role: UserRole,
    ttl: Duration,
) -> Result<String, anyhow::Error> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        role,
        exp: (now + ttl).timestamp() as usize,
        iat: now.timestamp() as usize,
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

/// Chef-side routes act on the caller's own data; the token subject is the chef id.
pub fn require_chef(user: &AuthenticatedUser) -> AppResult<ChefId> {
    match user.role {
        UserRole::Chef => Ok(ChefId(user.user_id)),
        _ => Err(AppError::Forbidden("Chef account required")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_tokens_decode_back() {
        let id = Uuid::new_v4();
        let token = issue_access_token("secret", id, UserRole::Chef, Duration::hours(1)).unwrap();

        let user = decode_access_token(&token, "secret").unwrap();
        assert_eq!(user.user_id, id);
        assert_eq!(user.role, UserRole::Chef);
        assert!(decode_access_token(&token, "other-secret").is_err());
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let token =
            issue_access_token("secret", Uuid::new_v4(), UserRole::Chef, Duration::hours(-2))
                .unwrap();
        assert!(decode_access_token(&token, "secret").is_err());
    }

    #[test]
    fn only_chefs_pass_the_chef_guard() {
        let id = Uuid::new_v4();
        let chef = AuthenticatedUser { user_id: id, role: UserRole::Chef };
        let customer = AuthenticatedUser { user_id: id, role: UserRole::Customer };

        assert_eq!(require_chef(&chef).unwrap(), ChefId(id));
        assert!(matches!(require_chef(&customer), Err(AppError::Forbidden(_))));
    }
}
