use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Chef,
    Customer,
    Admin,
}

/// Claims of the access token issued by the hosted auth provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user UUID; for chefs this is also the chef id
    pub role: UserRole,
    pub exp: usize,
    pub iat: usize,
}

/// Extracted from the validated JWT, available via the Axum extractor
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub role: UserRole,
}

/// Identity of the chef performing a chef-side operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChefId(pub Uuid);
