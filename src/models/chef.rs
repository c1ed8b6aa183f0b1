use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Chef {
    pub id: Uuid,
    pub name: String,
    pub bio: String,
    pub phone: String,
    pub address: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// What customers see on the share page.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PublicChef {
    pub id: Uuid,
    pub name: String,
    pub bio: String,
    pub phone: String,
    pub address: String,
}

/// Body for PUT /chef/profile.
#[derive(Debug, Deserialize)]
pub struct UpsertChefProfileRequest {
    pub name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    /// Pause or resume taking bookings; unchanged when omitted.
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct ShareLink {
    pub url: String,
}
