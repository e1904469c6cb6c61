use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::features::auth::model::Role;

/// Database model for a registered user
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub photo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
