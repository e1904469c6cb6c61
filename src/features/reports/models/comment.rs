use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for a comment on a report
#[derive(Debug, Clone, FromRow)]
pub struct Comment {
    pub id: i64,
    pub report_id: i64,
    pub user_id: i64,
    pub comment: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Comment joined with its author's name
#[derive(Debug, Clone, FromRow)]
pub struct CommentWithAuthor {
    pub id: i64,
    pub user_id: i64,
    pub author_name: Option<String>,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}
