use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Report counts per status
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ReportCountsDto {
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserCountDto {
    pub total_users: i64,
}

/// Number of reports filed under a category
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CategoryCountDto {
    /// `None` for reports whose category no longer resolves
    pub category: Option<String>,
    pub total: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ReportVotesDto {
    pub title: String,
    pub votes: i32,
}
