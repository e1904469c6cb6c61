use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::dashboard::dtos::*;
use crate::shared::constants::TOP_VOTED_LIMIT;

/// Service for public dashboard queries
pub struct DashboardService {
    pool: PgPool,
}

impl DashboardService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn report_counts(&self) -> Result<ReportCountsDto> {
        sqlx::query_as::<_, ReportCountsDto>(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE status = 'pending') AS pending,
                COUNT(*) FILTER (WHERE status = 'approved') AS approved,
                COUNT(*) FILTER (WHERE status = 'rejected') AS rejected
            FROM reports
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count reports by status: {:?}", e);
            AppError::Database(e)
        })
    }

    pub async fn user_count(&self) -> Result<UserCountDto> {
        let total_users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count users: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(UserCountDto { total_users })
    }

    /// Reports grouped by category name, largest group first
    pub async fn by_category(&self) -> Result<Vec<CategoryCountDto>> {
        sqlx::query_as::<_, CategoryCountDto>(
            r#"
            SELECT c.name AS category, COUNT(*) AS total
            FROM reports r
            LEFT JOIN categories c ON c.id = r.category_id
            GROUP BY c.name
            ORDER BY total DESC, c.name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to group reports by category: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Most voted reports
    pub async fn top_voted(&self) -> Result<Vec<ReportVotesDto>> {
        sqlx::query_as::<_, ReportVotesDto>(
            r#"
            SELECT title, votes
            FROM reports
            ORDER BY votes DESC, id ASC
            LIMIT $1
            "#,
        )
        .bind(TOP_VOTED_LIMIT)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list most voted reports: {:?}", e);
            AppError::Database(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{seed_category, seed_report, seed_user};

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a PostgreSQL DATABASE_URL"]
    async fn test_counts_cover_every_status(pool: PgPool) {
        let user = seed_user(&pool, "a@x.com").await;
        let category = seed_category(&pool).await;
        let approved = seed_report(&pool, user, category).await;
        seed_report(&pool, user, category).await;
        sqlx::query("UPDATE reports SET status = 'approved' WHERE id = $1")
            .bind(approved)
            .execute(&pool)
            .await
            .unwrap();

        let service = DashboardService::new(pool);
        let counts = service.report_counts().await.unwrap();
        assert_eq!((counts.pending, counts.approved, counts.rejected), (1, 1, 0));
        assert_eq!(service.user_count().await.unwrap().total_users, 1);

        let groups = service.by_category().await.unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].category.as_deref(), Some("Baches"));
        assert_eq!(groups[0].total, 2);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a PostgreSQL DATABASE_URL"]
    async fn test_top_voted_is_ordered_and_capped(pool: PgPool) {
        let user = seed_user(&pool, "a@x.com").await;
        let category = seed_category(&pool).await;
        for votes in 0..12 {
            let id = seed_report(&pool, user, category).await;
            sqlx::query("UPDATE reports SET votes = $2 WHERE id = $1")
                .bind(id)
                .bind(votes)
                .execute(&pool)
                .await
                .unwrap();
        }

        let top = DashboardService::new(pool).top_voted().await.unwrap();
        assert_eq!(top.len(), TOP_VOTED_LIMIT as usize);
        assert_eq!(top[0].votes, 11);
        assert!(top.windows(2).all(|w| w[0].votes >= w[1].votes));
    }
}
