//! Vote membership and the denormalized `reports.votes` counter.
//!
//! `report_votes` is the source of truth; `reports.votes` must equal the number
//! of membership rows for the report. Both are changed in the same transaction,
//! and the counter only moves by relative deltas issued as single statements.

use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::reports::dtos::{VoteStateDto, VoteToggleDto};

/// Service for report voting
pub struct VoteService {
    pool: PgPool,
}

impl VoteService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Add the caller's vote if absent, remove it if present.
    ///
    /// A concurrent toggle by the same user that loses the race on the
    /// `(user_id, report_id)` primary key is reported as a conflict.
    pub async fn toggle(&self, user_id: i64, report_id: i64) -> Result<VoteToggleDto> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin vote transaction: {:?}", e);
            AppError::Database(e)
        })?;

        let active: Option<bool> = sqlx::query_scalar("SELECT active FROM reports WHERE id = $1")
            .bind(report_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to load report for vote: {:?}", e);
                AppError::Database(e)
            })?;

        if active != Some(true) {
            return Err(AppError::NotFound("Reporte no encontrado".to_string()));
        }

        let removed = sqlx::query("DELETE FROM report_votes WHERE user_id = $1 AND report_id = $2")
            .bind(user_id)
            .bind(report_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to remove vote: {:?}", e);
                AppError::Database(e)
            })?
            .rows_affected()
            > 0;

        let (liked, counter_sql) = if removed {
            (
                false,
                "UPDATE reports SET votes = GREATEST(votes - 1, 0) WHERE id = $1 RETURNING votes",
            )
        } else {
            let inserted = sqlx::query(
                r#"
                INSERT INTO report_votes (user_id, report_id)
                VALUES ($1, $2)
                ON CONFLICT (user_id, report_id) DO NOTHING
                "#,
            )
            .bind(user_id)
            .bind(report_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to add vote: {:?}", e);
                AppError::Database(e)
            })?
            .rows_affected();

            if inserted == 0 {
                tracing::warn!(user_id, report_id, "Concurrent vote toggle rejected");
                return Err(AppError::Conflict(
                    "El voto ya está siendo procesado".to_string(),
                ));
            }

            (
                true,
                "UPDATE reports SET votes = votes + 1 WHERE id = $1 RETURNING votes",
            )
        };

        let total: i32 = sqlx::query_scalar(counter_sql)
            .bind(report_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to adjust vote counter: {:?}", e);
                AppError::Database(e)
            })?;

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit vote: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(user_id, report_id, liked, total, "Vote toggled");

        Ok(VoteToggleDto { liked, total })
    }

    /// Vote count of an active report and whether `user_id` voted on it
    pub async fn state(&self, report_id: i64, user_id: i64) -> Result<VoteStateDto> {
        let row: Option<(i32, bool)> = sqlx::query_as(
            r#"
            SELECT
                r.votes,
                EXISTS(
                    SELECT 1 FROM report_votes v
                    WHERE v.report_id = r.id AND v.user_id = $2
                )
            FROM reports r
            WHERE r.id = $1 AND r.active = TRUE
            "#,
        )
        .bind(report_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load vote state: {:?}", e);
            AppError::Database(e)
        })?;

        let (total, liked) =
            row.ok_or_else(|| AppError::NotFound("Reporte no encontrado".to_string()))?;

        Ok(VoteStateDto { total, liked })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{seed_category, seed_report, seed_user};
    use std::sync::Arc;
    use tokio::task::JoinSet;

    async fn counter_matches_membership(pool: &PgPool, report_id: i64) -> (i32, i64) {
        let votes: i32 = sqlx::query_scalar("SELECT votes FROM reports WHERE id = $1")
            .bind(report_id)
            .fetch_one(pool)
            .await
            .unwrap();
        let members: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM report_votes WHERE report_id = $1")
                .bind(report_id)
                .fetch_one(pool)
                .await
                .unwrap();
        (votes, members)
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a PostgreSQL DATABASE_URL"]
    async fn test_toggle_twice_restores_state(pool: PgPool) {
        let user = seed_user(&pool, "a@x.com").await;
        let category = seed_category(&pool).await;
        let report = seed_report(&pool, user, category).await;
        let votes = VoteService::new(pool.clone());

        let first = votes.toggle(user, report).await.unwrap();
        assert!(first.liked);
        assert_eq!(first.total, 1);

        let second = votes.toggle(user, report).await.unwrap();
        assert!(!second.liked);
        assert_eq!(second.total, 0);

        let state = votes.state(report, user).await.unwrap();
        assert_eq!(state.total, 0);
        assert!(!state.liked);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a PostgreSQL DATABASE_URL"]
    async fn test_counter_tracks_membership_across_users(pool: PgPool) {
        let category = seed_category(&pool).await;
        let owner = seed_user(&pool, "owner@x.com").await;
        let report = seed_report(&pool, owner, category).await;
        let votes = VoteService::new(pool.clone());

        let mut users = Vec::new();
        for i in 0..5 {
            users.push(seed_user(&pool, &format!("voter{}@x.com", i)).await);
        }

        let votes = Arc::new(votes);
        let mut tasks = JoinSet::new();
        for &user in &users {
            let votes = Arc::clone(&votes);
            tasks.spawn(async move { votes.toggle(user, report).await });
        }
        while let Some(result) = tasks.join_next().await {
            assert!(result.unwrap().unwrap().liked);
        }
        assert_eq!(counter_matches_membership(&pool, report).await, (5, 5));

        votes.toggle(users[0], report).await.unwrap();
        votes.toggle(users[3], report).await.unwrap();
        assert_eq!(counter_matches_membership(&pool, report).await, (3, 3));

        assert!(votes.state(report, users[1]).await.unwrap().liked);
        assert!(!votes.state(report, users[0]).await.unwrap().liked);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a PostgreSQL DATABASE_URL"]
    async fn test_counter_never_goes_negative(pool: PgPool) {
        let user = seed_user(&pool, "a@x.com").await;
        let category = seed_category(&pool).await;
        let report = seed_report(&pool, user, category).await;
        let votes = VoteService::new(pool.clone());

        votes.toggle(user, report).await.unwrap();
        // Drift the cached counter below the membership count
        sqlx::query("UPDATE reports SET votes = 0 WHERE id = $1")
            .bind(report)
            .execute(&pool)
            .await
            .unwrap();

        let removed = votes.toggle(user, report).await.unwrap();
        assert!(!removed.liked);
        assert_eq!(removed.total, 0);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a PostgreSQL DATABASE_URL"]
    async fn test_missing_or_inactive_report_is_not_found(pool: PgPool) {
        let user = seed_user(&pool, "a@x.com").await;
        let category = seed_category(&pool).await;
        let report = seed_report(&pool, user, category).await;
        let votes = VoteService::new(pool.clone());

        assert!(matches!(
            votes.toggle(user, report + 1000).await,
            Err(AppError::NotFound(_))
        ));

        sqlx::query("UPDATE reports SET active = FALSE WHERE id = $1")
            .bind(report)
            .execute(&pool)
            .await
            .unwrap();
        assert!(matches!(
            votes.toggle(user, report).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            votes.state(report, user).await,
            Err(AppError::NotFound(_))
        ));
    }
}
