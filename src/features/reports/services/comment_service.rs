use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::reports::dtos::{CommentResponseDto, CreatedCommentDto};
use crate::features::reports::models::{Comment, CommentWithAuthor};

/// Service for report comments
pub struct CommentService {
    pool: PgPool,
}

impl CommentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Active comments on a report, oldest first
    pub async fn list(&self, report_id: i64) -> Result<Vec<CommentResponseDto>> {
        let comments = sqlx::query_as::<_, CommentWithAuthor>(
            r#"
            SELECT c.id, c.user_id, u.full_name AS author_name, c.comment, c.created_at
            FROM comments c
            LEFT JOIN users u ON u.id = c.user_id
            WHERE c.report_id = $1 AND c.active = TRUE
            ORDER BY c.created_at ASC, c.id ASC
            "#,
        )
        .bind(report_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list comments: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(comments.into_iter().map(|c| c.into()).collect())
    }

    /// Comment as `user_id` on an active report
    pub async fn create(
        &self,
        user_id: i64,
        report_id: i64,
        text: &str,
    ) -> Result<CreatedCommentDto> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (report_id, user_id, comment)
            SELECT r.id, $2, $3
            FROM reports r
            WHERE r.id = $1 AND r.active = TRUE
            RETURNING id, report_id, user_id, comment, active, created_at
            "#,
        )
        .bind(report_id)
        .bind(user_id)
        .bind(text.trim())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create comment: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound("Reporte no encontrado".to_string()))?;

        tracing::info!(
            comment_id = comment.id,
            report_id = comment.report_id,
            user_id,
            "Created comment"
        );

        Ok(CreatedCommentDto {
            id: comment.id,
            user_id: comment.user_id,
            comment: comment.comment,
            created_at: comment.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{seed_category, seed_report, seed_user};

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a PostgreSQL DATABASE_URL"]
    async fn test_comments_are_listed_oldest_first(pool: PgPool) {
        let author = seed_user(&pool, "a@x.com").await;
        let category = seed_category(&pool).await;
        let report = seed_report(&pool, author, category).await;
        let comments = CommentService::new(pool);

        let first = comments.create(author, report, "  Primero ").await.unwrap();
        assert_eq!(first.comment, "Primero");
        assert_eq!(first.user_id, author);
        comments.create(author, report, "Segundo").await.unwrap();

        let listed = comments.list(report).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].comment, "Primero");
        assert_eq!(listed[1].comment, "Segundo");
        assert_eq!(listed[0].author_name.as_deref(), Some("Vecina"));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a PostgreSQL DATABASE_URL"]
    async fn test_comment_on_missing_report_is_not_found(pool: PgPool) {
        let author = seed_user(&pool, "a@x.com").await;
        let comments = CommentService::new(pool);

        assert!(matches!(
            comments.create(author, 12345, "Hola").await,
            Err(AppError::NotFound(_))
        ));
    }
}
