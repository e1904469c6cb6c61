use sqlx::PgPool;
use std::sync::Arc;

use crate::core::database::is_foreign_key_violation;
use crate::core::error::{AppError, Result};
use crate::features::auth::guards::ensure_owner;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::reports::dtos::{CreatedReportDto, ReportResponseDto, UpdateMyReportDto};
use crate::features::reports::models::{NewReport, ReportDetail};
use crate::modules::storage::{MediaFolder, MediaStore, MediaUpload};

/// Columns selected for every report listing, joined with author and category names
pub(crate) const REPORT_DETAIL_SELECT: &str = r#"
    SELECT
        r.id, r.user_id, r.category_id, r.title, r.description, r.image_url,
        r.latitude, r.longitude, r.urgency, r.status, r.votes, r.active,
        r.created_at, r.updated_at,
        u.full_name AS author_name,
        c.name AS category_name
    FROM reports r
    LEFT JOIN users u ON u.id = r.user_id
    LEFT JOIN categories c ON c.id = r.category_id
"#;

const NOT_REPORT_OWNER: &str = "No puedes editar un reporte de otro usuario";

/// Service for report operations
pub struct ReportService {
    pool: PgPool,
    media: Arc<dyn MediaStore>,
}

impl ReportService {
    pub fn new(pool: PgPool, media: Arc<dyn MediaStore>) -> Self {
        Self { pool, media }
    }

    /// Active reports, newest first
    pub async fn list_active(&self) -> Result<Vec<ReportResponseDto>> {
        let sql = format!(
            "{} WHERE r.active = TRUE ORDER BY r.created_at DESC, r.id DESC",
            REPORT_DETAIL_SELECT
        );

        let reports = sqlx::query_as::<_, ReportDetail>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list reports: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(reports.into_iter().map(|r| r.into()).collect())
    }

    pub async fn get_active(&self, id: i64) -> Result<ReportResponseDto> {
        let sql = format!(
            "{} WHERE r.id = $1 AND r.active = TRUE",
            REPORT_DETAIL_SELECT
        );

        sqlx::query_as::<_, ReportDetail>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get report: {:?}", e);
                AppError::Database(e)
            })?
            .map(|r| r.into())
            .ok_or_else(|| AppError::NotFound("Reporte no encontrado".to_string()))
    }

    /// The caller's active reports, newest first
    pub async fn list_by_user(&self, user_id: i64) -> Result<Vec<ReportResponseDto>> {
        let sql = format!(
            "{} WHERE r.user_id = $1 AND r.active = TRUE ORDER BY r.created_at DESC, r.id DESC",
            REPORT_DETAIL_SELECT
        );

        let reports = sqlx::query_as::<_, ReportDetail>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list user reports: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(reports.into_iter().map(|r| r.into()).collect())
    }

    /// Create a Pending report owned by `user_id`, uploading the evidence photo first
    pub async fn create(
        &self,
        user_id: i64,
        report: NewReport,
        image: Option<MediaUpload>,
    ) -> Result<CreatedReportDto> {
        self.ensure_category_exists(report.category_id).await?;

        let image_url = match image {
            Some(upload) => Some(self.media.upload(MediaFolder::Reports, upload).await?),
            None => None,
        };

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO reports
                (user_id, category_id, title, description, image_url, latitude, longitude, urgency)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(report.category_id)
        .bind(&report.title)
        .bind(&report.description)
        .bind(image_url.as_deref())
        .bind(report.latitude)
        .bind(report.longitude)
        .bind(report.urgency)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                AppError::BadRequest("La categoría no existe".to_string())
            } else {
                tracing::error!("Failed to create report: {:?}", e);
                AppError::Database(e)
            }
        })?;

        tracing::info!(report_id = id, user_id, urgency = %report.urgency, "Created report");

        Ok(CreatedReportDto { id, image_url })
    }

    /// Owner-only partial edit of title, description and category while the report is active
    pub async fn update_own(
        &self,
        user: &AuthenticatedUser,
        id: i64,
        dto: UpdateMyReportDto,
    ) -> Result<ReportResponseDto> {
        let owner_id: i64 =
            sqlx::query_scalar("SELECT user_id FROM reports WHERE id = $1 AND active = TRUE")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to load report owner: {:?}", e);
                    AppError::Database(e)
                })?
                .ok_or_else(|| AppError::NotFound("Reporte no encontrado".to_string()))?;

        ensure_owner(user, owner_id, NOT_REPORT_OWNER)?;

        if let Some(category_id) = dto.category_id {
            self.ensure_category_exists(category_id).await?;
        }

        let updated = sqlx::query(
            r#"
            UPDATE reports
            SET
                title = COALESCE($1, title),
                description = COALESCE($2, description),
                category_id = COALESCE($3, category_id),
                updated_at = NOW()
            WHERE id = $4 AND user_id = $5 AND active = TRUE
            "#,
        )
        .bind(dto.title.as_deref().map(str::trim))
        .bind(dto.description.as_deref().map(str::trim))
        .bind(dto.category_id)
        .bind(id)
        .bind(user.user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                AppError::BadRequest("La categoría no existe".to_string())
            } else {
                tracing::error!("Failed to update report: {:?}", e);
                AppError::Database(e)
            }
        })?;

        if updated.rows_affected() == 0 {
            return Err(AppError::NotFound("Reporte no encontrado".to_string()));
        }

        tracing::info!(report_id = id, user_id = user.user_id, "Updated own report");

        self.get_active(id).await
    }

    async fn ensure_category_exists(&self, category_id: i64) -> Result<()> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
                .bind(category_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to check category: {:?}", e);
                    AppError::Database(e)
                })?;

        if exists {
            Ok(())
        } else {
            Err(AppError::BadRequest("La categoría no existe".to_string()))
        }
    }
}
