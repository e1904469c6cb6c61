use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::admin::dtos::StatusUpdatedDto;
use crate::features::reports::dtos::ReportResponseDto;
use crate::features::reports::models::{ReportDetail, ReportStatus, StatusTransition};
use crate::features::reports::services::REPORT_DETAIL_SELECT;

/// Service for report validation
pub struct AdminService {
    pool: PgPool,
}

impl AdminService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Every report regardless of status or visibility, newest first
    pub async fn list_reports(&self) -> Result<Vec<ReportResponseDto>> {
        let sql = format!(
            "{} ORDER BY r.created_at DESC, r.id DESC",
            REPORT_DETAIL_SELECT
        );

        let reports = sqlx::query_as::<_, ReportDetail>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list reports for validation: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(reports.into_iter().map(|r| r.into()).collect())
    }

    /// Move a report to `next`.
    ///
    /// Only Pending reports move, to Approved or Rejected. Asking for the
    /// current status succeeds without writing. The write is conditioned on
    /// the status read here, so two administrators racing on the same report
    /// cannot both win.
    pub async fn update_status(&self, id: i64, next: ReportStatus) -> Result<StatusUpdatedDto> {
        let current: ReportStatus =
            sqlx::query_scalar("SELECT status FROM reports WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to load report status: {:?}", e);
                    AppError::Database(e)
                })?
                .ok_or_else(|| AppError::NotFound("Reporte no encontrado".to_string()))?;

        match current.transition_to(next) {
            StatusTransition::Unchanged => {
                return Ok(StatusUpdatedDto { id, status: current });
            }
            StatusTransition::Invalid => {
                return Err(AppError::Conflict(format!(
                    "No se puede cambiar un reporte {} a {}",
                    current, next
                )));
            }
            StatusTransition::Apply => {}
        }

        let updated = sqlx::query(
            r#"
            UPDATE reports
            SET status = $3, updated_at = NOW()
            WHERE id = $1 AND status = $2
            "#,
        )
        .bind(id)
        .bind(current)
        .bind(next)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update report status: {:?}", e);
            AppError::Database(e)
        })?
        .rows_affected();

        if updated == 0 {
            tracing::warn!(report_id = id, "Report status changed concurrently");
            return Err(AppError::Conflict(
                "El estado del reporte cambió, intente nuevamente".to_string(),
            ));
        }

        tracing::info!(report_id = id, from = %current, to = %next, "Report status updated");

        Ok(StatusUpdatedDto { id, status: next })
    }
}
