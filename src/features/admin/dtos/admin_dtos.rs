use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::error::AppError;
use crate::features::reports::models::ReportStatus;

/// Request body for a status change. Accepts Spanish or English labels.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusDto {
    #[serde(default, alias = "estado")]
    #[schema(example = "Aprobado")]
    pub status: Option<String>,
}

impl UpdateStatusDto {
    pub fn parse(&self) -> Result<ReportStatus, AppError> {
        self.status
            .as_deref()
            .map(str::trim)
            .and_then(|s| s.parse::<ReportStatus>().ok())
            .ok_or_else(|| AppError::BadRequest("Estado no válido".to_string()))
    }
}

/// Status of a report after a validation request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusUpdatedDto {
    pub id: i64,
    pub status: ReportStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_both_languages() {
        let dto: UpdateStatusDto = serde_json::from_str(r#"{"estado":"Aprobado"}"#).unwrap();
        assert_eq!(dto.parse().unwrap(), ReportStatus::Approved);

        let dto: UpdateStatusDto = serde_json::from_str(r#"{"status":" rejected "}"#).unwrap();
        assert_eq!(dto.parse().unwrap(), ReportStatus::Rejected);
    }

    #[test]
    fn test_parse_rejects_unknown_or_missing() {
        let dto: UpdateStatusDto = serde_json::from_str(r#"{"status":"Archivado"}"#).unwrap();
        assert!(matches!(dto.parse(), Err(AppError::BadRequest(_))));

        let dto: UpdateStatusDto = serde_json::from_str("{}").unwrap();
        assert!(matches!(dto.parse(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_status_serializes_spanish_label() {
        let json = serde_json::to_value(StatusUpdatedDto {
            id: 3,
            status: ReportStatus::Rejected,
        })
        .unwrap();
        assert_eq!(json["status"], "Rechazado");
    }
}
