use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::core::error::AppError;
use crate::features::reports::models::{
    CommentWithAuthor, NewReport, ReportDetail, ReportStatus, Urgency,
};
use crate::shared::validators::not_blank;

/// Response DTO for report
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponseDto {
    pub id: i64,
    pub user_id: i64,
    /// Author's full name
    pub author: Option<String>,
    pub title: String,
    pub description: String,
    pub category_id: i64,
    /// Category name
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub urgency: Urgency,
    pub status: ReportStatus,
    pub votes: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ReportDetail> for ReportResponseDto {
    fn from(detail: ReportDetail) -> Self {
        let r = detail.report;
        Self {
            id: r.id,
            user_id: r.user_id,
            author: detail.author_name,
            title: r.title,
            description: r.description,
            category_id: r.category_id,
            category: detail.category_name,
            image_url: r.image_url,
            latitude: r.latitude,
            longitude: r.longitude,
            urgency: r.urgency,
            status: r.status,
            votes: r.votes,
            active: r.active,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Multipart form for `POST /api/reporte`
///
/// Documentation only; the handler reads the parts from axum's Multipart extractor.
/// Spanish part names (`titulo`, `descripcion`, `idCategoria`, `latitud`,
/// `longitud`, `urgencia`, `imagen`) are accepted as well.
#[derive(Debug, ToSchema)]
#[schema(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct CreateReportForm {
    pub title: String,
    pub description: String,
    pub category_id: i64,
    pub latitude: f64,
    pub longitude: f64,
    /// Baja, Media or Alta
    #[schema(example = "Media")]
    pub urgency: String,
    /// Optional evidence photo (jpeg, png or webp)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub image: Option<String>,
}

/// Raw text parts of a report creation form
#[derive(Debug, Default, Clone)]
pub struct ReportFormFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub urgency: Option<String>,
}

impl ReportFormFields {
    /// Store a text part under its English or Spanish name. Returns false for unknown names.
    pub fn set(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            "title" | "titulo" => &mut self.title,
            "description" | "descripcion" => &mut self.description,
            "categoryId" | "idCategoria" => &mut self.category_id,
            "latitude" | "latitud" | "lat" => &mut self.latitude,
            "longitude" | "longitud" | "lon" => &mut self.longitude,
            "urgency" | "urgencia" => &mut self.urgency,
            _ => return false,
        };
        *slot = Some(value);
        true
    }

    pub fn into_new_report(self) -> Result<NewReport, AppError> {
        let required = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| AppError::Validation("Faltan campos requeridos".to_string()))
        };

        let title = required(self.title)?;
        let description = required(self.description)?;
        let category_id = required(self.category_id)?;
        let latitude = required(self.latitude)?;
        let longitude = required(self.longitude)?;
        let urgency = required(self.urgency)?;

        let category_id = category_id
            .parse::<i64>()
            .map_err(|_| AppError::Validation("Categoría inválida".to_string()))?;

        let latitude = parse_coordinate(&latitude, 90.0)?;
        let longitude = parse_coordinate(&longitude, 180.0)?;

        let urgency = urgency
            .parse::<Urgency>()
            .map_err(|_| AppError::Validation("Urgencia no válida".to_string()))?;

        Ok(NewReport {
            title,
            description,
            category_id,
            latitude,
            longitude,
            urgency,
        })
    }
}

fn parse_coordinate(value: &str, limit: f64) -> Result<f64, AppError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && v.abs() <= limit)
        .ok_or_else(|| AppError::Validation("Coordenadas inválidas".to_string()))
}

/// Response DTO for report creation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedReportDto {
    pub id: i64,
    pub image_url: Option<String>,
}

/// Partial edit of one's own report. Status cannot be changed here.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMyReportDto {
    #[serde(default, alias = "titulo")]
    #[validate(custom(function = "not_blank"))]
    pub title: Option<String>,

    #[serde(default, alias = "descripcion")]
    #[validate(custom(function = "not_blank"))]
    pub description: Option<String>,

    #[serde(default, alias = "idCategoria")]
    pub category_id: Option<i64>,
}

impl UpdateMyReportDto {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.category_id.is_none()
    }
}

/// Result of toggling a vote
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VoteToggleDto {
    /// Whether the caller's vote is now counted
    pub liked: bool,
    /// Report vote count after the toggle
    pub total: i32,
}

/// A user's vote state on a report
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VoteStateDto {
    pub total: i32,
    pub liked: bool,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCommentDto {
    #[serde(default, alias = "comentario")]
    #[validate(custom(function = "not_blank"))]
    pub comment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponseDto {
    pub id: i64,
    pub user_id: i64,
    pub author_name: Option<String>,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl From<CommentWithAuthor> for CommentResponseDto {
    fn from(c: CommentWithAuthor) -> Self {
        Self {
            id: c.id,
            user_id: c.user_id,
            author_name: c.author_name,
            comment: c.comment,
            created_at: c.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedCommentDto {
    pub id: i64,
    pub user_id: i64,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> ReportFormFields {
        let mut form = ReportFormFields::default();
        form.set("titulo", "Bache".to_string());
        form.set("descripcion", "En la esquina".to_string());
        form.set("idCategoria", "3".to_string());
        form.set("latitud", "-12.05".to_string());
        form.set("longitud", "-77.04".to_string());
        form.set("urgencia", "Alta".to_string());
        form
    }

    #[test]
    fn test_complete_form_becomes_report() {
        let report = complete_form().into_new_report().unwrap();
        assert_eq!(report.title, "Bache");
        assert_eq!(report.category_id, 3);
        assert_eq!(report.urgency, Urgency::High);
        assert!((report.latitude + 12.05).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_part_name_is_not_stored() {
        let mut form = ReportFormFields::default();
        assert!(!form.set("estadoReporte", "Aprobado".to_string()));
        assert!(form.set("title", "x".to_string()));
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let mut form = complete_form();
        form.description = Some("   ".to_string());
        match form.into_new_report() {
            Err(AppError::Validation(msg)) => assert_eq!(msg, "Faltan campos requeridos"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_out_of_range_coordinates_are_rejected() {
        let mut form = complete_form();
        form.latitude = Some("91".to_string());
        assert!(form.into_new_report().is_err());

        let mut form = complete_form();
        form.longitude = Some("NaN".to_string());
        assert!(form.into_new_report().is_err());
    }

    #[test]
    fn test_unknown_urgency_is_rejected() {
        let mut form = complete_form();
        form.urgency = Some("Urgente".to_string());
        match form.into_new_report() {
            Err(AppError::Validation(msg)) => assert_eq!(msg, "Urgencia no válida"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_update_dto_ignores_status_fields() {
        let dto: UpdateMyReportDto =
            serde_json::from_str(r#"{"titulo":"Nuevo","estado":"Aprobado"}"#).unwrap();
        assert_eq!(dto.title.as_deref(), Some("Nuevo"));
        assert!(!dto.is_empty());
    }
}
