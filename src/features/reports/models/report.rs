use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use std::str::FromStr;
use utoipa::ToSchema;

/// Report status enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "report_status", rename_all = "lowercase")]
pub enum ReportStatus {
    #[serde(rename = "Pendiente", alias = "Pending")]
    Pending,
    #[serde(rename = "Aprobado", alias = "Approved")]
    Approved,
    #[serde(rename = "Rechazado", alias = "Rejected")]
    Rejected,
}

/// Outcome of asking a report to move from one status to another
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTransition {
    /// The report moves to the requested status
    Apply,
    /// The report already has the requested status
    Unchanged,
    /// Approved and Rejected are final; nothing moves back to Pending
    Invalid,
}

impl ReportStatus {
    pub fn transition_to(self, next: ReportStatus) -> StatusTransition {
        match (self, next) {
            (current, next) if current == next => StatusTransition::Unchanged,
            (ReportStatus::Pending, ReportStatus::Approved)
            | (ReportStatus::Pending, ReportStatus::Rejected) => StatusTransition::Apply,
            _ => StatusTransition::Invalid,
        }
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportStatus::Pending => write!(f, "Pendiente"),
            ReportStatus::Approved => write!(f, "Aprobado"),
            ReportStatus::Rejected => write!(f, "Rechazado"),
        }
    }
}

impl FromStr for ReportStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pendiente" | "pending" => Ok(ReportStatus::Pending),
            "aprobado" | "approved" => Ok(ReportStatus::Approved),
            "rechazado" | "rejected" => Ok(ReportStatus::Rejected),
            _ => Err(()),
        }
    }
}

/// Report urgency enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "report_urgency", rename_all = "lowercase")]
pub enum Urgency {
    #[serde(rename = "Baja", alias = "Low")]
    Low,
    #[serde(rename = "Media", alias = "Medium")]
    Medium,
    #[serde(rename = "Alta", alias = "High")]
    High,
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Urgency::Low => write!(f, "Baja"),
            Urgency::Medium => write!(f, "Media"),
            Urgency::High => write!(f, "Alta"),
        }
    }
}

impl FromStr for Urgency {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "baja" | "low" => Ok(Urgency::Low),
            "media" | "medium" => Ok(Urgency::Medium),
            "alta" | "high" => Ok(Urgency::High),
            _ => Err(()),
        }
    }
}

/// Database model for report
#[derive(Debug, Clone, FromRow)]
pub struct Report {
    pub id: i64,
    pub user_id: i64,
    pub category_id: i64,
    pub title: String,
    pub description: String,
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

/// Report joined with its author and category names
#[derive(Debug, Clone, FromRow)]
pub struct ReportDetail {
    #[sqlx(flatten)]
    pub report: Report,
    pub author_name: Option<String>,
    pub category_name: Option<String>,
}

/// Data for creating a new report
#[derive(Debug, Clone)]
pub struct NewReport {
    pub title: String,
    pub description: String,
    pub category_id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub urgency: Urgency,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_moves_to_final_states() {
        assert_eq!(
            ReportStatus::Pending.transition_to(ReportStatus::Approved),
            StatusTransition::Apply
        );
        assert_eq!(
            ReportStatus::Pending.transition_to(ReportStatus::Rejected),
            StatusTransition::Apply
        );
    }

    #[test]
    fn test_repeating_status_is_unchanged() {
        for status in [
            ReportStatus::Pending,
            ReportStatus::Approved,
            ReportStatus::Rejected,
        ] {
            assert_eq!(status.transition_to(status), StatusTransition::Unchanged);
        }
    }

    #[test]
    fn test_final_states_do_not_move() {
        assert_eq!(
            ReportStatus::Approved.transition_to(ReportStatus::Pending),
            StatusTransition::Invalid
        );
        assert_eq!(
            ReportStatus::Rejected.transition_to(ReportStatus::Approved),
            StatusTransition::Invalid
        );
        assert_eq!(
            ReportStatus::Approved.transition_to(ReportStatus::Rejected),
            StatusTransition::Invalid
        );
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("Aprobado".parse(), Ok(ReportStatus::Approved));
        assert_eq!(" rejected ".parse(), Ok(ReportStatus::Rejected));
        assert_eq!("Pendiente".parse(), Ok(ReportStatus::Pending));
        assert!("Cerrado".parse::<ReportStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_with_spanish_labels() {
        assert_eq!(
            serde_json::to_string(&ReportStatus::Approved).unwrap(),
            "\"Aprobado\""
        );
        let status: ReportStatus = serde_json::from_str("\"Rejected\"").unwrap();
        assert_eq!(status, ReportStatus::Rejected);
    }

    #[test]
    fn test_urgency_parsing() {
        assert_eq!("Alta".parse(), Ok(Urgency::High));
        assert_eq!("media".parse(), Ok(Urgency::Medium));
        assert_eq!("LOW".parse(), Ok(Urgency::Low));
        assert!("urgente".parse::<Urgency>().is_err());
        assert_eq!(Urgency::Medium.to_string(), "Media");
    }
}
