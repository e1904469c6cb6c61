use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::categories::models::Category;
use crate::shared::validators::not_blank;

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
        }
    }
}

/// Request DTO for creating or replacing a category
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CategoryRequestDto {
    #[serde(default, alias = "nombre")]
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub name: String,

    #[serde(default, alias = "descripcion")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_accepts_spanish_names() {
        let dto: CategoryRequestDto =
            serde_json::from_str(r#"{"nombre":"Baches","descripcion":"Vías"}"#).unwrap();
        assert_eq!(dto.name, "Baches");
        assert_eq!(dto.description.as_deref(), Some("Vías"));
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_request_requires_name() {
        let dto: CategoryRequestDto = serde_json::from_str(r#"{"description":"x"}"#).unwrap();
        assert!(dto.validate().is_err());
    }
}
