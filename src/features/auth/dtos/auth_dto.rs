use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::auth::model::Role;
use crate::features::users::models::User;
use crate::shared::validators::not_blank;

/// Request DTO for user registration
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequestDto {
    #[serde(default, alias = "nombreCompleto")]
    #[validate(custom(function = "not_blank"))]
    pub full_name: String,

    #[serde(default, alias = "correo")]
    #[validate(custom(function = "not_blank"))]
    pub email: String,

    #[serde(default, alias = "contrasena")]
    #[validate(length(min = 1))]
    pub password: String,
}

/// Request DTO for user login
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    #[serde(default, alias = "correo")]
    #[validate(custom(function = "not_blank"))]
    pub email: String,

    #[serde(default, alias = "contrasena")]
    #[validate(length(min = 1))]
    pub password: String,
}

/// Account created by a registration
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredUserDto {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub role: Role,
}

impl From<User> for RegisteredUserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            role: user.role,
        }
    }
}

/// Response DTO for a successful login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponseDto {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub role: Role,
    pub photo: Option<String>,
    /// Signed bearer token
    pub token: String,
    /// Token lifetime in seconds
    pub expires_in: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_accepts_spanish_field_names() {
        let dto: RegisterRequestDto = serde_json::from_str(
            r#"{"nombreCompleto":"Ana","correo":"a@x.com","contrasena":"pw"}"#,
        )
        .unwrap();
        assert_eq!(dto.full_name, "Ana");
        assert_eq!(dto.email, "a@x.com");
        assert_eq!(dto.password, "pw");
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_register_missing_fields_fail_validation() {
        let dto: RegisterRequestDto = serde_json::from_str(r#"{"email":"a@x.com"}"#).unwrap();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_login_response_is_camel_case() {
        let dto = LoginResponseDto {
            id: 1,
            full_name: "Ana".to_string(),
            email: "a@x.com".to_string(),
            role: Role::Citizen,
            photo: None,
            token: "t".to_string(),
            expires_in: 60,
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["fullName"], "Ana");
        assert_eq!(json["role"], "Usuario");
        assert_eq!(json["expiresIn"], 60);
        assert!(json["photo"].is_null());
    }
}
