use serde::{Deserialize, Serialize};
use sqlx::Type;
use utoipa::ToSchema;

/// User role matching the `user_role` database enum.
///
/// Serialized with the labels clients already know (`Usuario`, `Administrador`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum Role {
    #[serde(rename = "Usuario", alias = "Citizen")]
    Citizen,
    #[serde(rename = "Administrador", alias = "Administrator")]
    Administrator,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Citizen => write!(f, "Usuario"),
            Role::Administrator => write!(f, "Administrador"),
        }
    }
}

/// Identity decoded from a verified bearer token
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub email: String,
    pub role: Role,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        match self.role {
            Role::Administrator => true,
            Role::Citizen => false,
        }
    }

    /// Whether this identity owns a resource created by `owner_id`
    pub fn owns(&self, owner_id: i64) -> bool {
        self.user_id == owner_id
    }
}

/// Claims carried by tokens issued at login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// User id as a decimal string
    pub sub: String,
    pub email: String,
    pub role: Role,
    pub iat: u64,
    pub exp: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_with_spanish_labels() {
        assert_eq!(
            serde_json::to_string(&Role::Citizen).unwrap(),
            "\"Usuario\""
        );
        assert_eq!(
            serde_json::to_string(&Role::Administrator).unwrap(),
            "\"Administrador\""
        );
    }

    #[test]
    fn test_role_accepts_english_aliases() {
        let role: Role = serde_json::from_str("\"Administrator\"").unwrap();
        assert_eq!(role, Role::Administrator);
        let role: Role = serde_json::from_str("\"Usuario\"").unwrap();
        assert_eq!(role, Role::Citizen);
        assert!(serde_json::from_str::<Role>("\"admin\"").is_err());
    }

    #[test]
    fn test_ownership_and_admin_checks() {
        let user = AuthenticatedUser {
            user_id: 7,
            email: "a@x.com".to_string(),
            role: Role::Citizen,
        };
        assert!(user.owns(7));
        assert!(!user.owns(8));
        assert!(!user.is_admin());

        let admin = AuthenticatedUser {
            role: Role::Administrator,
            ..user
        };
        assert!(admin.is_admin());
        assert!(!admin.owns(8));
    }
}
