use sqlx::PgPool;
use std::sync::Arc;

use crate::core::database::is_unique_violation;
use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{
    LoginRequestDto, LoginResponseDto, RegisterRequestDto, RegisteredUserDto,
};
use crate::features::auth::services::{PasswordService, TokenService};
use crate::features::users::models::User;

/// Registration and credential login against the users table
pub struct AuthService {
    pool: PgPool,
    tokens: Arc<TokenService>,
    passwords: PasswordService,
}

impl AuthService {
    pub fn new(pool: PgPool, tokens: Arc<TokenService>, passwords: PasswordService) -> Self {
        Self {
            pool,
            tokens,
            passwords,
        }
    }

    /// Create a citizen account. The unique index on `email` decides duplicates,
    /// so two concurrent registrations cannot both succeed.
    pub async fn register(&self, dto: RegisterRequestDto) -> Result<RegisteredUserDto> {
        let password_hash = self.passwords.hash(&dto.password).await?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (full_name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, full_name, email, password_hash, role, photo, created_at, updated_at
            "#,
        )
        .bind(dto.full_name.trim())
        .bind(dto.email.trim())
        .bind(&password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::BadRequest("El correo ya está registrado".to_string())
            } else {
                tracing::error!("Failed to register user: {:?}", e);
                AppError::Database(e)
            }
        })?;

        tracing::info!(user_id = user.id, "Registered user");

        Ok(user.into())
    }

    /// Verify credentials and issue a bearer token
    pub async fn login(&self, dto: LoginRequestDto) -> Result<LoginResponseDto> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, full_name, email, password_hash, role, photo, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(dto.email.trim())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load user for login: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::BadRequest("Usuario no encontrado".to_string()))?;

        if !self
            .passwords
            .verify(&dto.password, &user.password_hash)
            .await?
        {
            tracing::debug!(user_id = user.id, "Rejected login with wrong password");
            return Err(AppError::BadRequest("Contraseña incorrecta".to_string()));
        }

        let issued = self.tokens.issue(user.id, &user.email, user.role)?;

        tracing::info!(user_id = user.id, "User logged in");

        Ok(LoginResponseDto {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            role: user.role,
            photo: user.photo,
            token: issued.token,
            expires_in: issued.expires_in,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::model::Role;
    use crate::features::auth::JwtValidator;
    use crate::shared::test_helpers::test_auth_config;
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::name::en::Name;
    use fake::Fake;

    fn service(pool: PgPool) -> AuthService {
        let config = test_auth_config();
        AuthService::new(
            pool,
            Arc::new(TokenService::new(&config)),
            PasswordService::new(config.bcrypt_cost),
        )
    }

    fn register_dto(email: &str, password: &str) -> RegisterRequestDto {
        RegisterRequestDto {
            full_name: Name().fake(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a PostgreSQL DATABASE_URL"]
    async fn test_register_creates_citizen(pool: PgPool) {
        let email: String = SafeEmail().fake();
        let user = service(pool)
            .register(register_dto(&email, "secret"))
            .await
            .unwrap();

        assert_eq!(user.email, email);
        assert_eq!(user.role, Role::Citizen);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a PostgreSQL DATABASE_URL"]
    async fn test_duplicate_email_is_rejected_without_new_row(pool: PgPool) {
        let service = service(pool.clone());
        let email: String = SafeEmail().fake();

        service.register(register_dto(&email, "a")).await.unwrap();
        let second = service.register(register_dto(&email, "b")).await;
        assert!(matches!(second, Err(AppError::BadRequest(_))));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = $1")
            .bind(&email)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a PostgreSQL DATABASE_URL"]
    async fn test_login_wrong_password_issues_no_token(pool: PgPool) {
        let service = service(pool);
        let email: String = SafeEmail().fake();
        service.register(register_dto(&email, "right")).await.unwrap();

        let result = service
            .login(LoginRequestDto {
                email: email.clone(),
                password: "wrong".to_string(),
            })
            .await;
        match result {
            Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Contraseña incorrecta"),
            other => panic!("expected BadRequest, got {:?}", other),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a PostgreSQL DATABASE_URL"]
    async fn test_login_unknown_email(pool: PgPool) {
        let result = service(pool)
            .login(LoginRequestDto {
                email: "nobody@x.com".to_string(),
                password: "pw".to_string(),
            })
            .await;
        match result {
            Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Usuario no encontrado"),
            other => panic!("expected BadRequest, got {:?}", other),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a PostgreSQL DATABASE_URL"]
    async fn test_login_token_is_accepted_by_guard(pool: PgPool) {
        let service = service(pool);
        let email: String = SafeEmail().fake();
        let registered = service
            .register(register_dto(&email, "right"))
            .await
            .unwrap();

        let login = service
            .login(LoginRequestDto {
                email,
                password: "right".to_string(),
            })
            .await
            .unwrap();
        assert!(!login.token.is_empty());

        let config = test_auth_config();
        let validator = JwtValidator::new(&config.jwt_secret, config.jwt_leeway);
        let identity = validator.validate_token(&login.token).unwrap();
        assert_eq!(identity.user_id, registered.id);
        assert_eq!(identity.role, Role::Citizen);
    }
}
