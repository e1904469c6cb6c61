use sqlx::PgPool;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::users::dtos::{UpdatedPhotoDto, UpdatedProfileDto, UserResponseDto};
use crate::features::users::models::User;
use crate::modules::storage::{MediaFolder, MediaStore, MediaUpload};

/// Profile reads and edits. Ownership is checked by the handlers before any call here.
pub struct UserService {
    pool: PgPool,
    media: Arc<dyn MediaStore>,
}

impl UserService {
    pub fn new(pool: PgPool, media: Arc<dyn MediaStore>) -> Self {
        Self { pool, media }
    }

    pub async fn list(&self) -> Result<Vec<UserResponseDto>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, full_name, email, password_hash, role, photo, created_at, updated_at
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list users: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(users.into_iter().map(Into::into).collect())
    }

    pub async fn update_name(&self, user_id: i64, full_name: &str) -> Result<UpdatedProfileDto> {
        let full_name = full_name.trim();

        let result = sqlx::query(
            "UPDATE users SET full_name = $1, updated_at = NOW() WHERE id = $2",
        )
        .bind(full_name)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update user name: {:?}", e);
            AppError::Database(e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Usuario no encontrado".to_string()));
        }

        tracing::info!(user_id, "Updated profile name");

        Ok(UpdatedProfileDto {
            full_name: full_name.to_string(),
        })
    }

    /// Upload a new profile photo and store its URL, optionally renaming the profile
    pub async fn update_photo(
        &self,
        user_id: i64,
        upload: MediaUpload,
        full_name: Option<String>,
    ) -> Result<UpdatedPhotoDto> {
        let full_name = full_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());

        let photo = self.media.upload(MediaFolder::Users, upload).await?;

        let result = sqlx::query(
            r#"
            UPDATE users
            SET photo = $1, full_name = COALESCE($2, full_name), updated_at = NOW()
            WHERE id = $3
            "#,
        )
        .bind(&photo)
        .bind(full_name.as_deref())
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to store profile photo: {:?}", e);
            AppError::Database(e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Usuario no encontrado".to_string()));
        }

        tracing::info!(user_id, photo = %photo, "Updated profile photo");

        Ok(UpdatedPhotoDto { full_name, photo })
    }

    pub async fn remove_photo(&self, user_id: i64) -> Result<()> {
        let result = sqlx::query("UPDATE users SET photo = NULL, updated_at = NOW() WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to remove profile photo: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Usuario no encontrado".to_string()));
        }

        tracing::info!(user_id, "Removed profile photo");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::StubMediaStore;

    async fn insert_user(pool: &PgPool) -> i64 {
        sqlx::query_scalar(
            "INSERT INTO users (full_name, email, password_hash) VALUES ('Ana', 'ana@x.com', 'x') RETURNING id",
        )
        .fetch_one(pool)
        .await
        .unwrap()
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a PostgreSQL DATABASE_URL"]
    async fn test_photo_update_and_removal(pool: PgPool) {
        let id = insert_user(&pool).await;
        let service = UserService::new(pool.clone(), Arc::new(StubMediaStore));

        let upload =
            MediaUpload::new(vec![1, 2], "image/png".to_string(), "me.png".to_string()).unwrap();
        let updated = service
            .update_photo(id, upload, Some("Ana María".to_string()))
            .await
            .unwrap();
        assert_eq!(updated.photo, "https://media.test/usuarios/me.png");
        assert_eq!(updated.full_name.as_deref(), Some("Ana María"));

        service.remove_photo(id).await.unwrap();
        let photo: Option<String> = sqlx::query_scalar("SELECT photo FROM users WHERE id = $1")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert!(photo.is_none());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a PostgreSQL DATABASE_URL"]
    async fn test_update_name_of_missing_user(pool: PgPool) {
        let service = UserService::new(pool, Arc::new(StubMediaStore));
        assert!(matches!(
            service.update_name(999, "Nadie").await,
            Err(AppError::NotFound(_))
        ));
    }
}
