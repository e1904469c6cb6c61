use sqlx::PgPool;

use crate::core::database::is_foreign_key_violation;
use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{CategoryRequestDto, CategoryResponseDto};
use crate::features::categories::models::Category;

/// Service for category operations
pub struct CategoryService {
    pool: PgPool,
}

impl CategoryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all categories by name
    pub async fn list(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM categories
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    pub async fn get(&self, id: i64) -> Result<CategoryResponseDto> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get category: {:?}", e);
            AppError::Database(e)
        })?;

        category
            .map(|c| c.into())
            .ok_or_else(|| AppError::NotFound("Categoría no encontrada".to_string()))
    }

    pub async fn create(&self, dto: CategoryRequestDto) -> Result<CategoryResponseDto> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(dto.name.trim())
        .bind(dto.description.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create category: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(category_id = category.id, "Created category");
        Ok(category.into())
    }

    pub async fn update(&self, id: i64, dto: CategoryRequestDto) -> Result<CategoryResponseDto> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = $1, description = $2, updated_at = NOW()
            WHERE id = $3
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(dto.name.trim())
        .bind(dto.description.as_deref())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update category: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound("Categoría no encontrada".to_string()))?;

        tracing::info!(category_id = id, "Updated category");
        Ok(category.into())
    }

    /// Delete a category. Categories still referenced by reports are kept.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    AppError::Conflict(
                        "La categoría tiene reportes asociados y no puede eliminarse".to_string(),
                    )
                } else {
                    tracing::error!("Failed to delete category: {:?}", e);
                    AppError::Database(e)
                }
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Categoría no encontrada".to_string()));
        }

        tracing::info!(category_id = id, "Deleted category");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(name: &str) -> CategoryRequestDto {
        CategoryRequestDto {
            name: name.to_string(),
            description: None,
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a PostgreSQL DATABASE_URL"]
    async fn test_category_crud(pool: PgPool) {
        let service = CategoryService::new(pool);

        let created = service.create(dto("Alumbrado")).await.unwrap();
        assert_eq!(service.get(created.id).await.unwrap().name, "Alumbrado");

        let updated = service.update(created.id, dto("Alumbrado público")).await.unwrap();
        assert_eq!(updated.name, "Alumbrado público");

        service.delete(created.id).await.unwrap();
        assert!(matches!(
            service.get(created.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a PostgreSQL DATABASE_URL"]
    async fn test_referenced_category_cannot_be_deleted(pool: PgPool) {
        let service = CategoryService::new(pool.clone());
        let category = service.create(dto("Baches")).await.unwrap();

        let user_id: i64 = sqlx::query_scalar(
            "INSERT INTO users (full_name, email, password_hash) VALUES ('Ana', 'ana@x.com', 'x') RETURNING id",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        sqlx::query(
            r#"
            INSERT INTO reports (user_id, category_id, title, description, latitude, longitude, urgency)
            VALUES ($1, $2, 'Bache', 'Grande', 0, 0, 'high')
            "#,
        )
        .bind(user_id)
        .bind(category.id)
        .execute(&pool)
        .await
        .unwrap();

        assert!(matches!(
            service.delete(category.id).await,
            Err(AppError::Conflict(_))
        ));
    }
}
