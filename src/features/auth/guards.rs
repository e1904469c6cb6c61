//! Authorization guards composed after the bearer-token middleware.
//!
//! `RequireAdmin` gates the validation routes; `ensure_owner` is the
//! ownership rule shared by profile, photo and report edits. Administrators
//! get no bypass from `ensure_owner`.

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Guard that only lets administrators through.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAdmin(user): RequireAdmin) { ... }
/// ```
pub struct RequireAdmin(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts.extensions.get::<AuthenticatedUser>().ok_or_else(|| {
            AppError::Unauthorized("No se proporcionó token de autenticación".to_string())
        })?;

        if !user.is_admin() {
            return Err(AppError::Forbidden(
                "Acceso denegado. Se requiere rol de administrador.".to_string(),
            ));
        }

        Ok(RequireAdmin(user.clone()))
    }
}

/// Fails with `Forbidden(message)` unless `user` owns the resource
pub fn ensure_owner(user: &AuthenticatedUser, owner_id: i64, message: &str) -> Result<(), AppError> {
    if user.owns(owner_id) {
        Ok(())
    } else {
        tracing::debug!(
            user_id = user.user_id,
            owner_id,
            "Rejected access to resource owned by another user"
        );
        Err(AppError::Forbidden(message.to_string()))
    }
}
