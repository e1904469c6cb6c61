use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppPath};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::reports::dtos::{CommentResponseDto, CreateCommentDto, CreatedCommentDto};
use crate::features::reports::handlers::ReportState;
use crate::shared::types::ApiResponse;

#[utoipa::path(
    get,
    path = "/api/reporte/{id}/comentarios",
    params(
        ("id" = i64, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Comments, oldest first", body = ApiResponse<Vec<CommentResponseDto>>),
        (status = 400, description = "Invalid id")
    ),
    tag = "comments"
)]
pub async fn list_comments(
    State(state): State<ReportState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<Vec<CommentResponseDto>>>> {
    let comments = state.comment_service.list(id).await?;
    Ok(Json(ApiResponse::list(comments)))
}

/// Comment on a report as the authenticated user
#[utoipa::path(
    post,
    path = "/api/reporte/{id}/comentarios",
    params(
        ("id" = i64, Path, description = "Report ID")
    ),
    request_body = CreateCommentDto,
    responses(
        (status = 201, description = "Comment created", body = ApiResponse<CreatedCommentDto>),
        (status = 400, description = "Empty comment"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Report not found or inactive")
    ),
    security(("bearer_auth" = [])),
    tag = "comments"
)]
pub async fn create_comment(
    user: AuthenticatedUser,
    State(state): State<ReportState>,
    AppPath(id): AppPath<i64>,
    AppJson(dto): AppJson<CreateCommentDto>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedCommentDto>>)> {
    if dto.validate().is_err() || dto.comment.trim().is_empty() {
        return Err(AppError::Validation(
            "El comentario es requerido".to_string(),
        ));
    }

    let comment = state
        .comment_service
        .create(user.user_id, id, &dto.comment)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(comment), None, None)),
    ))
}
