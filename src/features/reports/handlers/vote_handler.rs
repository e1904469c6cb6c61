use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::core::extractor::AppPath;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::reports::dtos::{VoteStateDto, VoteToggleDto};
use crate::features::reports::handlers::ReportState;
use crate::shared::types::ApiResponse;

/// Add or remove the caller's vote
#[utoipa::path(
    post,
    path = "/api/reporte/{id}/votar",
    params(
        ("id" = i64, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Vote toggled", body = ApiResponse<VoteToggleDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Report not found or inactive"),
        (status = 409, description = "Concurrent toggle by the same user")
    ),
    security(("bearer_auth" = [])),
    tag = "votes"
)]
pub async fn toggle_vote(
    user: AuthenticatedUser,
    State(state): State<ReportState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<VoteToggleDto>>> {
    let result = state.vote_service.toggle(user.user_id, id).await?;
    let message = if result.liked {
        "Voto registrado"
    } else {
        "Voto eliminado"
    };
    Ok(Json(ApiResponse::success(
        Some(result),
        Some(message.to_string()),
        None,
    )))
}

/// Vote count of a report and whether the given user voted on it
#[utoipa::path(
    get,
    path = "/api/reporte/{id}/votos/{user_id}",
    params(
        ("id" = i64, Path, description = "Report ID"),
        ("user_id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Vote state", body = ApiResponse<VoteStateDto>),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "Report not found or inactive")
    ),
    tag = "votes"
)]
pub async fn get_vote_state(
    State(state): State<ReportState>,
    AppPath((id, user_id)): AppPath<(i64, i64)>,
) -> Result<Json<ApiResponse<VoteStateDto>>> {
    let vote_state = state.vote_service.state(id, user_id).await?;
    Ok(Json(ApiResponse::success(Some(vote_state), None, None)))
}
