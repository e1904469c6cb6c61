use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::admin::{dtos as admin_dtos, handlers as admin_handlers};
use crate::features::auth;
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::reports::{
    dtos as reports_dtos, handlers as reports_handlers, models as reports_models,
};
use crate::features::users::{dtos as users_dtos, handlers as users_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::register,
        auth::handlers::login,
        // Users
        users_handlers::list_users,
        users_handlers::update_profile,
        users_handlers::update_photo,
        users_handlers::remove_photo,
        // Categories
        categories_handlers::list_categories,
        categories_handlers::get_category,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        // Reports
        reports_handlers::list_reports,
        reports_handlers::get_report,
        reports_handlers::create_report,
        reports_handlers::list_my_reports,
        reports_handlers::update_my_report,
        // Votes
        reports_handlers::toggle_vote,
        reports_handlers::get_vote_state,
        // Comments
        reports_handlers::list_comments,
        reports_handlers::create_comment,
        // Validation (administrators)
        admin_handlers::list_reports,
        admin_handlers::update_status,
        // Dashboard (public)
        dashboard_handlers::get_report_counts,
        dashboard_handlers::get_user_count,
        dashboard_handlers::get_by_category,
        dashboard_handlers::get_top_voted,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth::model::Role,
            auth::dtos::RegisterRequestDto,
            auth::dtos::LoginRequestDto,
            auth::dtos::RegisteredUserDto,
            auth::dtos::LoginResponseDto,
            ApiResponse<auth::dtos::RegisteredUserDto>,
            ApiResponse<auth::dtos::LoginResponseDto>,
            // Users
            users_dtos::UserResponseDto,
            users_dtos::UpdateProfileDto,
            users_dtos::UpdatedProfileDto,
            users_dtos::UploadPhotoForm,
            users_dtos::UpdatedPhotoDto,
            ApiResponse<Vec<users_dtos::UserResponseDto>>,
            ApiResponse<users_dtos::UpdatedProfileDto>,
            ApiResponse<users_dtos::UpdatedPhotoDto>,
            // Categories
            categories_dtos::CategoryResponseDto,
            categories_dtos::CategoryRequestDto,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            // Reports
            reports_models::ReportStatus,
            reports_models::Urgency,
            reports_dtos::ReportResponseDto,
            reports_dtos::CreateReportForm,
            reports_dtos::CreatedReportDto,
            reports_dtos::UpdateMyReportDto,
            reports_dtos::VoteToggleDto,
            reports_dtos::VoteStateDto,
            reports_dtos::CreateCommentDto,
            reports_dtos::CommentResponseDto,
            reports_dtos::CreatedCommentDto,
            ApiResponse<Vec<reports_dtos::ReportResponseDto>>,
            ApiResponse<reports_dtos::ReportResponseDto>,
            ApiResponse<reports_dtos::CreatedReportDto>,
            ApiResponse<reports_dtos::VoteToggleDto>,
            ApiResponse<reports_dtos::VoteStateDto>,
            ApiResponse<Vec<reports_dtos::CommentResponseDto>>,
            ApiResponse<reports_dtos::CreatedCommentDto>,
            // Validation
            admin_dtos::UpdateStatusDto,
            admin_dtos::StatusUpdatedDto,
            ApiResponse<admin_dtos::StatusUpdatedDto>,
            // Dashboard
            dashboard_dtos::ReportCountsDto,
            dashboard_dtos::UserCountDto,
            dashboard_dtos::CategoryCountDto,
            dashboard_dtos::ReportVotesDto,
            ApiResponse<dashboard_dtos::ReportCountsDto>,
            ApiResponse<dashboard_dtos::UserCountDto>,
            ApiResponse<Vec<dashboard_dtos::CategoryCountDto>>,
            ApiResponse<Vec<dashboard_dtos::ReportVotesDto>>,
        )
    ),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "users", description = "User profiles and photos"),
        (name = "categories", description = "Report categories"),
        (name = "reports", description = "Citizen reports"),
        (name = "votes", description = "Report votes"),
        (name = "comments", description = "Report comments"),
        (name = "validation", description = "Report validation (administrators only)"),
        (name = "dashboard", description = "Public statistics"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Civic Reports API",
        version = "0.1.0",
        description = "API documentation for Civic Reports",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/usuario",
            "/api/usuario/login",
            "/api/usuario/{id}/foto",
            "/api/categoria/{id}",
            "/api/reporte",
            "/api/reporte/{id}/votar",
            "/api/reporte/{id}/votos/{user_id}",
            "/api/reporte/{id}/comentarios",
            "/api/MisReportes/{id}",
            "/api/validacionReportes/{id}/estado",
            "/api/dashboard/votos",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components are generated");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
