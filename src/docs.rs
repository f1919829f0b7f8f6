use rsvp_models::{
    LoginRequest, RefreshTokenRequest, Role, SignupRequest, TokenResponse, UpdateProfileRequest,
    UpdateRoleRequest, UserResponse,
};
use serde::Serialize;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

/// Body of every error response, as rendered by `AppError`.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::signup,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::refresh,
        crate::modules::users::controller::get_me,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::update_user_role,
        crate::modules::users::controller::delete_user,
    ),
    components(
        schemas(
            SignupRequest,
            LoginRequest,
            RefreshTokenRequest,
            TokenResponse,
            UserResponse,
            UpdateProfileRequest,
            UpdateRoleRequest,
            Role,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Signup, login and token refresh"),
        (name = "Users", description = "Profiles and administrative user management")
    ),
    info(
        title = "rsvp API",
        version = "0.1.0",
        description = "Invite-only signup and JWT authentication with role-based access control."
    )
)]
pub struct ApiDoc;

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
            )
        }
    }
}
