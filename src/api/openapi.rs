//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{account_handler, auth_handler};
use crate::schemas::{AccountResponse, SigninRequest, SignupRequest, UpdateAccountRequest};
use crate::services::TokenResponse;

/// OpenAPI documentation for the account backend
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Account Backend",
        version = "0.1.0",
        description = "Account and authentication API with Axum and SeaORM",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    paths(
        // Authentication endpoints
        auth_handler::signup,
        auth_handler::signin,
        // Account endpoints
        account_handler::list_accounts,
        account_handler::get_current_account,
        account_handler::get_account,
        account_handler::update_account,
        account_handler::verify_account,
    ),
    components(
        schemas(
            SignupRequest,
            SigninRequest,
            UpdateAccountRequest,
            AccountResponse,
            TokenResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Account signup and signin"),
        (name = "Accounts", description = "Account management operations")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
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
                        .description(Some("JWT token obtained from /v1/auth/signin"))
                        .build(),
                ),
            );
        }
    }
}
