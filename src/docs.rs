use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use skadi_auth::{UserClaims, UserRole};
use skadi_models::{AccessTokenResponse, LoginRequest, LoginResponse, User};

use crate::modules::auth::controller::ErrorResponse;
use crate::utils::cookie::REFRESH_COOKIE;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::log_in,
        crate::modules::auth::controller::obtain_access,
        crate::modules::auth::controller::log_out,
    ),
    components(
        schemas(
            User,
            UserRole,
            UserClaims,
            LoginRequest,
            LoginResponse,
            AccessTokenResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login, logout and access token renewal")
    ),
    info(
        title = "Skadi API",
        version = "0.1.0",
        description = "School management backend. Short-lived access tokens travel in the Authorization header; the refresh token travels in an HTTP-only cookie.",
        license(
            name = "MIT"
        )
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
            );
            components.add_security_scheme(
                "refresh_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(REFRESH_COOKIE))),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_auth_paths() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/auth/login",
            "/api/v1/auth/private/obtain",
            "/api/v1/auth/private/logout",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn test_security_schemes() {
        let doc = ApiDoc::openapi();
        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("bearer_auth"));
        assert!(components.security_schemes.contains_key("refresh_cookie"));
    }
}
