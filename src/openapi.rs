use utoipa::OpenApi;
use crate::handlers::{
    health,
    users,
};
use crate::models::user::{CreateUserRequest, UserResponse};

/// Generate the OpenAPI documentation for the entire API
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        health::check,

        // User endpoints
        users::create_user,
    ),
    components(
        schemas(
            // Health schemas
            health::HealthResponse,

            // User schemas
            CreateUserRequest,
            UserResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "User record endpoints"),
    )
)]
pub struct ApiDoc;
