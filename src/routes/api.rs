use crate::AppState;
use axum::Router;

pub fn api_router() -> Router<AppState> {
    Router::new()
        // User routes live directly under the API prefix (`/api/users`)
        .merge(super::users::users_router())
}
