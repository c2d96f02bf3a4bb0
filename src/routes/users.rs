use axum::{routing::post, Router};
use crate::handlers::users;
use crate::AppState;

pub fn users_router() -> Router<AppState> {
    Router::new()
        .route("/users", post(users::create_user))
}
