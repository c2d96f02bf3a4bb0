use anyhow::Result;
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use chrono::Utc;
use tracing::info;

use crate::{
    database::NewUserRecord,
    error::ApiError,
    models::user::{CreateUserRequest, NewUser, UserResponse},
    store::UserStore,
    AppState,
};

/// Create a new user
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created successfully", body = UserResponse),
        (status = 400, description = "Validation failed or malformed body"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, ApiError> {
    let Json(req) = payload?;
    let new_user = NewUser::try_from(req)?;

    let user = create_user_record(state.store.as_ref(), new_user).await?;

    Ok(Json(user))
}

/// Persist a validated user and return its public view
pub async fn create_user_record(store: &dyn UserStore, new_user: NewUser) -> Result<UserResponse> {
    let record = NewUserRecord::new(new_user, Utc::now());
    let user = store.insert(record).await?;

    info!("Created user {}", user.id);

    Ok(UserResponse::from(user))
}
