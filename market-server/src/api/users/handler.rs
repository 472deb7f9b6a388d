//! User Administration Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{User, UserCreate, UserUpdate};
use crate::db::repository::UserRepository;
use crate::utils::{AppError, AppResult};

/// GET /api/users - list all users
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<User>>> {
    let repo = UserRepository::new(state.get_db());
    let users = repo.find_all().await?;
    Ok(Json(users))
}

/// GET /api/users/:id - fetch one user
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<User>> {
    let repo = UserRepository::new(state.get_db());
    let user = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {}", id)))?;
    Ok(Json(user))
}

/// POST /api/users - create a user with an explicit role
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> AppResult<Json<User>> {
    payload.validate()?;

    let repo = UserRepository::new(state.get_db());
    let user = repo.create(payload).await?;

    tracing::info!(
        user_id = %user.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
        username = %user.username,
        role = %user.role,
        "User created by admin"
    );

    Ok(Json(user))
}

/// PUT /api/users/:id - update a user
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<UserUpdate>,
) -> AppResult<Json<User>> {
    let repo = UserRepository::new(state.get_db());
    let user = repo.update(&id, payload).await?;
    Ok(Json(user))
}

/// DELETE /api/users/:id - delete a user
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = UserRepository::new(state.get_db());
    repo.delete(&id).await?;
    Ok(Json(true))
}
