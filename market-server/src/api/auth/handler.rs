//! Authentication Handlers
//!
//! Handles signup, login and current-user lookup

use axum::{Json, extract::State};
use validator::Validate;

use shared::client::{LoginRequest, LoginResponse, SignupRequest, UserInfo};
use shared::{ApiResponse, ok};

use crate::AppError;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Role, User, UserCreate};
use crate::db::repository::UserRepository;
use crate::security_log;

fn user_info(user: &User) -> UserInfo {
    UserInfo {
        id: user
            .id
            .as_ref()
            .map(|id| id.to_string())
            .unwrap_or_default(),
        username: user.username.clone(),
        email: user.email.clone(),
        role: user.role.to_string(),
    }
}

/// Signup handler
///
/// Registers a buyer account and returns a fresh token. Roles other than
/// buyer are only ever assigned through the admin user API.
pub async fn signup(
    State(state): State<ServerState>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    req.validate()?;

    let repo = UserRepository::new(state.get_db());
    let user = repo
        .create(UserCreate {
            username: req.username,
            email: req.email,
            password: req.password,
            role: Role::Buyer,
        })
        .await?;

    let token = issue_token(&state, &user)?;

    tracing::info!(
        user_id = %user.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
        username = %user.username,
        "User signed up"
    );

    Ok(ok(LoginResponse {
        token,
        user: user_info(&user),
    }))
}

/// Login handler
///
/// Authenticates credentials and returns a JWT token. Failures are
/// reported with one unified message to prevent account enumeration.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    let repo = UserRepository::new(state.get_db());

    let user = match repo.find_by_email(&req.email).await? {
        Some(user) => user,
        None => {
            security_log!("WARN", "login_failed", email = req.email.clone());
            return Err(AppError::invalid_credentials());
        }
    };

    let password_valid = user
        .verify_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;

    if !password_valid {
        security_log!("WARN", "login_failed", email = req.email.clone());
        return Err(AppError::invalid_credentials());
    }

    let token = issue_token(&state, &user)?;

    tracing::info!(
        user_id = %user.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
        username = %user.username,
        role = %user.role,
        "User logged in successfully"
    );

    Ok(ok(LoginResponse {
        token,
        user: user_info(&user),
    }))
}

/// Get current user info
pub async fn me(user: CurrentUser) -> Result<Json<ApiResponse<UserInfo>>, AppError> {
    Ok(ok(UserInfo {
        id: user.id,
        username: user.username,
        email: user.email,
        role: user.role.to_string(),
    }))
}

fn issue_token(state: &ServerState, user: &User) -> Result<String, AppError> {
    let user_id = user
        .id
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_default();

    state
        .get_jwt_service()
        .generate_token(&user_id, &user.username, &user.email, user.role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))
}
