//! Authentication routes for register, login, and current user.

use axum::{Json, Router, extract::State, routing::{get, post}};
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::middleware::CurrentActor;
use crate::AppState;
use douane_core::actor::UserRole;
use douane_core::auth::verify_password;
use douane_shared::AppError;
use douane_shared::auth::{LoginRequest, LoginResponse, RegisterRequest, UserInfo};
use douane_store::repositories::users::CreateUserInput;

/// Creates the public auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

/// Creates the auth routes that require a valid token.
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/auth/me", get(me))
}

/// POST /auth/register - Create a user account.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<Json<UserInfo>> {
    let role = UserRole::parse(&payload.role)
        .ok_or_else(|| ApiError(AppError::InvalidInput(format!("unknown role {}", payload.role))))?;

    let user = state
        .user_repo()
        .create(CreateUserInput {
            username: payload.username,
            email: payload.email,
            password: payload.password,
            full_name: payload.full_name,
            role,
        })
        .await?;

    info!(user_id = %user.id, role = %user.role, "User registered");
    Ok(Json(user.info()))
}

/// POST /auth/login - Authenticate and return an access token.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let invalid =
        || ApiError(AppError::Unauthorized("invalid username or password".to_string()));

    let user = state
        .user_repo()
        .find_by_username(&payload.username)
        .await?
        .ok_or_else(invalid)?;

    if !user.is_active {
        return Err(ApiError(AppError::Unauthorized(
            "this account has been disabled".to_string(),
        )));
    }

    let verified = verify_password(&payload.password, &user.password_hash)
        .map_err(|e| ApiError(AppError::Internal(e.to_string())))?;
    if !verified {
        info!(user_id = %user.id, "Failed login attempt");
        return Err(invalid());
    }

    let access_token = state
        .jwt_service
        .generate_access_token(user.id, &user.full_name, user.role.as_str())
        .map_err(|e| ApiError(AppError::Internal(e.to_string())))?;

    Ok(Json(LoginResponse {
        access_token,
        token_type: "bearer".to_string(),
        expires_in: state.jwt_service.access_token_expires_in(),
        user: user.info(),
    }))
}

/// GET /auth/me - Return the authenticated user.
async fn me(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> ApiResult<Json<UserInfo>> {
    let user = state
        .user_repo()
        .find_by_id(actor.id)
        .await?
        .ok_or_else(|| ApiError(AppError::Unauthorized("unknown user".to_string())))?;
    Ok(Json(user.info()))
}
