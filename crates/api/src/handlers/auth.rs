//! Handlers for the `/auth` resource (register, login).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use cafe_core::error::CoreError;
use cafe_core::types::{DbId, Timestamp};
use cafe_db::models::user::{CreateUser, User};
use cafe_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register` and `POST /users`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[serde(default)]
    pub name: String,
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    /// RFC 3339 expiry instant.
    pub expires_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create an account and return a token for it. A taken email is a 409.
pub async fn register(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<TokenResponse>>)> {
    let user = create_account(&state, &input).await?;
    let token = issue_token(&state, user.id)?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: token })))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<DataResponse<TokenResponse>>> {
    if input.email.trim().is_empty() || input.password.is_empty() {
        return Err(AppError::BadRequest("email and password required".into()));
    }

    let invalid = || AppError::Core(CoreError::Unauthorized("Invalid email or password".into()));

    let user = UserRepo::find_by_email(&state.pool, input.email.trim())
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::debug!(user_id = user.id, "Rejected login");
        return Err(invalid());
    }

    let token = issue_token(&state, user.id)?;
    tracing::info!(user_id = user.id, "User logged in");
    Ok(Json(DataResponse { data: token }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Validate, hash and insert a new account.
pub(crate) async fn create_account(state: &AppState, input: &RegisterRequest) -> AppResult<User> {
    if input.email.trim().is_empty() || input.password.is_empty() {
        return Err(AppError::BadRequest("email and password required".into()));
    }
    input.validate().map_err(CoreError::from)?;
    validate_password_strength(&input.password)?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email: input.email.trim().to_string(),
            name: input.name.trim().to_string(),
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User registered");
    Ok(user)
}

fn issue_token(state: &AppState, user_id: DbId) -> AppResult<TokenResponse> {
    let issued = generate_access_token(user_id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    Ok(TokenResponse {
        token: issued.token,
        expires_at: issued.expires_at,
    })
}
