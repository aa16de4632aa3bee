//! Handlers for the `/users` resource.
//!
//! Reads are public. Updates and deletes are limited to the caller's own
//! account.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use cafe_core::error::CoreError;
use cafe_core::types::DbId;
use cafe_db::models::user::{UpdateUser, UserResponse};
use cafe_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::handlers::auth::{create_account, RegisterRequest};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "User", id })
}

/// GET /api/v1/users
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(DataResponse {
        data: users.into_iter().map(UserResponse::from).collect(),
    }))
}

/// POST /api/v1/users
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    let user = create_account(&state, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: user.into() })))
}

/// GET /api/v1/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: user.into() }))
}

/// PUT /api/v1/users/{id}
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateUser>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    auth.ensure_self(id)?;

    let user = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(user_id = id, "User updated");
    Ok(Json(DataResponse { data: user.into() }))
}

/// DELETE /api/v1/users/{id}
///
/// Removes the account together with its listings and ratings.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    auth.ensure_self(id)?;

    if UserRepo::delete(&state.pool, id).await? {
        tracing::info!(user_id = id, "User deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
