//! Handlers for ratings.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use cafe_core::rating::{Rating, RatingDraft};
use cafe_core::types::DbId;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/me/ratings
pub async fn list_mine(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Rating>>>> {
    let ratings = state.ratings.list_by_owner(auth.user_id).await?;
    Ok(Json(DataResponse { data: ratings }))
}

/// GET /api/v1/users/{id}/ratings
pub async fn list_for_user(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Rating>>>> {
    auth.ensure_self(user_id)?;
    let ratings = state.ratings.list_by_owner(user_id).await?;
    Ok(Json(DataResponse { data: ratings }))
}

/// GET /api/v1/cafes/{id}/ratings
///
/// An unknown listing yields an empty list rather than a 404.
pub async fn list_for_listing(
    State(state): State<AppState>,
    Path(listing_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Rating>>>> {
    let ratings = state.ratings.list_by_listing(listing_id).await?;
    Ok(Json(DataResponse { data: ratings }))
}

/// POST /api/v1/cafes/{id}/ratings
///
/// Fails with `CAFE_NOT_VISITED` until the listing is marked visited.
pub async fn create_for_listing(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(listing_id): Path<DbId>,
    AppJson(input): AppJson<RatingDraft>,
) -> AppResult<(StatusCode, Json<DataResponse<Rating>>)> {
    let rating = state
        .ratings
        .create(auth.user_id, listing_id, &input)
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: rating })))
}

/// GET /api/v1/ratings/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Rating>>> {
    let rating = state.ratings.get_by_id(id).await?;
    Ok(Json(DataResponse { data: rating }))
}

/// PUT /api/v1/ratings/{id}
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<RatingDraft>,
) -> AppResult<Json<DataResponse<Rating>>> {
    let rating = state.ratings.update(id, auth.user_id, &input).await?;
    Ok(Json(DataResponse { data: rating }))
}

/// DELETE /api/v1/ratings/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    state.ratings.delete(id, auth.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
