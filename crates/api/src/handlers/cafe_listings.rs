//! Handlers for cafe listings.
//!
//! Ownership and visit-status rules live in [`cafe_core::listing::ListingService`];
//! these handlers only resolve the caller and shape responses.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use cafe_core::listing::{Listing, ListingDraft, ListingQuery};
use cafe_core::types::DbId;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/me/cafes?visit_status=&sort=
pub async fn list_mine(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> AppResult<Json<DataResponse<Vec<Listing>>>> {
    let listings = state.listings.list_by_owner(auth.user_id, &query).await?;
    Ok(Json(DataResponse { data: listings }))
}

/// POST /api/v1/me/cafes
pub async fn create_mine(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<ListingDraft>,
) -> AppResult<(StatusCode, Json<DataResponse<Listing>>)> {
    let listing = state.listings.create(auth.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: listing })))
}

/// GET /api/v1/users/{id}/cafes
pub async fn list_for_user(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
    Query(query): Query<ListingQuery>,
) -> AppResult<Json<DataResponse<Vec<Listing>>>> {
    auth.ensure_self(user_id)?;
    let listings = state.listings.list_by_owner(user_id, &query).await?;
    Ok(Json(DataResponse { data: listings }))
}

/// POST /api/v1/users/{id}/cafes
pub async fn create_for_user(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
    AppJson(input): AppJson<ListingDraft>,
) -> AppResult<(StatusCode, Json<DataResponse<Listing>>)> {
    auth.ensure_self(user_id)?;
    let listing = state.listings.create(user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: listing })))
}

/// GET /api/v1/cafes/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Listing>>> {
    let listing = state.listings.get_by_id(id).await?;
    Ok(Json(DataResponse { data: listing }))
}

/// PUT /api/v1/cafes/{id}
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<ListingDraft>,
) -> AppResult<Json<DataResponse<Listing>>> {
    let listing = state.listings.update(id, auth.user_id, &input).await?;
    Ok(Json(DataResponse { data: listing }))
}

/// DELETE /api/v1/cafes/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    state.listings.delete(id, auth.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
