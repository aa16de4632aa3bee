use axum::extract::FromRequest;

use crate::error::AppError;

/// JSON request body whose rejections (bad syntax, wrong content type,
/// missing fields) render as a `BAD_REQUEST` error body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
