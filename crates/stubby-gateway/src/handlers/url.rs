use crate::error::{AppError, Result};
use crate::model::{CreateUrlRequest, CreateUrlResponse};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use stubby_core::{ShortenerError, Token};
use tracing::{debug, info};

pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateUrlRequest>,
) -> Result<(StatusCode, Json<CreateUrlResponse>)> {
    let original_url = request
        .original_url
        .ok_or_else(|| ShortenerError::InvalidUrl("original_url is required".to_string()))?;

    let token = state.shortener().shorten(&original_url).await?;
    let shortened_url = state.short_url(&token);
    info!(token = %token, "shortened url");

    Ok((StatusCode::CREATED, Json(CreateUrlResponse { shortened_url })))
}

pub async fn redirect_handler(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Response> {
    // anything outside the token alphabet can never have been issued
    let Ok(token) = token.parse::<Token>() else {
        debug!(path = %token, "not a token");
        return Err(AppError::NotFound);
    };

    let mapping = state
        .shortener()
        .resolve(&token)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok((
        StatusCode::FOUND,
        [(header::LOCATION, mapping.original_url)],
    )
        .into_response())
}
