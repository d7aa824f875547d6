use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::{debug, error};

use crate::{error::ApiError, state::AppState};
use shared::models::auth::requests::{LoginRequest, RegisterRequest};
use shared::models::auth::responses::AuthResponse;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let username = request.username.clone();
    let (user, login) = state.auth_service.register(request).await.map_err(|e| {
        error!("Failed to register user {}: {}", username, e);
        ApiError::from(e)
    })?;
    debug!("User registered successfully: {}", user.username);
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse::new(user.into(), login)),
    ))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let identifier = request.identifier.clone();
    let (user, login) = state.auth_service.login(request).await.map_err(|e| {
        error!("Failed to authenticate {}: {}", identifier, e);
        ApiError::from(e)
    })?;
    Ok(Json(AuthResponse::new(user.into(), login)))
}
