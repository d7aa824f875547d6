use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::error;

use crate::{error::ApiError, middleware::auth::AuthenticatedUser, state::AppState};
use shared::models::matches::PopulatedMatch;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/matches/upcoming", get(get_upcoming_matches))
        .route("/matches/{id}", get(get_match))
}

async fn get_upcoming_matches(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<Json<Vec<PopulatedMatch>>, ApiError> {
    state
        .match_service
        .get_upcoming_matches(&authenticated_user.user_id)
        .await
        .map(Json)
        .map_err(|e| {
            error!(
                "Failed to list upcoming matches for {}: {}",
                authenticated_user.user_id, e
            );
            ApiError::from(e)
        })
}

async fn get_match(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(match_id): Path<String>,
) -> Result<Json<PopulatedMatch>, ApiError> {
    state
        .match_service
        .get_match(&authenticated_user.user_id, &match_id)
        .await
        .map(Json)
        .map_err(|e| {
            error!(
                "Failed to fetch match {} for {}: {}",
                match_id, authenticated_user.user_id, e
            );
            ApiError::from(e)
        })
}
