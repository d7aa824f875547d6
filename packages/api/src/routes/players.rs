use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use tracing::error;

use crate::{error::ApiError, middleware::auth::AuthenticatedUser, state::AppState};
use shared::models::user::{PlayerListing, PlayerQuery, PlayersPage};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/players", get(get_all_players))
        .route("/players/{user_id}", get(get_player_by_id))
}

async fn get_all_players(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Query(query): Query<PlayerQuery>,
) -> Result<Json<PlayersPage>, ApiError> {
    state
        .player_service
        .list_players(&authenticated_user.user_id, query)
        .await
        .map(Json)
        .map_err(|e| {
            error!(
                "Failed to list players for {}: {}",
                authenticated_user.user_id, e
            );
            ApiError::from(e)
        })
}

async fn get_player_by_id(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(player_id): Path<String>,
) -> Result<Json<PlayerListing>, ApiError> {
    state
        .player_service
        .get_player(&authenticated_user.user_id, &player_id)
        .await
        .map(Json)
        .map_err(|e| {
            error!("Failed to fetch player {}: {}", player_id, e);
            ApiError::from(e)
        })
}
