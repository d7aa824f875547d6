use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use tracing::{debug, error};

use crate::{error::ApiError, middleware::auth::AuthenticatedUser, state::AppState};
use shared::models::game::{CreateGameRequest, Game, RespondToJoinRequest};
use shared::models::user::UserSummary;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/games", post(create_game))
        .route("/games/{id}", get(get_game))
        .route("/games/{id}/join", post(request_to_join))
        .route("/games/{id}/requests", get(list_join_requests))
        .route("/games/{id}/requests/{user_id}", patch(respond_to_join_request))
}

async fn create_game(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Json(request): Json<CreateGameRequest>,
) -> Result<(StatusCode, Json<Game>), ApiError> {
    let game = state
        .game_service
        .create_game(&authenticated_user.user_id, request)
        .await
        .map_err(|e| {
            error!(
                "Failed to create game for host {}: {}",
                authenticated_user.user_id, e
            );
            ApiError::from(e)
        })?;
    debug!("Game {} created by {}", game.id, game.host);
    Ok((StatusCode::CREATED, Json(game)))
}

async fn get_game(
    State(state): State<AppState>,
    _authenticated_user: AuthenticatedUser,
    Path(game_id): Path<String>,
) -> Result<Json<Game>, ApiError> {
    state
        .game_service
        .get_game(&game_id)
        .await
        .map(Json)
        .map_err(|e| {
            error!("Failed to fetch game {}: {}", game_id, e);
            ApiError::from(e)
        })
}

async fn request_to_join(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(game_id): Path<String>,
) -> Result<Json<Game>, ApiError> {
    state
        .game_service
        .request_to_join(&game_id, &authenticated_user.user_id)
        .await
        .map(Json)
        .map_err(|e| {
            error!(
                "Join request for game {} by {} failed: {}",
                game_id, authenticated_user.user_id, e
            );
            ApiError::from(e)
        })
}

async fn list_join_requests(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(game_id): Path<String>,
) -> Result<Json<Vec<UserSummary>>, ApiError> {
    state
        .game_service
        .list_join_requests(&game_id, &authenticated_user.user_id)
        .await
        .map(Json)
        .map_err(|e| {
            error!(
                "Failed to list join requests for game {} as {}: {}",
                game_id, authenticated_user.user_id, e
            );
            ApiError::from(e)
        })
}

async fn respond_to_join_request(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path((game_id, target_user_id)): Path<(String, String)>,
    Json(request): Json<RespondToJoinRequest>,
) -> Result<Json<Game>, ApiError> {
    state
        .game_service
        .respond_to_join_request(
            &game_id,
            &authenticated_user.user_id,
            &target_user_id,
            request.action,
        )
        .await
        .map(Json)
        .map_err(|e| {
            error!(
                "Failed to respond to join request on game {} for {}: {}",
                game_id, target_user_id, e
            );
            ApiError::from(e)
        })
}
