use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use tracing::{debug, error};

use crate::{error::ApiError, middleware::auth::AuthenticatedUser, state::AppState};
use shared::models::challenge::{
    Challenge, CreateChallengeRequest, FinalizeChallengeRequest, FinalizedChallenge,
    PopulatedChallenge, RespondToChallengeRequest,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/challenges", post(create_challenge))
        .route("/challenges", get(get_my_challenges))
        .route("/challenges/{id}/respond", patch(respond_to_challenge))
        .route("/challenges/{id}/finalize", patch(finalize_challenge))
}

async fn create_challenge(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Json(request): Json<CreateChallengeRequest>,
) -> Result<(StatusCode, Json<Challenge>), ApiError> {
    let challenge = state
        .challenge_service
        .create_challenge(&authenticated_user.user_id, request)
        .await
        .map_err(|e| {
            error!(
                "Failed to create challenge from {}: {}",
                authenticated_user.user_id, e
            );
            ApiError::from(e)
        })?;
    debug!(
        "Challenge {} sent by {} to {}",
        challenge.id, challenge.challenger, challenge.challenged
    );
    Ok((StatusCode::CREATED, Json(challenge)))
}

async fn get_my_challenges(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<Json<Vec<PopulatedChallenge>>, ApiError> {
    state
        .challenge_service
        .get_user_challenges(&authenticated_user.user_id)
        .await
        .map(Json)
        .map_err(|e| {
            error!(
                "Failed to list challenges for {}: {}",
                authenticated_user.user_id, e
            );
            ApiError::from(e)
        })
}

async fn respond_to_challenge(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(challenge_id): Path<String>,
    Json(request): Json<RespondToChallengeRequest>,
) -> Result<Json<Challenge>, ApiError> {
    state
        .challenge_service
        .respond_to_challenge(&authenticated_user.user_id, &challenge_id, request.status)
        .await
        .map(Json)
        .map_err(|e| {
            error!(
                "Failed to respond to challenge {} as {}: {}",
                challenge_id, authenticated_user.user_id, e
            );
            ApiError::from(e)
        })
}

async fn finalize_challenge(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(challenge_id): Path<String>,
    Json(request): Json<FinalizeChallengeRequest>,
) -> Result<Json<FinalizedChallenge>, ApiError> {
    let (challenge, game) = state
        .challenge_service
        .finalize_challenge(&authenticated_user.user_id, &challenge_id, request)
        .await
        .map_err(|e| {
            error!(
                "Failed to finalize challenge {} as {}: {}",
                challenge_id, authenticated_user.user_id, e
            );
            ApiError::from(e)
        })?;
    debug!("Challenge {} finalized, match {} created", challenge.id, game.id);
    Ok(Json(FinalizedChallenge { challenge, game }))
}
