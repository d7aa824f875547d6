use axum::{
    extract::State,
    routing::{delete, get, post, put},
    Json, Router,
};
use tracing::error;

use crate::{error::ApiError, middleware::auth::AuthenticatedUser, state::AppState};
use shared::models::player_profile::{
    AddImageRequest, AddVideoRequest, PlayerProfile, ProfileView, RemoveMediaRequest,
    SaveProfileRequest,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/profile/me", get(get_my_profile))
        .route("/profile/me", put(save_profile))
        .route("/profile/media/image", post(add_image))
        .route("/profile/media/image", delete(delete_image))
        .route("/profile/media/video", post(add_video))
        .route("/profile/media/video", delete(delete_video))
}

async fn get_my_profile(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<Json<ProfileView>, ApiError> {
    state
        .profile_service
        .get_my_profile(&authenticated_user.user_id)
        .await
        .map(Json)
        .map_err(|e| {
            error!(
                "Failed to load profile for {}: {}",
                authenticated_user.user_id, e
            );
            ApiError::from(e)
        })
}

async fn save_profile(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Json(request): Json<SaveProfileRequest>,
) -> Result<Json<PlayerProfile>, ApiError> {
    state
        .profile_service
        .save_profile(&authenticated_user.user_id, request)
        .await
        .map(Json)
        .map_err(|e| {
            error!(
                "Failed to save profile for {}: {}",
                authenticated_user.user_id, e
            );
            ApiError::from(e)
        })
}

async fn add_image(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Json(request): Json<AddImageRequest>,
) -> Result<Json<PlayerProfile>, ApiError> {
    state
        .profile_service
        .add_image(&authenticated_user.user_id, request.url)
        .await
        .map(Json)
        .map_err(|e| {
            error!(
                "Failed to add image for {}: {}",
                authenticated_user.user_id, e
            );
            ApiError::from(e)
        })
}

async fn add_video(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Json(request): Json<AddVideoRequest>,
) -> Result<Json<PlayerProfile>, ApiError> {
    state
        .profile_service
        .add_video(&authenticated_user.user_id, request.url, request.thumbnail)
        .await
        .map(Json)
        .map_err(|e| {
            error!(
                "Failed to add video for {}: {}",
                authenticated_user.user_id, e
            );
            ApiError::from(e)
        })
}

async fn delete_image(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Json(request): Json<RemoveMediaRequest>,
) -> Result<Json<PlayerProfile>, ApiError> {
    state
        .profile_service
        .delete_image(&authenticated_user.user_id, &request.url)
        .await
        .map(Json)
        .map_err(|e| {
            error!(
                "Failed to delete image for {}: {}",
                authenticated_user.user_id, e
            );
            ApiError::from(e)
        })
}

async fn delete_video(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Json(request): Json<RemoveMediaRequest>,
) -> Result<Json<PlayerProfile>, ApiError> {
    state
        .profile_service
        .delete_video(&authenticated_user.user_id, &request.url)
        .await
        .map(Json)
        .map_err(|e| {
            error!(
                "Failed to delete video for {}: {}",
                authenticated_user.user_id, e
            );
            ApiError::from(e)
        })
}
