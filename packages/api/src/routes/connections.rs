use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use tracing::{debug, error};

use crate::{error::ApiError, middleware::auth::AuthenticatedUser, state::AppState};
use shared::models::connection::{Connection, ConnectionListing};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/connections/request/{user_id}", post(send_request))
        .route("/connections/accept/{user_id}", post(accept_request))
        .route("/connections/reject/{user_id}", post(reject_request))
        .route("/connections/pending", get(get_pending_connections))
        .route("/connections/accepted", get(get_accepted_connections))
        .route("/connections/{user_id}", delete(remove_connection))
}

async fn send_request(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(user_id): Path<String>,
) -> Result<(StatusCode, Json<Connection>), ApiError> {
    let connection = state
        .connection_service
        .send_request(&authenticated_user.user_id, &user_id)
        .await
        .map_err(|e| {
            error!(
                "Failed to send connection request {} -> {}: {}",
                authenticated_user.user_id, user_id, e
            );
            ApiError::from(e)
        })?;
    debug!(
        "Connection request sent {} -> {}",
        connection.requester, connection.receiver
    );
    Ok((StatusCode::CREATED, Json(connection)))
}

async fn accept_request(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(user_id): Path<String>,
) -> Result<Json<Connection>, ApiError> {
    state
        .connection_service
        .accept_request(&authenticated_user.user_id, &user_id)
        .await
        .map(Json)
        .map_err(|e| {
            error!(
                "Failed to accept connection request from {}: {}",
                user_id, e
            );
            ApiError::from(e)
        })
}

async fn reject_request(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(user_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .connection_service
        .reject_request(&authenticated_user.user_id, &user_id)
        .await
        .map_err(|e| {
            error!(
                "Failed to reject connection request from {}: {}",
                user_id, e
            );
            ApiError::from(e)
        })?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_pending_connections(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<Json<Vec<ConnectionListing>>, ApiError> {
    state
        .connection_service
        .list_pending(&authenticated_user.user_id)
        .await
        .map(Json)
        .map_err(|e| {
            error!(
                "Failed to list pending connections for {}: {}",
                authenticated_user.user_id, e
            );
            ApiError::from(e)
        })
}

async fn get_accepted_connections(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<Json<Vec<ConnectionListing>>, ApiError> {
    state
        .connection_service
        .list_accepted(&authenticated_user.user_id)
        .await
        .map(Json)
        .map_err(|e| {
            error!(
                "Failed to list accepted connections for {}: {}",
                authenticated_user.user_id, e
            );
            ApiError::from(e)
        })
}

async fn remove_connection(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(user_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .connection_service
        .remove_connection(&authenticated_user.user_id, &user_id)
        .await
        .map_err(|e| {
            error!(
                "Failed to remove connection {} -> {}: {}",
                authenticated_user.user_id, user_id, e
            );
            ApiError::from(e)
        })?;
    Ok(StatusCode::NO_CONTENT)
}
