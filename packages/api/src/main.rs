use axum::{routing::get, Router};
use lambda_http::{run, tracing, Error};
use std::env::set_var;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use shared::repositories::challenge_repository::DynamoDbChallengeRepository;
use shared::repositories::connection_repository::DynamoDbConnectionRepository;
use shared::repositories::game_repository::DynamoDbGameRepository;
use shared::repositories::match_repository::DynamoDbMatchRepository;
use shared::repositories::profile_repository::DynamoDbProfileRepository;
use shared::repositories::user_repository::DynamoDbUserRepository;
use shared::services::auth_service::AuthService;
use shared::services::challenge_service::ChallengeService;
use shared::services::connection_service::ConnectionService;
use shared::services::game_service::GameService;
use shared::services::match_service::MatchService;
use shared::services::player_service::PlayerService;
use shared::services::profile_service::ProfileService;
use shared::services::user_service::UserService;

#[tokio::main]
async fn main() -> Result<(), Error> {
    set_var("AWS_LAMBDA_HTTP_IGNORE_STAGE_IN_PATH", "true");

    // required to enable CloudWatch error logging by the runtime
    tracing::init_default_subscriber();

    let config = aws_config::load_from_env().await;
    let client = aws_sdk_dynamodb::Client::new(&config);

    let user_repository = Arc::new(DynamoDbUserRepository::new(client.clone()));
    let challenge_repository = Arc::new(DynamoDbChallengeRepository::new(client.clone()));
    let game_repository = Arc::new(DynamoDbGameRepository::new(client.clone()));
    let match_repository = Arc::new(DynamoDbMatchRepository::new(client.clone()));
    let connection_repository = Arc::new(DynamoDbConnectionRepository::new(client.clone()));
    let profile_repository = Arc::new(DynamoDbProfileRepository::new(client.clone()));

    let user_service = Arc::new(UserService::new(user_repository.clone()));
    let auth_service = Arc::new(AuthService::new(user_service.clone()));
    let challenge_service = Arc::new(ChallengeService::new(
        challenge_repository.clone(),
        match_repository.clone(),
        user_repository.clone(),
    ));
    let game_service = Arc::new(GameService::new(
        game_repository,
        user_repository.clone(),
        profile_repository.clone(),
    ));
    let match_service = Arc::new(MatchService::new(
        match_repository,
        challenge_repository,
        user_repository.clone(),
    ));
    let connection_service = Arc::new(ConnectionService::new(
        connection_repository,
        user_repository.clone(),
        profile_repository.clone(),
    ));
    let player_service = Arc::new(PlayerService::new(
        user_repository.clone(),
        profile_repository.clone(),
    ));
    let profile_service = Arc::new(ProfileService::new(profile_repository, user_repository));

    let app_state = state::AppState {
        auth_service,
        user_service,
        challenge_service,
        game_service,
        match_service,
        connection_service,
        player_service,
        profile_service,
    };

    // Configure CORS
    // ToDo: Tighten this up
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Merge routes
    let app = Router::new()
        .route("/health", get(routes::health::health_check))
        .merge(routes::auth::routes())
        .merge(routes::profile::routes())
        .merge(routes::players::routes())
        .merge(routes::connections::routes())
        .merge(routes::challenges::routes())
        .merge(routes::games::routes())
        .merge(routes::matches::routes())
        .layer(cors)
        .with_state(app_state);

    run(app).await
}
