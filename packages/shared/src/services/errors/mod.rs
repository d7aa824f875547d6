pub mod auth_service_errors;
pub mod challenge_service_errors;
pub mod connection_service_errors;
pub mod game_service_errors;
pub mod match_service_errors;
pub mod player_service_errors;
pub mod profile_service_errors;
pub mod user_service_errors;
