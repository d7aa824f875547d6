pub mod challenge_repository_errors;
pub mod connection_repository_errors;
pub mod game_repository_errors;
pub mod match_repository_errors;
pub mod profile_repository_errors;
pub mod user_repository_errors;
