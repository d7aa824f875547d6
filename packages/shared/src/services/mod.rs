pub mod errors;

pub mod auth_service;
pub mod challenge_service;
pub mod connection_service;
pub mod game_service;
pub mod match_service;
pub mod player_service;
pub mod profile_service;
pub mod user_service;
