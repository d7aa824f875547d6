use std::sync::Arc;

use shared::services::auth_service::AuthService;
use shared::services::challenge_service::ChallengeService;
use shared::services::connection_service::ConnectionService;
use shared::services::game_service::GameService;
use shared::services::match_service::MatchService;
use shared::services::player_service::PlayerService;
use shared::services::profile_service::ProfileService;
use shared::services::user_service::UserService;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
    pub challenge_service: Arc<ChallengeService>,
    pub game_service: Arc<GameService>,
    pub match_service: Arc<MatchService>,
    pub connection_service: Arc<ConnectionService>,
    pub player_service: Arc<PlayerService>,
    pub profile_service: Arc<ProfileService>,
}
