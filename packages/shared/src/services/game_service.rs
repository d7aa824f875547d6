use std::sync::Arc;

use tracing::warn;

use crate::models::game::{CreateGameRequest, Game, GameStatus, JoinRequestAction};
use crate::models::user::UserSummary;
use crate::repositories::errors::game_repository_errors::GameRepositoryError;
use crate::repositories::errors::user_repository_errors::UserRepositoryError;
use crate::repositories::game_repository::GameRepository;
use crate::repositories::profile_repository::{ProfileRepository, HOSTED_GAMES_COUNT};
use crate::repositories::user_repository::UserRepository;
use crate::services::errors::game_service_errors::GameServiceError;

pub struct GameService {
    game_repository: Arc<dyn GameRepository + Send + Sync>,
    user_repository: Arc<dyn UserRepository + Send + Sync>,
    profile_repository: Arc<dyn ProfileRepository + Send + Sync>,
}

impl GameService {
    pub fn new(
        game_repository: Arc<dyn GameRepository + Send + Sync>,
        user_repository: Arc<dyn UserRepository + Send + Sync>,
        profile_repository: Arc<dyn ProfileRepository + Send + Sync>,
    ) -> Self {
        GameService {
            game_repository,
            user_repository,
            profile_repository,
        }
    }

    pub async fn create_game(
        &self,
        host_id: &str,
        request: CreateGameRequest,
    ) -> Result<Game, GameServiceError> {
        if request.details.title.is_empty() {
            return Err(GameServiceError::ValidationError(
                "Title cannot be empty".to_string(),
            ));
        }
        if request.details.location.is_empty() {
            return Err(GameServiceError::ValidationError(
                "Location cannot be empty".to_string(),
            ));
        }

        // Status stays OPEN regardless of players_needed; capacity is only
        // evaluated on the accept path.
        let game = Game::new(
            host_id,
            request.quick_setup.unwrap_or_default(),
            request.details,
            request.schedule,
            request.rules.unwrap_or_default(),
            request.payment.unwrap_or_default(),
        );

        self.game_repository
            .create_game(&game)
            .await
            .map_err(|e| GameServiceError::RepositoryError(e.to_string()))?;

        // Counters are advisory; a failed bump must not fail the creation.
        if let Err(e) = self
            .profile_repository
            .add_to_counter(host_id, HOSTED_GAMES_COUNT, 1)
            .await
        {
            warn!("Failed to bump hosted games counter for {}: {}", host_id, e);
        }

        Ok(game)
    }

    pub async fn get_game(&self, game_id: &str) -> Result<Game, GameServiceError> {
        self.load_game(game_id).await
    }

    pub async fn request_to_join(
        &self,
        game_id: &str,
        user_id: &str,
    ) -> Result<Game, GameServiceError> {
        let mut game = self.load_game(game_id).await?;

        if game.host == user_id {
            return Err(GameServiceError::HostCannotJoin);
        }
        if game.players.iter().any(|p| p == user_id) {
            return Err(GameServiceError::AlreadyJoined);
        }
        if game.pending_players.iter().any(|p| p == user_id) {
            return Err(GameServiceError::AlreadyRequested);
        }
        if game.status == GameStatus::Full {
            return Err(GameServiceError::GameFull);
        }

        game.pending_players.push(user_id.to_string());
        self.save_game(game).await
    }

    pub async fn list_join_requests(
        &self,
        game_id: &str,
        owner_id: &str,
    ) -> Result<Vec<UserSummary>, GameServiceError> {
        let game = self.load_game(game_id).await?;

        if game.host != owner_id {
            return Err(GameServiceError::NotGameHost);
        }

        let mut pending = Vec::with_capacity(game.pending_players.len());
        for user_id in &game.pending_players {
            let summary = match self.user_repository.get_user_by_id(user_id).await {
                Ok(user) => UserSummary::from(&user),
                Err(UserRepositoryError::NotFound) => UserSummary {
                    id: user_id.clone(),
                    username: String::new(),
                    full_name: None,
                    city: None,
                },
                Err(e) => return Err(GameServiceError::RepositoryError(e.to_string())),
            };
            pending.push(summary);
        }
        Ok(pending)
    }

    pub async fn respond_to_join_request(
        &self,
        game_id: &str,
        owner_id: &str,
        target_user_id: &str,
        action: JoinRequestAction,
    ) -> Result<Game, GameServiceError> {
        let mut game = self.load_game(game_id).await?;

        if game.host != owner_id {
            return Err(GameServiceError::NotGameHost);
        }

        let position = game
            .pending_players
            .iter()
            .position(|p| p == target_user_id)
            .ok_or(GameServiceError::NoPendingRequest)?;
        game.pending_players.remove(position);

        if action == JoinRequestAction::Accept {
            if game.status == GameStatus::Full {
                return Err(GameServiceError::GameFull);
            }
            game.players.push(target_user_id.to_string());
            if game.at_capacity() {
                game.status = GameStatus::Full;
            }
        }

        self.save_game(game).await
    }

    async fn load_game(&self, game_id: &str) -> Result<Game, GameServiceError> {
        self.game_repository
            .get_game_by_id(game_id)
            .await
            .map_err(|e| match e {
                GameRepositoryError::NotFound => GameServiceError::GameNotFound,
                _ => GameServiceError::RepositoryError(e.to_string()),
            })
    }

    async fn save_game(&self, game: Game) -> Result<Game, GameServiceError> {
        self.game_repository
            .save_game(&game)
            .await
            .map_err(|e| match e {
                GameRepositoryError::VersionConflict => GameServiceError::Conflict,
                _ => GameServiceError::RepositoryError(e.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::game::{
        GameDetails, GameRules, GameSchedule, PaymentInfo, QuickSetup,
    };
    use crate::models::user::User;
    use crate::repositories::game_repository::MockGameRepository;
    use crate::repositories::profile_repository::MockProfileRepository;
    use crate::repositories::user_repository::MockUserRepository;
    use chrono::Utc;

    fn service(
        games: MockGameRepository,
        users: MockUserRepository,
        profiles: MockProfileRepository,
    ) -> GameService {
        GameService::new(Arc::new(games), Arc::new(users), Arc::new(profiles))
    }

    fn create_request(players_needed: Option<u32>) -> CreateGameRequest {
        CreateGameRequest {
            quick_setup: None,
            details: GameDetails {
                title: "Sunday league".to_string(),
                description: None,
                location: "East park".to_string(),
                coordinates: None,
            },
            schedule: GameSchedule {
                date: Utc::now(),
                time: Some("10:00".to_string()),
                duration: Some("60 mins".to_string()),
                players_needed,
            },
            rules: None,
            payment: None,
        }
    }

    fn sample_game(host: &str, players_needed: Option<u32>) -> Game {
        Game::new(
            host,
            QuickSetup::default(),
            GameDetails {
                title: "Sunday league".to_string(),
                description: None,
                location: "East park".to_string(),
                coordinates: None,
            },
            GameSchedule {
                date: Utc::now(),
                time: None,
                duration: None,
                players_needed,
            },
            GameRules::default(),
            PaymentInfo::default(),
        )
    }

    fn counting_profiles() -> MockProfileRepository {
        let mut profiles = MockProfileRepository::new();
        profiles.expect_add_to_counter().returning(|_, _, _| Ok(()));
        profiles
    }

    #[tokio::test]
    async fn test_create_game_host_is_first_player() {
        let mut games = MockGameRepository::new();
        games
            .expect_create_game()
            .withf(|g| {
                g.players == vec!["host".to_string()]
                    && g.pending_players.is_empty()
                    && g.status == GameStatus::Open
            })
            .times(1)
            .returning(|_| Ok(()));

        let svc = service(games, MockUserRepository::new(), counting_profiles());

        let game = svc.create_game("host", create_request(Some(10))).await.unwrap();
        assert_eq!(game.host, "host");
        assert_eq!(game.status, GameStatus::Open);
    }

    #[tokio::test]
    async fn test_create_game_with_capacity_already_met_stays_open() {
        // players_needed = 1 and the host already fills the roster, but
        // creation never recomputes capacity: the game stays OPEN until an
        // accept runs the recomputation.
        let mut games = MockGameRepository::new();
        games.expect_create_game().returning(|_| Ok(()));

        let svc = service(games, MockUserRepository::new(), counting_profiles());

        let game = svc.create_game("host", create_request(Some(1))).await.unwrap();
        assert_eq!(game.players.len(), 1);
        assert!(game.at_capacity());
        assert_eq!(game.status, GameStatus::Open);
    }

    #[tokio::test]
    async fn test_create_game_requires_title() {
        let mut request = create_request(None);
        request.details.title = String::new();

        let svc = service(
            MockGameRepository::new(),
            MockUserRepository::new(),
            MockProfileRepository::new(),
        );

        let result = svc.create_game("host", request).await;
        assert!(matches!(result, Err(GameServiceError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_host_cannot_request_to_join() {
        let game = sample_game("host", Some(4));
        let mut games = MockGameRepository::new();
        let stored = game.clone();
        games
            .expect_get_game_by_id()
            .returning(move |_| Ok(stored.clone()));

        let svc = service(games, MockUserRepository::new(), MockProfileRepository::new());

        let result = svc.request_to_join(&game.id, "host").await;
        assert!(matches!(result, Err(GameServiceError::HostCannotJoin)));
    }

    #[tokio::test]
    async fn test_existing_player_cannot_request_again() {
        let mut game = sample_game("host", Some(4));
        game.players.push("already-in".to_string());
        let mut games = MockGameRepository::new();
        let stored = game.clone();
        games
            .expect_get_game_by_id()
            .returning(move |_| Ok(stored.clone()));

        let svc = service(games, MockUserRepository::new(), MockProfileRepository::new());

        let result = svc.request_to_join(&game.id, "already-in").await;
        assert!(matches!(result, Err(GameServiceError::AlreadyJoined)));
    }

    #[tokio::test]
    async fn test_duplicate_join_request_rejected() {
        let mut game = sample_game("host", Some(4));
        game.pending_players.push("eager".to_string());
        let mut games = MockGameRepository::new();
        let stored = game.clone();
        games
            .expect_get_game_by_id()
            .returning(move |_| Ok(stored.clone()));

        let svc = service(games, MockUserRepository::new(), MockProfileRepository::new());

        let result = svc.request_to_join(&game.id, "eager").await;
        assert!(matches!(result, Err(GameServiceError::AlreadyRequested)));
    }

    #[tokio::test]
    async fn test_join_request_rejected_when_full() {
        let mut game = sample_game("host", Some(1));
        game.status = GameStatus::Full;
        let mut games = MockGameRepository::new();
        let stored = game.clone();
        games
            .expect_get_game_by_id()
            .returning(move |_| Ok(stored.clone()));

        let svc = service(games, MockUserRepository::new(), MockProfileRepository::new());

        let result = svc.request_to_join(&game.id, "late").await;
        assert!(matches!(result, Err(GameServiceError::GameFull)));
    }

    #[tokio::test]
    async fn test_join_request_appends_single_pending_entry() {
        let game = sample_game("host", Some(4));
        let mut games = MockGameRepository::new();
        let stored = game.clone();
        games
            .expect_get_game_by_id()
            .returning(move |_| Ok(stored.clone()));
        games
            .expect_save_game()
            .withf(|g| g.pending_players == vec!["newcomer".to_string()] && g.players.len() == 1)
            .times(1)
            .returning(|g| {
                let mut saved = g.clone();
                saved.version += 1;
                Ok(saved)
            });

        let svc = service(games, MockUserRepository::new(), MockProfileRepository::new());

        let updated = svc.request_to_join(&game.id, "newcomer").await.unwrap();
        assert_eq!(updated.pending_players, vec!["newcomer".to_string()]);
    }

    #[tokio::test]
    async fn test_list_join_requests_requires_host() {
        let game = sample_game("host", Some(4));
        let mut games = MockGameRepository::new();
        let stored = game.clone();
        games
            .expect_get_game_by_id()
            .returning(move |_| Ok(stored.clone()));

        let svc = service(games, MockUserRepository::new(), MockProfileRepository::new());

        let result = svc.list_join_requests(&game.id, "stranger").await;
        assert!(matches!(result, Err(GameServiceError::NotGameHost)));
    }

    #[tokio::test]
    async fn test_list_join_requests_populates_users() {
        let mut game = sample_game("host", Some(4));
        game.pending_players.push("waiting".to_string());
        let mut games = MockGameRepository::new();
        let stored = game.clone();
        games
            .expect_get_game_by_id()
            .returning(move |_| Ok(stored.clone()));

        let mut users = MockUserRepository::new();
        users.expect_get_user_by_id().returning(|id| {
            let mut user = User::new(format!("user-{}", id), format!("{}@x.com", id), "h".into());
            user.id = id.to_string();
            user.full_name = Some("Wendy Ait".to_string());
            Ok(user)
        });

        let svc = service(games, users, MockProfileRepository::new());

        let pending = svc.list_join_requests(&game.id, "host").await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, "waiting");
        assert_eq!(pending[0].full_name.as_deref(), Some("Wendy Ait"));
    }

    #[tokio::test]
    async fn test_respond_requires_host() {
        let game = sample_game("host", Some(4));
        let mut games = MockGameRepository::new();
        let stored = game.clone();
        games
            .expect_get_game_by_id()
            .returning(move |_| Ok(stored.clone()));

        let svc = service(games, MockUserRepository::new(), MockProfileRepository::new());

        let result = svc
            .respond_to_join_request(&game.id, "stranger", "anyone", JoinRequestAction::Accept)
            .await;
        assert!(matches!(result, Err(GameServiceError::NotGameHost)));
    }

    #[tokio::test]
    async fn test_respond_requires_pending_request() {
        let game = sample_game("host", Some(4));
        let mut games = MockGameRepository::new();
        let stored = game.clone();
        games
            .expect_get_game_by_id()
            .returning(move |_| Ok(stored.clone()));

        let svc = service(games, MockUserRepository::new(), MockProfileRepository::new());

        let result = svc
            .respond_to_join_request(&game.id, "host", "nobody", JoinRequestAction::Accept)
            .await;
        assert!(matches!(result, Err(GameServiceError::NoPendingRequest)));
    }

    #[tokio::test]
    async fn test_accept_crossing_capacity_sets_full() {
        // playersNeeded = 2, roster = [host]; accepting one request reaches
        // capacity and flips the status.
        let mut game = sample_game("host", Some(2));
        game.pending_players.push("joiner".to_string());
        let mut games = MockGameRepository::new();
        let stored = game.clone();
        games
            .expect_get_game_by_id()
            .returning(move |_| Ok(stored.clone()));
        games
            .expect_save_game()
            .withf(|g| {
                g.players == vec!["host".to_string(), "joiner".to_string()]
                    && g.pending_players.is_empty()
                    && g.status == GameStatus::Full
            })
            .times(1)
            .returning(|g| {
                let mut saved = g.clone();
                saved.version += 1;
                Ok(saved)
            });

        let svc = service(games, MockUserRepository::new(), MockProfileRepository::new());

        let updated = svc
            .respond_to_join_request(&game.id, "host", "joiner", JoinRequestAction::Accept)
            .await
            .unwrap();
        assert_eq!(updated.status, GameStatus::Full);
        assert_eq!(updated.players.len(), 2);
    }

    #[tokio::test]
    async fn test_accept_below_capacity_stays_open() {
        let mut game = sample_game("host", Some(3));
        game.pending_players.push("joiner".to_string());
        let mut games = MockGameRepository::new();
        let stored = game.clone();
        games
            .expect_get_game_by_id()
            .returning(move |_| Ok(stored.clone()));
        games
            .expect_save_game()
            .withf(|g| g.status == GameStatus::Open && g.players.len() == 2)
            .times(1)
            .returning(|g| Ok(g.clone()));

        let svc = service(games, MockUserRepository::new(), MockProfileRepository::new());

        let updated = svc
            .respond_to_join_request(&game.id, "host", "joiner", JoinRequestAction::Accept)
            .await
            .unwrap();
        assert_eq!(updated.status, GameStatus::Open);
    }

    #[tokio::test]
    async fn test_accept_on_full_game_fails() {
        let mut game = sample_game("host", Some(1));
        game.status = GameStatus::Full;
        game.pending_players.push("late".to_string());
        let mut games = MockGameRepository::new();
        let stored = game.clone();
        games
            .expect_get_game_by_id()
            .returning(move |_| Ok(stored.clone()));
        // No save expected: the request fails before any write.

        let svc = service(games, MockUserRepository::new(), MockProfileRepository::new());

        let result = svc
            .respond_to_join_request(&game.id, "host", "late", JoinRequestAction::Accept)
            .await;
        assert!(matches!(result, Err(GameServiceError::GameFull)));
    }

    #[tokio::test]
    async fn test_reject_removes_pending_only() {
        let mut game = sample_game("host", Some(2));
        game.pending_players.push("declined".to_string());
        let mut games = MockGameRepository::new();
        let stored = game.clone();
        games
            .expect_get_game_by_id()
            .returning(move |_| Ok(stored.clone()));
        games
            .expect_save_game()
            .withf(|g| {
                g.pending_players.is_empty()
                    && g.players == vec!["host".to_string()]
                    && g.status == GameStatus::Open
            })
            .times(1)
            .returning(|g| Ok(g.clone()));

        let svc = service(games, MockUserRepository::new(), MockProfileRepository::new());

        let updated = svc
            .respond_to_join_request(&game.id, "host", "declined", JoinRequestAction::Reject)
            .await
            .unwrap();
        assert!(updated.pending_players.is_empty());
        assert_eq!(updated.players, vec!["host".to_string()]);
    }

    #[tokio::test]
    async fn test_lost_version_race_surfaces_conflict() {
        let mut game = sample_game("host", Some(4));
        game.pending_players.push("joiner".to_string());
        let mut games = MockGameRepository::new();
        let stored = game.clone();
        games
            .expect_get_game_by_id()
            .returning(move |_| Ok(stored.clone()));
        games
            .expect_save_game()
            .returning(|_| Err(GameRepositoryError::VersionConflict));

        let svc = service(games, MockUserRepository::new(), MockProfileRepository::new());

        let result = svc
            .respond_to_join_request(&game.id, "host", "joiner", JoinRequestAction::Accept)
            .await;
        assert!(matches!(result, Err(GameServiceError::Conflict)));
    }
}
