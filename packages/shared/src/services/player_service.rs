use std::sync::Arc;

use crate::models::user::{Pagination, PlayerListing, PlayerQuery, PlayersPage, PublicUser};
use crate::repositories::errors::user_repository_errors::UserRepositoryError;
use crate::repositories::profile_repository::ProfileRepository;
use crate::repositories::user_repository::UserRepository;
use crate::services::errors::player_service_errors::PlayerServiceError;

const DEFAULT_PAGE_SIZE: u32 = 10;
const MAX_PAGE_SIZE: u32 = 100;

pub struct PlayerService {
    user_repository: Arc<dyn UserRepository + Send + Sync>,
    profile_repository: Arc<dyn ProfileRepository + Send + Sync>,
}

impl PlayerService {
    pub fn new(
        user_repository: Arc<dyn UserRepository + Send + Sync>,
        profile_repository: Arc<dyn ProfileRepository + Send + Sync>,
    ) -> Self {
        PlayerService {
            user_repository,
            profile_repository,
        }
    }

    /// Discovery listing: everyone except the caller, with optional
    /// case-insensitive name search and city filter, paged.
    pub async fn list_players(
        &self,
        current_user_id: &str,
        query: PlayerQuery,
    ) -> Result<PlayersPage, PlayerServiceError> {
        self.user_repository
            .get_user_by_id(current_user_id)
            .await
            .map_err(|e| match e {
                UserRepositoryError::NotFound => PlayerServiceError::CurrentUserNotFound,
                _ => PlayerServiceError::RepositoryError(e.to_string()),
            })?;

        let mut players: Vec<_> = self
            .user_repository
            .list_users()
            .await
            .map_err(|e| PlayerServiceError::RepositoryError(e.to_string()))?
            .into_iter()
            .filter(|user| user.id != current_user_id)
            .collect();

        if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
            let needle = search.to_lowercase();
            players.retain(|user| {
                user.full_name
                    .as_deref()
                    .map_or(false, |name| name.to_lowercase().contains(&needle))
            });
        }
        if let Some(city) = query.city.as_deref().filter(|c| !c.is_empty()) {
            players.retain(|user| user.city.as_deref() == Some(city));
        }

        let total_players = players.len() as u32;
        let limit = query
            .limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        let page = query.page.unwrap_or(1).max(1);
        let total_pages = total_players.div_ceil(limit);

        let offset = ((page - 1) * limit) as usize;
        let mut listings = Vec::new();
        for user in players.into_iter().skip(offset).take(limit as usize) {
            let player_profile = self.profile_repository.get_profile(&user.id).await.ok();
            listings.push(PlayerListing {
                user: PublicUser::from(user),
                player_profile,
            });
        }

        Ok(PlayersPage {
            players: listings,
            pagination: Pagination {
                current_page: page,
                total_pages,
                total_players,
                players_per_page: limit,
            },
        })
    }

    pub async fn get_player(
        &self,
        current_user_id: &str,
        player_id: &str,
    ) -> Result<PlayerListing, PlayerServiceError> {
        if player_id == current_user_id {
            return Err(PlayerServiceError::OwnProfile);
        }

        let user = self
            .user_repository
            .get_user_by_id(player_id)
            .await
            .map_err(|e| match e {
                UserRepositoryError::NotFound => PlayerServiceError::PlayerNotFound,
                _ => PlayerServiceError::RepositoryError(e.to_string()),
            })?;
        if user.is_deleted {
            return Err(PlayerServiceError::PlayerNotFound);
        }

        let player_profile = self.profile_repository.get_profile(player_id).await.ok();
        Ok(PlayerListing {
            user: PublicUser::from(user),
            player_profile,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::User;
    use crate::repositories::errors::profile_repository_errors::ProfileRepositoryError;
    use crate::repositories::profile_repository::MockProfileRepository;
    use crate::repositories::user_repository::MockUserRepository;

    fn named_user(id: &str, name: &str, city: &str) -> User {
        let mut user = User::new(format!("u-{}", id), format!("{}@x.com", id), "h".into());
        user.id = id.to_string();
        user.full_name = Some(name.to_string());
        user.city = Some(city.to_string());
        user
    }

    fn profiles_absent() -> MockProfileRepository {
        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_get_profile()
            .returning(|_| Err(ProfileRepositoryError::NotFound));
        profiles
    }

    fn listing_repo(me: User, others: Vec<User>) -> MockUserRepository {
        let mut users = MockUserRepository::new();
        let me_clone = me.clone();
        users
            .expect_get_user_by_id()
            .returning(move |_| Ok(me_clone.clone()));
        let mut all = vec![me];
        all.extend(others);
        users.expect_list_users().returning(move || Ok(all.clone()));
        users
    }

    #[tokio::test]
    async fn test_listing_excludes_caller() {
        let me = named_user("me", "Me Myself", "Porto");
        let other = named_user("other", "Jo Costa", "Porto");
        let users = listing_repo(me, vec![other]);

        let svc = PlayerService::new(Arc::new(users), Arc::new(profiles_absent()));
        let page = svc.list_players("me", PlayerQuery::default()).await.unwrap();

        assert_eq!(page.pagination.total_players, 1);
        assert_eq!(page.players.len(), 1);
        assert_eq!(page.players[0].user.id, "other");
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let me = named_user("me", "Me", "Porto");
        let hit = named_user("a", "Diego Ferreira", "Porto");
        let miss = named_user("b", "Ana Lima", "Porto");
        let users = listing_repo(me, vec![hit, miss]);

        let svc = PlayerService::new(Arc::new(users), Arc::new(profiles_absent()));
        let page = svc
            .list_players(
                "me",
                PlayerQuery {
                    search: Some("ferre".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(page.players.len(), 1);
        assert_eq!(page.players[0].user.id, "a");
    }

    #[tokio::test]
    async fn test_pagination_counts() {
        let me = named_user("me", "Me", "X");
        let others: Vec<User> = (0..25)
            .map(|i| named_user(&format!("p{}", i), "Player", "X"))
            .collect();
        let users = listing_repo(me, others);

        let svc = PlayerService::new(Arc::new(users), Arc::new(profiles_absent()));
        let page = svc
            .list_players(
                "me",
                PlayerQuery {
                    page: Some(3),
                    limit: Some(10),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(page.pagination.total_players, 25);
        assert_eq!(page.pagination.total_pages, 3);
        assert_eq!(page.pagination.current_page, 3);
        assert_eq!(page.players.len(), 5);
    }

    #[tokio::test]
    async fn test_get_player_rejects_self_view() {
        let svc = PlayerService::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(MockProfileRepository::new()),
        );
        let result = svc.get_player("me", "me").await;
        assert!(matches!(result, Err(PlayerServiceError::OwnProfile)));
    }

    #[tokio::test]
    async fn test_get_player_hides_soft_deleted() {
        let mut gone = named_user("gone", "Gone Player", "X");
        gone.is_deleted = true;
        let mut users = MockUserRepository::new();
        users
            .expect_get_user_by_id()
            .returning(move |_| Ok(gone.clone()));

        let svc = PlayerService::new(Arc::new(users), Arc::new(MockProfileRepository::new()));
        let result = svc.get_player("me", "gone").await;
        assert!(matches!(result, Err(PlayerServiceError::PlayerNotFound)));
    }
}
