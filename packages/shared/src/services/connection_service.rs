use std::sync::Arc;

use chrono::Utc;
use tracing::warn;

use crate::models::connection::{Connection, ConnectionListing, ConnectionStatus};
use crate::models::player_profile::PlayerProfile;
use crate::models::user::UserSummary;
use crate::repositories::connection_repository::ConnectionRepository;
use crate::repositories::errors::connection_repository_errors::ConnectionRepositoryError;
use crate::repositories::errors::profile_repository_errors::ProfileRepositoryError;
use crate::repositories::errors::user_repository_errors::UserRepositoryError;
use crate::repositories::profile_repository::{ProfileRepository, CONNECTIONS_COUNT};
use crate::repositories::user_repository::UserRepository;
use crate::services::errors::connection_service_errors::ConnectionServiceError;

pub struct ConnectionService {
    connection_repository: Arc<dyn ConnectionRepository + Send + Sync>,
    user_repository: Arc<dyn UserRepository + Send + Sync>,
    profile_repository: Arc<dyn ProfileRepository + Send + Sync>,
}

impl ConnectionService {
    pub fn new(
        connection_repository: Arc<dyn ConnectionRepository + Send + Sync>,
        user_repository: Arc<dyn UserRepository + Send + Sync>,
        profile_repository: Arc<dyn ProfileRepository + Send + Sync>,
    ) -> Self {
        ConnectionService {
            connection_repository,
            user_repository,
            profile_repository,
        }
    }

    pub async fn send_request(
        &self,
        from: &str,
        to: &str,
    ) -> Result<Connection, ConnectionServiceError> {
        if from == to {
            return Err(ConnectionServiceError::SelfConnection);
        }

        self.user_repository
            .get_user_by_id(to)
            .await
            .map_err(|e| match e {
                UserRepositoryError::NotFound => ConnectionServiceError::UserNotFound,
                _ => ConnectionServiceError::RepositoryError(e.to_string()),
            })?;

        let connection = Connection::new(from, to);
        self.connection_repository
            .create_connection(&connection)
            .await
            .map_err(|e| match e {
                ConnectionRepositoryError::AlreadyExists => ConnectionServiceError::AlreadyExists,
                _ => ConnectionServiceError::RepositoryError(e.to_string()),
            })?;
        Ok(connection)
    }

    pub async fn accept_request(
        &self,
        receiver_id: &str,
        requester_id: &str,
    ) -> Result<Connection, ConnectionServiceError> {
        let mut connection = self.get_connection(requester_id, receiver_id).await?;

        if connection.status != ConnectionStatus::Pending {
            return Err(ConnectionServiceError::AlreadyAccepted);
        }

        connection.status = ConnectionStatus::Accepted;
        connection.updated_at = Utc::now();
        self.connection_repository
            .update_connection(&connection)
            .await
            .map_err(|e| ConnectionServiceError::RepositoryError(e.to_string()))?;

        self.adjust_counters(&[receiver_id, requester_id], 1).await;

        Ok(connection)
    }

    pub async fn reject_request(
        &self,
        receiver_id: &str,
        requester_id: &str,
    ) -> Result<(), ConnectionServiceError> {
        let connection = self.get_connection(requester_id, receiver_id).await?;

        if connection.status != ConnectionStatus::Pending {
            return Err(ConnectionServiceError::AlreadyAccepted);
        }

        self.connection_repository
            .delete_connection(requester_id, receiver_id)
            .await
            .map_err(|e| match e {
                ConnectionRepositoryError::NotFound => ConnectionServiceError::ConnectionNotFound,
                _ => ConnectionServiceError::RepositoryError(e.to_string()),
            })
    }

    pub async fn list_pending(
        &self,
        user_id: &str,
    ) -> Result<Vec<ConnectionListing>, ConnectionServiceError> {
        let inbound = self
            .connection_repository
            .list_by_receiver(user_id)
            .await
            .map_err(|e| ConnectionServiceError::RepositoryError(e.to_string()))?;

        let mut listings = Vec::new();
        for connection in inbound
            .into_iter()
            .filter(|c| c.status == ConnectionStatus::Pending)
        {
            let user = self.summary(&connection.requester).await?;
            listings.push(ConnectionListing {
                user,
                status: connection.status,
                created_at: connection.created_at,
            });
        }
        Ok(listings)
    }

    pub async fn list_accepted(
        &self,
        user_id: &str,
    ) -> Result<Vec<ConnectionListing>, ConnectionServiceError> {
        let outbound = self
            .connection_repository
            .list_by_requester(user_id)
            .await
            .map_err(|e| ConnectionServiceError::RepositoryError(e.to_string()))?;
        let inbound = self
            .connection_repository
            .list_by_receiver(user_id)
            .await
            .map_err(|e| ConnectionServiceError::RepositoryError(e.to_string()))?;

        let mut listings = Vec::new();
        for connection in outbound
            .into_iter()
            .chain(inbound)
            .filter(|c| c.status == ConnectionStatus::Accepted)
        {
            let other = if connection.requester == user_id {
                &connection.receiver
            } else {
                &connection.requester
            };
            let user = self.summary(other).await?;
            listings.push(ConnectionListing {
                user,
                status: connection.status,
                created_at: connection.created_at,
            });
        }
        Ok(listings)
    }

    /// Removes the link in whichever direction it was stored. Counters are
    /// only decremented for links that were accepted.
    pub async fn remove_connection(
        &self,
        user_id: &str,
        other_id: &str,
    ) -> Result<(), ConnectionServiceError> {
        let (connection, requester, receiver) =
            match self.get_connection(user_id, other_id).await {
                Ok(connection) => (connection, user_id, other_id),
                Err(ConnectionServiceError::ConnectionNotFound) => {
                    let connection = self.get_connection(other_id, user_id).await?;
                    (connection, other_id, user_id)
                }
                Err(e) => return Err(e),
            };

        self.connection_repository
            .delete_connection(requester, receiver)
            .await
            .map_err(|e| match e {
                ConnectionRepositoryError::NotFound => ConnectionServiceError::ConnectionNotFound,
                _ => ConnectionServiceError::RepositoryError(e.to_string()),
            })?;

        if connection.status == ConnectionStatus::Accepted {
            self.adjust_counters(&[user_id, other_id], -1).await;
        }
        Ok(())
    }

    async fn get_connection(
        &self,
        requester_id: &str,
        receiver_id: &str,
    ) -> Result<Connection, ConnectionServiceError> {
        self.connection_repository
            .get_connection(requester_id, receiver_id)
            .await
            .map_err(|e| match e {
                ConnectionRepositoryError::NotFound => ConnectionServiceError::ConnectionNotFound,
                _ => ConnectionServiceError::RepositoryError(e.to_string()),
            })
    }

    async fn summary(&self, user_id: &str) -> Result<UserSummary, ConnectionServiceError> {
        match self.user_repository.get_user_by_id(user_id).await {
            Ok(user) => Ok(UserSummary::from(&user)),
            Err(UserRepositoryError::NotFound) => Ok(UserSummary {
                id: user_id.to_string(),
                username: String::new(),
                full_name: None,
                city: None,
            }),
            Err(e) => Err(ConnectionServiceError::RepositoryError(e.to_string())),
        }
    }

    /// Best-effort counter maintenance; a missing profile is created so the
    /// count is not lost, any other failure is logged and ignored.
    async fn adjust_counters(&self, user_ids: &[&str], delta: i64) {
        for user_id in user_ids {
            match self
                .profile_repository
                .add_to_counter(user_id, CONNECTIONS_COUNT, delta)
                .await
            {
                Ok(()) => {}
                Err(ProfileRepositoryError::NotFound) => {
                    let mut profile = PlayerProfile::new(user_id);
                    profile.connections_count = delta.max(0);
                    if let Err(e) = self.profile_repository.put_profile(&profile).await {
                        warn!("Failed to seed profile for {}: {}", user_id, e);
                    }
                }
                Err(e) => {
                    warn!("Failed to adjust connections count for {}: {}", user_id, e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::User;
    use crate::repositories::connection_repository::MockConnectionRepository;
    use crate::repositories::profile_repository::MockProfileRepository;
    use crate::repositories::user_repository::MockUserRepository;

    fn service(
        connections: MockConnectionRepository,
        users: MockUserRepository,
        profiles: MockProfileRepository,
    ) -> ConnectionService {
        ConnectionService::new(Arc::new(connections), Arc::new(users), Arc::new(profiles))
    }

    fn users_by_id() -> MockUserRepository {
        let mut users = MockUserRepository::new();
        users.expect_get_user_by_id().returning(|id| {
            let mut user = User::new(format!("u-{}", id), format!("{}@x.com", id), "h".into());
            user.id = id.to_string();
            Ok(user)
        });
        users
    }

    #[tokio::test]
    async fn test_cannot_connect_with_self() {
        let svc = service(
            MockConnectionRepository::new(),
            MockUserRepository::new(),
            MockProfileRepository::new(),
        );
        let result = svc.send_request("me", "me").await;
        assert!(matches!(result, Err(ConnectionServiceError::SelfConnection)));
    }

    #[tokio::test]
    async fn test_duplicate_request_conflicts() {
        let mut connections = MockConnectionRepository::new();
        connections
            .expect_create_connection()
            .returning(|_| Err(ConnectionRepositoryError::AlreadyExists));

        let svc = service(connections, users_by_id(), MockProfileRepository::new());
        let result = svc.send_request("me", "them").await;
        assert!(matches!(result, Err(ConnectionServiceError::AlreadyExists)));
    }

    #[tokio::test]
    async fn test_accept_flips_status_and_bumps_counters() {
        let mut connections = MockConnectionRepository::new();
        connections
            .expect_get_connection()
            .returning(|requester, receiver| Ok(Connection::new(requester, receiver)));
        connections
            .expect_update_connection()
            .withf(|c| c.status == ConnectionStatus::Accepted)
            .times(1)
            .returning(|_| Ok(()));

        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_add_to_counter()
            .withf(|_, counter, delta| *counter == *CONNECTIONS_COUNT && *delta == 1)
            .times(2)
            .returning(|_, _, _| Ok(()));

        let svc = service(connections, users_by_id(), profiles);
        let accepted = svc.accept_request("them", "me").await.unwrap();
        assert_eq!(accepted.status, ConnectionStatus::Accepted);
    }

    #[tokio::test]
    async fn test_accept_twice_fails() {
        let mut connections = MockConnectionRepository::new();
        connections.expect_get_connection().returning(|r1, r2| {
            let mut connection = Connection::new(r1, r2);
            connection.status = ConnectionStatus::Accepted;
            Ok(connection)
        });

        let svc = service(connections, users_by_id(), MockProfileRepository::new());
        let result = svc.accept_request("them", "me").await;
        assert!(matches!(
            result,
            Err(ConnectionServiceError::AlreadyAccepted)
        ));
    }

    #[tokio::test]
    async fn test_reject_deletes_pending_request() {
        let mut connections = MockConnectionRepository::new();
        connections
            .expect_get_connection()
            .returning(|r1, r2| Ok(Connection::new(r1, r2)));
        connections
            .expect_delete_connection()
            .times(1)
            .returning(|_, _| Ok(()));

        let svc = service(connections, users_by_id(), MockProfileRepository::new());
        assert!(svc.reject_request("them", "me").await.is_ok());
    }

    #[tokio::test]
    async fn test_list_pending_filters_and_populates() {
        let mut connections = MockConnectionRepository::new();
        connections.expect_list_by_receiver().returning(|user_id| {
            let pending = Connection::new("requester-1", user_id);
            let mut accepted = Connection::new("requester-2", user_id);
            accepted.status = ConnectionStatus::Accepted;
            Ok(vec![pending, accepted])
        });

        let svc = service(connections, users_by_id(), MockProfileRepository::new());
        let pending = svc.list_pending("me").await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].user.id, "requester-1");
        assert_eq!(pending[0].status, ConnectionStatus::Pending);
    }

    #[tokio::test]
    async fn test_remove_checks_both_directions() {
        let mut connections = MockConnectionRepository::new();
        // Stored as (other -> me), so the first direction misses.
        connections
            .expect_get_connection()
            .withf(|requester, _| requester == "me")
            .returning(|_, _| Err(ConnectionRepositoryError::NotFound));
        connections
            .expect_get_connection()
            .withf(|requester, _| requester == "other")
            .returning(|r1, r2| {
                let mut connection = Connection::new(r1, r2);
                connection.status = ConnectionStatus::Accepted;
                Ok(connection)
            });
        connections
            .expect_delete_connection()
            .withf(|requester, receiver| requester == "other" && receiver == "me")
            .times(1)
            .returning(|_, _| Ok(()));

        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_add_to_counter()
            .withf(|_, _, delta| *delta == -1)
            .times(2)
            .returning(|_, _, _| Ok(()));

        let svc = service(connections, users_by_id(), profiles);
        assert!(svc.remove_connection("me", "other").await.is_ok());
    }
}
