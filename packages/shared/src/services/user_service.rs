use std::sync::Arc;

use crate::models::auth::requests::RegisterRequest;
use crate::models::user::User;
use crate::repositories::errors::user_repository_errors::UserRepositoryError;
use crate::repositories::user_repository::UserRepository;
use crate::services::errors::user_service_errors::UserServiceError;

pub struct UserService {
    repository: Arc<dyn UserRepository + Send + Sync>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository + Send + Sync>) -> Self {
        UserService { repository }
    }

    /// Creates the identity record for a registration. The password must
    /// already be hashed; uniqueness of username/email is case-insensitive.
    pub async fn create_user(
        &self,
        request: &RegisterRequest,
        hashed_password: String,
    ) -> Result<User, UserServiceError> {
        if request.username.is_empty() || request.email.is_empty() {
            return Err(UserServiceError::ValidationError(
                "Username or email cannot be empty".to_string(),
            ));
        }

        if self
            .repository
            .username_exists(&request.username)
            .await
            .map_err(|e| UserServiceError::RepositoryError(e.to_string()))?
        {
            return Err(UserServiceError::UsernameAlreadyExists(
                request.username.clone(),
            ));
        }

        if self
            .repository
            .email_exists(&request.email)
            .await
            .map_err(|e| UserServiceError::RepositoryError(e.to_string()))?
        {
            return Err(UserServiceError::EmailAlreadyExists(request.email.clone()));
        }

        if let Some(phone_number) = &request.phone_number {
            if self
                .repository
                .phone_exists(phone_number)
                .await
                .map_err(|e| UserServiceError::RepositoryError(e.to_string()))?
            {
                return Err(UserServiceError::PhoneAlreadyExists);
            }
        }

        let mut user = User::new(
            request.username.clone(),
            request.email.clone(),
            hashed_password,
        );
        user.phone_number = request.phone_number.clone();
        user.full_name = request.full_name.clone();
        user.profile = request.profile.clone();
        user.gender = request.gender.clone();
        user.dob = request.dob;
        user.nationality = request.nationality.clone();
        user.country = request.country.clone();
        user.city = request.city.clone();

        self.repository
            .create_user(&user)
            .await
            .map_err(|e| UserServiceError::RepositoryError(e.to_string()))?;
        Ok(user)
    }

    pub async fn get_user_by_id(&self, user_id: &str) -> Result<User, UserServiceError> {
        if user_id.is_empty() {
            return Err(UserServiceError::ValidationError(
                "User ID cannot be empty".to_string(),
            ));
        }
        self.repository
            .get_user_by_id(user_id)
            .await
            .map_err(|e| match e {
                UserRepositoryError::NotFound => UserServiceError::UserNotFound,
                _ => UserServiceError::RepositoryError(e.to_string()),
            })
    }

    /// Login lookup: the identifier is an email address or a phone number.
    pub async fn get_user_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<User, UserServiceError> {
        if identifier.is_empty() {
            return Err(UserServiceError::ValidationError(
                "Identifier cannot be empty".to_string(),
            ));
        }
        let lookup = if identifier.contains('@') {
            self.repository.get_user_by_email(identifier).await
        } else {
            self.repository.get_user_by_phone(identifier).await
        };
        lookup.map_err(|e| match e {
            UserRepositoryError::NotFound => UserServiceError::UserNotFound,
            _ => UserServiceError::RepositoryError(e.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::user_repository::MockUserRepository;

    fn register_request() -> RegisterRequest {
        RegisterRequest {
            username: "NewPlayer".to_string(),
            email: "New@Example.com".to_string(),
            password: "StrongPassword123".to_string(),
            phone_number: Some("+351910000000".to_string()),
            full_name: Some("New Player".to_string()),
            profile: None,
            gender: None,
            dob: None,
            nationality: None,
            country: Some("Portugal".to_string()),
            city: Some("Lisbon".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_user_rejects_taken_username() {
        let mut repo = MockUserRepository::new();
        repo.expect_username_exists().returning(|_| Ok(true));

        let service = UserService::new(Arc::new(repo));
        let result = service
            .create_user(&register_request(), "hash".to_string())
            .await;
        assert!(matches!(
            result,
            Err(UserServiceError::UsernameAlreadyExists(_))
        ));
    }

    #[tokio::test]
    async fn test_create_user_rejects_taken_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_username_exists().returning(|_| Ok(false));
        repo.expect_email_exists().returning(|_| Ok(true));

        let service = UserService::new(Arc::new(repo));
        let result = service
            .create_user(&register_request(), "hash".to_string())
            .await;
        assert!(matches!(result, Err(UserServiceError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_create_user_rejects_taken_phone() {
        let mut repo = MockUserRepository::new();
        repo.expect_username_exists().returning(|_| Ok(false));
        repo.expect_email_exists().returning(|_| Ok(false));
        repo.expect_phone_exists().returning(|_| Ok(true));

        let service = UserService::new(Arc::new(repo));
        let result = service
            .create_user(&register_request(), "hash".to_string())
            .await;
        assert!(matches!(result, Err(UserServiceError::PhoneAlreadyExists)));
    }

    #[tokio::test]
    async fn test_create_user_persists_profile_fields() {
        let mut repo = MockUserRepository::new();
        repo.expect_username_exists().returning(|_| Ok(false));
        repo.expect_email_exists().returning(|_| Ok(false));
        repo.expect_phone_exists().returning(|_| Ok(false));
        repo.expect_create_user()
            .withf(|user| {
                user.email == "new@example.com"
                    && user.username == "NewPlayer"
                    && user.username_lower == "newplayer"
                    && user.city.as_deref() == Some("Lisbon")
                    && !user.is_deleted
            })
            .times(1)
            .returning(|_| Ok(()));

        let service = UserService::new(Arc::new(repo));
        let user = service
            .create_user(&register_request(), "hash".to_string())
            .await
            .unwrap();
        assert_eq!(user.password, "hash");
        assert_eq!(user.full_name.as_deref(), Some("New Player"));
    }

    #[tokio::test]
    async fn test_identifier_routes_email_vs_phone() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_user_by_email()
            .times(1)
            .returning(|_| Err(UserRepositoryError::NotFound));
        repo.expect_get_user_by_phone()
            .times(1)
            .returning(|_| Err(UserRepositoryError::NotFound));

        let service = UserService::new(Arc::new(repo));
        let by_email = service.get_user_by_identifier("a@b.com").await;
        assert!(matches!(by_email, Err(UserServiceError::UserNotFound)));
        let by_phone = service.get_user_by_identifier("+351910000000").await;
        assert!(matches!(by_phone, Err(UserServiceError::UserNotFound)));
    }
}
