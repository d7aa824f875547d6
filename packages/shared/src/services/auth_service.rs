use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;

use crate::models::auth::requests::{LoginRequest, RegisterRequest};
use crate::models::auth::responses::{LoginResponse, TokenClaims};
use crate::models::user::User;
use crate::services::errors::auth_service_errors::AuthServiceError;
use crate::services::errors::user_service_errors::UserServiceError;
use crate::services::user_service::UserService;

pub struct AuthService {
    user_service: Arc<UserService>,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(user_service: Arc<UserService>) -> Self {
        let jwt_secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET environment variable must be set");
        AuthService {
            user_service,
            jwt_secret,
        }
    }

    pub fn with_jwt_secret(user_service: Arc<UserService>, jwt_secret: String) -> Self {
        AuthService {
            user_service,
            jwt_secret,
        }
    }

    pub async fn register(
        &self,
        request: RegisterRequest,
    ) -> Result<(User, LoginResponse), AuthServiceError> {
        if request.password.len() < 8 {
            return Err(AuthServiceError::ValidationError(
                "Password must be at least 8 characters".to_string(),
            ));
        }

        let hashed = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)
            .map_err(|e| AuthServiceError::HashError(e.to_string()))?;

        let user = self.user_service.create_user(&request, hashed).await?;
        let login = self.generate_token(&user.id)?;
        Ok((user, login))
    }

    /// Unknown identifier and wrong password collapse into one error so the
    /// response does not leak which accounts exist.
    pub async fn login(
        &self,
        request: LoginRequest,
    ) -> Result<(User, LoginResponse), AuthServiceError> {
        if request.identifier.is_empty() || request.password.is_empty() {
            return Err(AuthServiceError::ValidationError(
                "Identifier or password cannot be empty".to_string(),
            ));
        }

        let user = match self
            .user_service
            .get_user_by_identifier(&request.identifier)
            .await
        {
            Ok(user) => user,
            Err(UserServiceError::UserNotFound) => {
                return Err(AuthServiceError::InvalidCredentials)
            }
            Err(err) => return Err(AuthServiceError::UserServiceError(err)),
        };

        if user.is_deleted {
            return Err(AuthServiceError::InvalidCredentials);
        }

        let matches = bcrypt::verify(&request.password, &user.password)
            .map_err(|e| AuthServiceError::HashError(e.to_string()))?;
        if !matches {
            return Err(AuthServiceError::InvalidCredentials);
        }

        let login = self.generate_token(&user.id)?;
        Ok((user, login))
    }

    pub fn generate_token(&self, user_id: &str) -> Result<LoginResponse, AuthServiceError> {
        let now = Utc::now();
        let expires_in = 24 * 60 * 60; // 24 hours in seconds
        let exp = (now + Duration::hours(24)).timestamp() as usize;
        let iat = now.timestamp() as usize;

        let claims = TokenClaims {
            sub: user_id.to_string(),
            exp,
            iat,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )
        .map_err(|e| AuthServiceError::JwtError(format!("{:#?}", e)))?;

        Ok(LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_in,
        })
    }

    pub fn verify_token(&self, token: &str) -> Result<TokenClaims, AuthServiceError> {
        let decoding_key = DecodingKey::from_secret(self.jwt_secret.as_ref());
        let validation = Validation::default();

        match decode::<TokenClaims>(token, &decoding_key, &validation) {
            Ok(token_data) => Ok(token_data.claims),
            Err(err) => match err.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    Err(AuthServiceError::ExpiredToken)
                }
                _ => Err(AuthServiceError::InvalidToken),
            },
        }
    }

    pub fn extract_user_id_from_token(&self, token: &str) -> Result<String, AuthServiceError> {
        let claims = self.verify_token(token)?;
        Ok(claims.sub)
    }
}
