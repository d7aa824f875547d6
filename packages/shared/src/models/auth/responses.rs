use serde::{Deserialize, Serialize};

use crate::models::user::PublicUser;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Register/login envelope: the authenticated user plus their token.
#[derive(Debug, Deserialize, Serialize)]
pub struct AuthResponse {
    pub user: PublicUser,
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl AuthResponse {
    pub fn new(user: PublicUser, login: LoginResponse) -> Self {
        AuthResponse {
            user,
            token: login.token,
            token_type: login.token_type,
            expires_in: login.expires_in,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct TokenClaims {
    pub sub: String, // subject (user ID)
    pub exp: usize,  // expiration time
    pub iat: usize,  // issued at
}
