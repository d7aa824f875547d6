use std::fmt;

#[derive(Debug)]
pub enum ProfileServiceError {
    UserNotFound,
    ValidationError(String),
    RepositoryError(String),
}

impl fmt::Display for ProfileServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProfileServiceError::UserNotFound => write!(f, "User not found"),
            ProfileServiceError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ProfileServiceError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for ProfileServiceError {}
