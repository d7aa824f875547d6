use std::fmt;

#[derive(Debug)]
pub enum UserServiceError {
    UserNotFound,
    UsernameAlreadyExists(String),
    EmailAlreadyExists(String),
    PhoneAlreadyExists,
    ValidationError(String),
    RepositoryError(String),
}

impl fmt::Display for UserServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UserServiceError::UserNotFound => write!(f, "User not found"),
            UserServiceError::UsernameAlreadyExists(username) => {
                write!(f, "Username \"{}\" already exists", username)
            }
            UserServiceError::EmailAlreadyExists(email) => {
                write!(f, "Email \"{}\" already exists", email)
            }
            UserServiceError::PhoneAlreadyExists => write!(f, "Phone number already exists"),
            UserServiceError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            UserServiceError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for UserServiceError {}
