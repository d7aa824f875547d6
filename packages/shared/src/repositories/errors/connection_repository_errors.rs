#[derive(Debug)]
pub enum ConnectionRepositoryError {
    NotFound,
    AlreadyExists,
    Serialization(String),
    DynamoDb(String),
}

impl std::fmt::Display for ConnectionRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionRepositoryError::NotFound => write!(f, "Connection not found"),
            ConnectionRepositoryError::AlreadyExists => {
                write!(f, "Connection already exists")
            }
            ConnectionRepositoryError::Serialization(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
            ConnectionRepositoryError::DynamoDb(msg) => write!(f, "DynamoDB error: {}", msg),
        }
    }
}

impl std::error::Error for ConnectionRepositoryError {}
