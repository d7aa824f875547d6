use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::user::UserSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Pending,
    Accepted,
}

/// A friend-style link between two users. Keyed by (requester, receiver);
/// the pair is unique regardless of status.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Connection {
    pub requester: String,
    pub receiver: String,
    pub status: ConnectionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Connection {
    pub fn new(requester: &str, receiver: &str) -> Self {
        let now = Utc::now();
        Connection {
            requester: requester.to_string(),
            receiver: receiver.to_string(),
            status: ConnectionStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Listing entry: the other party plus the state of the link.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConnectionListing {
    pub user: UserSummary,
    pub status: ConnectionStatus,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_connection_is_pending() {
        let connection = Connection::new("alice", "bob");
        assert_eq!(connection.requester, "alice");
        assert_eq!(connection.receiver, "bob");
        assert_eq!(connection.status, ConnectionStatus::Pending);
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&ConnectionStatus::Accepted).unwrap(),
            "\"accepted\""
        );
    }
}
