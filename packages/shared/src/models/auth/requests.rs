use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub phone_number: Option<String>,
    pub full_name: Option<String>,
    pub profile: Option<String>,
    pub gender: Option<String>,
    pub dob: Option<DateTime<Utc>>,
    pub nationality: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
}

/// Login accepts an email address or a phone number as the identifier.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_optional_fields() {
        let raw = r#"{"username":"neo","email":"neo@example.com","password":"Str0ngPass"}"#;
        let request: RegisterRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(request.username, "neo");
        assert!(request.phone_number.is_none());
        assert!(request.dob.is_none());
    }

    #[test]
    fn test_login_request_roundtrip() {
        let request = LoginRequest {
            identifier: "+35191234567".to_string(),
            password: "pass".to_string(),
        };
        let serialized = serde_json::to_string(&request).unwrap();
        let deserialized: LoginRequest = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized.identifier, request.identifier);
    }
}
