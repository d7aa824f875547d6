use crate::models::user::User;
use crate::repositories::errors::user_repository_errors::UserRepositoryError;
use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use serde_dynamo::aws_sdk_dynamodb_1::{from_item, from_items, to_item};

#[cfg(test)]
use mockall::automock;

pub struct DynamoDbUserRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbUserRepository {
    pub fn new(client: Client) -> Self {
        let table_name =
            std::env::var("USERS_TABLE").expect("USERS_TABLE environment variable must be set");
        Self { client, table_name }
    }

    async fn query_index(
        &self,
        index_name: &str,
        key: &str,
        value: &str,
    ) -> Result<Option<User>, UserRepositoryError> {
        let output = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name(index_name)
            .key_condition_expression(format!("{} = :value", key))
            .expression_attribute_values(":value", AttributeValue::S(value.to_string()))
            .limit(1)
            .send()
            .await
            .map_err(|e| UserRepositoryError::DynamoDb(e.to_string()))?;

        match output.items.and_then(|items| items.into_iter().next()) {
            Some(item) => {
                let user =
                    from_item(item).map_err(|e| UserRepositoryError::Serialization(e.to_string()))?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, user: &User) -> Result<(), UserRepositoryError>;
    async fn get_user_by_id(&self, user_id: &str) -> Result<User, UserRepositoryError>;
    async fn get_user_by_email(&self, email: &str) -> Result<User, UserRepositoryError>;
    async fn get_user_by_phone(&self, phone_number: &str) -> Result<User, UserRepositoryError>;
    async fn username_exists(&self, username: &str) -> Result<bool, UserRepositoryError>;
    async fn email_exists(&self, email: &str) -> Result<bool, UserRepositoryError>;
    async fn phone_exists(&self, phone_number: &str) -> Result<bool, UserRepositoryError>;
    /// Every non-deleted user. Discovery filters and paginates on top.
    async fn list_users(&self) -> Result<Vec<User>, UserRepositoryError>;
}

#[async_trait]
impl UserRepository for DynamoDbUserRepository {
    async fn create_user(&self, user: &User) -> Result<(), UserRepositoryError> {
        let item = to_item(user).map_err(|e| UserRepositoryError::Serialization(e.to_string()))?;
        let result = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(id)")
            .send()
            .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                let error_str = e.to_string();
                if error_str.contains("ConditionalCheckFailedException") {
                    Err(UserRepositoryError::AlreadyExists)
                } else {
                    Err(UserRepositoryError::DynamoDb(error_str))
                }
            }
        }
    }

    async fn get_user_by_id(&self, user_id: &str) -> Result<User, UserRepositoryError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(user_id.to_string()))
            .send()
            .await
            .map_err(|e| UserRepositoryError::DynamoDb(e.to_string()))?;
        if let Some(item) = output.item {
            let user =
                from_item(item).map_err(|e| UserRepositoryError::Serialization(e.to_string()))?;
            Ok(user)
        } else {
            Err(UserRepositoryError::NotFound)
        }
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User, UserRepositoryError> {
        self.query_index("GSI_UserByEmail", "email", &email.to_lowercase())
            .await?
            .ok_or(UserRepositoryError::NotFound)
    }

    async fn get_user_by_phone(&self, phone_number: &str) -> Result<User, UserRepositoryError> {
        self.query_index("GSI_UserByPhone", "phone_number", phone_number)
            .await?
            .ok_or(UserRepositoryError::NotFound)
    }

    async fn username_exists(&self, username: &str) -> Result<bool, UserRepositoryError> {
        let found = self
            .query_index(
                "GSI_UserByUsername",
                "username_lower",
                &username.to_lowercase(),
            )
            .await?;
        Ok(found.is_some())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, UserRepositoryError> {
        let found = self
            .query_index("GSI_UserByEmail", "email", &email.to_lowercase())
            .await?;
        Ok(found.is_some())
    }

    async fn phone_exists(&self, phone_number: &str) -> Result<bool, UserRepositoryError> {
        let found = self
            .query_index("GSI_UserByPhone", "phone_number", phone_number)
            .await?;
        Ok(found.is_some())
    }

    async fn list_users(&self) -> Result<Vec<User>, UserRepositoryError> {
        let mut users = Vec::new();
        let mut exclusive_start_key = None;
        loop {
            let output = self
                .client
                .scan()
                .table_name(&self.table_name)
                .filter_expression("is_deleted = :deleted")
                .expression_attribute_values(":deleted", AttributeValue::Bool(false))
                .set_exclusive_start_key(exclusive_start_key)
                .send()
                .await
                .map_err(|e| UserRepositoryError::DynamoDb(e.to_string()))?;

            if let Some(items) = output.items {
                let mut page: Vec<User> = from_items(items)
                    .map_err(|e| UserRepositoryError::Serialization(e.to_string()))?;
                users.append(&mut page);
            }

            match output.last_evaluated_key {
                Some(key) => exclusive_start_key = Some(key),
                None => break,
            }
        }
        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_round_trip() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_user_by_id()
            .returning(|_| Err(UserRepositoryError::NotFound));

        let result = repo.get_user_by_id("missing").await;
        assert!(matches!(result, Err(UserRepositoryError::NotFound)));
    }
}
