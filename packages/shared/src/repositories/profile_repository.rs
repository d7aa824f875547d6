use crate::models::player_profile::{MediaImage, MediaVideo, PlayerProfile};
use crate::repositories::errors::profile_repository_errors::ProfileRepositoryError;
use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use serde_dynamo::aws_sdk_dynamodb_1::{from_item, to_attribute_value, to_item};

#[cfg(test)]
use mockall::automock;

pub const CONNECTIONS_COUNT: &str = "connections_count";
pub const HOSTED_GAMES_COUNT: &str = "hosted_games_count";

pub struct DynamoDbProfileRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbProfileRepository {
    pub fn new(client: Client) -> Self {
        let table_name = std::env::var("PLAYER_PROFILES_TABLE")
            .expect("PLAYER_PROFILES_TABLE environment variable must be set");
        Self { client, table_name }
    }

    async fn append_to_list(
        &self,
        user_id: &str,
        attribute: &str,
        value: AttributeValue,
    ) -> Result<(), ProfileRepositoryError> {
        self.client
            .update_item()
            .table_name(&self.table_name)
            .key("user", AttributeValue::S(user_id.to_string()))
            .update_expression(format!(
                "SET {attr} = list_append(if_not_exists({attr}, :empty), :new)",
                attr = attribute
            ))
            .expression_attribute_values(":empty", AttributeValue::L(vec![]))
            .expression_attribute_values(":new", AttributeValue::L(vec![value]))
            .condition_expression("attribute_exists(#user)")
            .expression_attribute_names("#user", "user")
            .send()
            .await
            .map_err(|e| {
                let error_str = e.to_string();
                if error_str.contains("ConditionalCheckFailedException") {
                    ProfileRepositoryError::NotFound
                } else {
                    ProfileRepositoryError::DynamoDb(error_str)
                }
            })?;
        Ok(())
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn get_profile(&self, user_id: &str) -> Result<PlayerProfile, ProfileRepositoryError>;
    async fn put_profile(&self, profile: &PlayerProfile) -> Result<(), ProfileRepositoryError>;
    async fn push_image(
        &self,
        user_id: &str,
        image: &MediaImage,
    ) -> Result<(), ProfileRepositoryError>;
    async fn push_video(
        &self,
        user_id: &str,
        video: &MediaVideo,
    ) -> Result<(), ProfileRepositoryError>;
    /// Adjusts one of the activity counters in place. The profile item must
    /// already exist.
    async fn add_to_counter(
        &self,
        user_id: &str,
        counter: &'static str,
        delta: i64,
    ) -> Result<(), ProfileRepositoryError>;
}

#[async_trait]
impl ProfileRepository for DynamoDbProfileRepository {
    async fn get_profile(&self, user_id: &str) -> Result<PlayerProfile, ProfileRepositoryError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("user", AttributeValue::S(user_id.to_string()))
            .send()
            .await
            .map_err(|e| ProfileRepositoryError::DynamoDb(e.to_string()))?;
        if let Some(item) = output.item {
            let profile =
                from_item(item).map_err(|e| ProfileRepositoryError::Serialization(e.to_string()))?;
            Ok(profile)
        } else {
            Err(ProfileRepositoryError::NotFound)
        }
    }

    async fn put_profile(&self, profile: &PlayerProfile) -> Result<(), ProfileRepositoryError> {
        let item =
            to_item(profile).map_err(|e| ProfileRepositoryError::Serialization(e.to_string()))?;
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| ProfileRepositoryError::DynamoDb(e.to_string()))?;
        Ok(())
    }

    async fn push_image(
        &self,
        user_id: &str,
        image: &MediaImage,
    ) -> Result<(), ProfileRepositoryError> {
        let value = to_attribute_value(image)
            .map_err(|e| ProfileRepositoryError::Serialization(e.to_string()))?;
        self.append_to_list(user_id, "images", value).await
    }

    async fn push_video(
        &self,
        user_id: &str,
        video: &MediaVideo,
    ) -> Result<(), ProfileRepositoryError> {
        let value = to_attribute_value(video)
            .map_err(|e| ProfileRepositoryError::Serialization(e.to_string()))?;
        self.append_to_list(user_id, "videos", value).await
    }

    async fn add_to_counter(
        &self,
        user_id: &str,
        counter: &'static str,
        delta: i64,
    ) -> Result<(), ProfileRepositoryError> {
        self.client
            .update_item()
            .table_name(&self.table_name)
            .key("user", AttributeValue::S(user_id.to_string()))
            .update_expression("ADD #counter :delta")
            .expression_attribute_names("#counter", counter)
            .expression_attribute_values(":delta", AttributeValue::N(delta.to_string()))
            .condition_expression("attribute_exists(#user)")
            .expression_attribute_names("#user", "user")
            .send()
            .await
            .map_err(|e| {
                let error_str = e.to_string();
                if error_str.contains("ConditionalCheckFailedException") {
                    ProfileRepositoryError::NotFound
                } else {
                    ProfileRepositoryError::DynamoDb(error_str)
                }
            })?;
        Ok(())
    }
}
