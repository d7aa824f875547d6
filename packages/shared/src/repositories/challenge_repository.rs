use crate::models::challenge::Challenge;
use crate::repositories::errors::challenge_repository_errors::ChallengeRepositoryError;
use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use serde_dynamo::aws_sdk_dynamodb_1::{from_item, from_items, to_item};

#[cfg(test)]
use mockall::automock;

pub struct DynamoDbChallengeRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbChallengeRepository {
    pub fn new(client: Client) -> Self {
        let table_name = std::env::var("CHALLENGES_TABLE")
            .expect("CHALLENGES_TABLE environment variable must be set");
        Self { client, table_name }
    }

    async fn query_by_participant(
        &self,
        index_name: &str,
        key: &str,
        user_id: &str,
    ) -> Result<Vec<Challenge>, ChallengeRepositoryError> {
        let output = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name(index_name)
            .key_condition_expression(format!("{} = :user_id", key))
            .expression_attribute_values(":user_id", AttributeValue::S(user_id.to_string()))
            .send()
            .await
            .map_err(|e| ChallengeRepositoryError::DynamoDb(e.to_string()))?;

        match output.items {
            Some(items) => {
                from_items(items).map_err(|e| ChallengeRepositoryError::Serialization(e.to_string()))
            }
            None => Ok(vec![]),
        }
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ChallengeRepository: Send + Sync {
    async fn create_challenge(&self, challenge: &Challenge)
        -> Result<(), ChallengeRepositoryError>;
    async fn get_challenge_by_id(
        &self,
        challenge_id: &str,
    ) -> Result<Challenge, ChallengeRepositoryError>;
    async fn update_challenge(&self, challenge: &Challenge)
        -> Result<(), ChallengeRepositoryError>;
    async fn list_by_challenger(
        &self,
        user_id: &str,
    ) -> Result<Vec<Challenge>, ChallengeRepositoryError>;
    async fn list_by_challenged(
        &self,
        user_id: &str,
    ) -> Result<Vec<Challenge>, ChallengeRepositoryError>;
}

#[async_trait]
impl ChallengeRepository for DynamoDbChallengeRepository {
    async fn create_challenge(
        &self,
        challenge: &Challenge,
    ) -> Result<(), ChallengeRepositoryError> {
        let item =
            to_item(challenge).map_err(|e| ChallengeRepositoryError::Serialization(e.to_string()))?;
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| ChallengeRepositoryError::DynamoDb(e.to_string()))?;
        Ok(())
    }

    async fn get_challenge_by_id(
        &self,
        challenge_id: &str,
    ) -> Result<Challenge, ChallengeRepositoryError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(challenge_id.to_string()))
            .send()
            .await
            .map_err(|e| ChallengeRepositoryError::DynamoDb(e.to_string()))?;
        if let Some(item) = output.item {
            let challenge = from_item(item)
                .map_err(|e| ChallengeRepositoryError::Serialization(e.to_string()))?;
            Ok(challenge)
        } else {
            Err(ChallengeRepositoryError::NotFound)
        }
    }

    async fn update_challenge(
        &self,
        challenge: &Challenge,
    ) -> Result<(), ChallengeRepositoryError> {
        let item =
            to_item(challenge).map_err(|e| ChallengeRepositoryError::Serialization(e.to_string()))?;
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| ChallengeRepositoryError::DynamoDb(e.to_string()))?;
        Ok(())
    }

    async fn list_by_challenger(
        &self,
        user_id: &str,
    ) -> Result<Vec<Challenge>, ChallengeRepositoryError> {
        self.query_by_participant("GSI_ByChallenger", "challenger", user_id)
            .await
    }

    async fn list_by_challenged(
        &self,
        user_id: &str,
    ) -> Result<Vec<Challenge>, ChallengeRepositoryError> {
        self.query_by_participant("GSI_ByChallenged", "challenged", user_id)
            .await
    }
}
