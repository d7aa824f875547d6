use crate::models::matches::Match;
use crate::repositories::errors::match_repository_errors::MatchRepositoryError;
use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use serde_dynamo::aws_sdk_dynamodb_1::{from_item, from_items, to_item};

#[cfg(test)]
use mockall::automock;

pub struct DynamoDbMatchRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbMatchRepository {
    pub fn new(client: Client) -> Self {
        let table_name =
            std::env::var("MATCHES_TABLE").expect("MATCHES_TABLE environment variable must be set");
        Self { client, table_name }
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait MatchRepository: Send + Sync {
    async fn create_match(&self, m: &Match) -> Result<(), MatchRepositoryError>;
    async fn get_match_by_id(&self, match_id: &str) -> Result<Match, MatchRepositoryError>;
    /// Upcoming matches whose roster contains the given player. Roster
    /// membership cannot be indexed, so this is a filtered scan.
    async fn list_upcoming_for_player(
        &self,
        user_id: &str,
    ) -> Result<Vec<Match>, MatchRepositoryError>;
}

#[async_trait]
impl MatchRepository for DynamoDbMatchRepository {
    async fn create_match(&self, m: &Match) -> Result<(), MatchRepositoryError> {
        let item = to_item(m).map_err(|e| MatchRepositoryError::Serialization(e.to_string()))?;
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| MatchRepositoryError::DynamoDb(e.to_string()))?;
        Ok(())
    }

    async fn get_match_by_id(&self, match_id: &str) -> Result<Match, MatchRepositoryError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(match_id.to_string()))
            .send()
            .await
            .map_err(|e| MatchRepositoryError::DynamoDb(e.to_string()))?;
        if let Some(item) = output.item {
            let m =
                from_item(item).map_err(|e| MatchRepositoryError::Serialization(e.to_string()))?;
            Ok(m)
        } else {
            Err(MatchRepositoryError::NotFound)
        }
    }

    async fn list_upcoming_for_player(
        &self,
        user_id: &str,
    ) -> Result<Vec<Match>, MatchRepositoryError> {
        let mut matches = Vec::new();
        let mut exclusive_start_key = None;
        loop {
            let output = self
                .client
                .scan()
                .table_name(&self.table_name)
                .filter_expression("contains(players, :user_id) AND #status = :status")
                .expression_attribute_names("#status", "status")
                .expression_attribute_values(":user_id", AttributeValue::S(user_id.to_string()))
                .expression_attribute_values(":status", AttributeValue::S("upcoming".to_string()))
                .set_exclusive_start_key(exclusive_start_key)
                .send()
                .await
                .map_err(|e| MatchRepositoryError::DynamoDb(e.to_string()))?;

            if let Some(items) = output.items {
                let mut page: Vec<Match> = from_items(items)
                    .map_err(|e| MatchRepositoryError::Serialization(e.to_string()))?;
                matches.append(&mut page);
            }

            match output.last_evaluated_key {
                Some(key) => exclusive_start_key = Some(key),
                None => break,
            }
        }
        Ok(matches)
    }
}
