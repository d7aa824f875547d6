use crate::models::connection::Connection;
use crate::repositories::errors::connection_repository_errors::ConnectionRepositoryError;
use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use serde_dynamo::aws_sdk_dynamodb_1::{from_item, from_items, to_item};

#[cfg(test)]
use mockall::automock;

/// Connections table: partition key `requester`, sort key `receiver`, plus
/// GSI_ByReceiver keyed on `receiver` for the inbound listings.
pub struct DynamoDbConnectionRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbConnectionRepository {
    pub fn new(client: Client) -> Self {
        let table_name = std::env::var("CONNECTIONS_TABLE")
            .expect("CONNECTIONS_TABLE environment variable must be set");
        Self { client, table_name }
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ConnectionRepository: Send + Sync {
    async fn create_connection(
        &self,
        connection: &Connection,
    ) -> Result<(), ConnectionRepositoryError>;
    async fn get_connection(
        &self,
        requester: &str,
        receiver: &str,
    ) -> Result<Connection, ConnectionRepositoryError>;
    async fn update_connection(
        &self,
        connection: &Connection,
    ) -> Result<(), ConnectionRepositoryError>;
    async fn delete_connection(
        &self,
        requester: &str,
        receiver: &str,
    ) -> Result<(), ConnectionRepositoryError>;
    async fn list_by_requester(
        &self,
        user_id: &str,
    ) -> Result<Vec<Connection>, ConnectionRepositoryError>;
    async fn list_by_receiver(
        &self,
        user_id: &str,
    ) -> Result<Vec<Connection>, ConnectionRepositoryError>;
}

#[async_trait]
impl ConnectionRepository for DynamoDbConnectionRepository {
    async fn create_connection(
        &self,
        connection: &Connection,
    ) -> Result<(), ConnectionRepositoryError> {
        let item = to_item(connection)
            .map_err(|e| ConnectionRepositoryError::Serialization(e.to_string()))?;
        let result = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(requester)")
            .send()
            .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                let error_str = e.to_string();
                if error_str.contains("ConditionalCheckFailedException") {
                    Err(ConnectionRepositoryError::AlreadyExists)
                } else {
                    Err(ConnectionRepositoryError::DynamoDb(error_str))
                }
            }
        }
    }

    async fn get_connection(
        &self,
        requester: &str,
        receiver: &str,
    ) -> Result<Connection, ConnectionRepositoryError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("requester", AttributeValue::S(requester.to_string()))
            .key("receiver", AttributeValue::S(receiver.to_string()))
            .send()
            .await
            .map_err(|e| ConnectionRepositoryError::DynamoDb(e.to_string()))?;
        if let Some(item) = output.item {
            let connection = from_item(item)
                .map_err(|e| ConnectionRepositoryError::Serialization(e.to_string()))?;
            Ok(connection)
        } else {
            Err(ConnectionRepositoryError::NotFound)
        }
    }

    async fn update_connection(
        &self,
        connection: &Connection,
    ) -> Result<(), ConnectionRepositoryError> {
        let item = to_item(connection)
            .map_err(|e| ConnectionRepositoryError::Serialization(e.to_string()))?;
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| ConnectionRepositoryError::DynamoDb(e.to_string()))?;
        Ok(())
    }

    async fn delete_connection(
        &self,
        requester: &str,
        receiver: &str,
    ) -> Result<(), ConnectionRepositoryError> {
        let result = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .key("requester", AttributeValue::S(requester.to_string()))
            .key("receiver", AttributeValue::S(receiver.to_string()))
            .condition_expression("attribute_exists(requester)")
            .send()
            .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                let error_str = e.to_string();
                if error_str.contains("ConditionalCheckFailedException") {
                    Err(ConnectionRepositoryError::NotFound)
                } else {
                    Err(ConnectionRepositoryError::DynamoDb(error_str))
                }
            }
        }
    }

    async fn list_by_requester(
        &self,
        user_id: &str,
    ) -> Result<Vec<Connection>, ConnectionRepositoryError> {
        let output = self
            .client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression("requester = :user_id")
            .expression_attribute_values(":user_id", AttributeValue::S(user_id.to_string()))
            .send()
            .await
            .map_err(|e| ConnectionRepositoryError::DynamoDb(e.to_string()))?;
        match output.items {
            Some(items) => from_items(items)
                .map_err(|e| ConnectionRepositoryError::Serialization(e.to_string())),
            None => Ok(vec![]),
        }
    }

    async fn list_by_receiver(
        &self,
        user_id: &str,
    ) -> Result<Vec<Connection>, ConnectionRepositoryError> {
        let output = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name("GSI_ByReceiver")
            .key_condition_expression("receiver = :user_id")
            .expression_attribute_values(":user_id", AttributeValue::S(user_id.to_string()))
            .send()
            .await
            .map_err(|e| ConnectionRepositoryError::DynamoDb(e.to_string()))?;
        match output.items {
            Some(items) => from_items(items)
                .map_err(|e| ConnectionRepositoryError::Serialization(e.to_string())),
            None => Ok(vec![]),
        }
    }
}
