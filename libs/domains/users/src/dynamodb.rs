//! DynamoDB implementation of UserRepository
//!
//! Items are (de)serialized with `serde_dynamo`, so the stored attributes
//! are exactly the JSON field names of [`User`]. Creates and updates are
//! conditional puts, which makes the existence check and the write a
//! single atomic call.

use async_trait::async_trait;
use aws_sdk_dynamodb::{
    Client,
    operation::put_item::PutItemError,
    types::AttributeValue,
};
use std::collections::HashMap;
use tracing::instrument;

use crate::error::{BoxError, UserError, UserResult};
use crate::models::{User, UserKey};
use crate::repository::UserRepository;

type Item = HashMap<String, AttributeValue>;

const KEY_NAME: &str = "#email";
const KEY_ATTRIBUTE: &str = "email";
const IF_ABSENT: &str = "attribute_not_exists(#email)";
const IF_PRESENT: &str = "attribute_exists(#email)";

/// DynamoDB implementation of the UserRepository
#[derive(Debug, Clone)]
pub struct DynamoUserRepository {
    client: Client,
    table_name: String,
}

impl DynamoUserRepository {
    /// Create a repository over an already configured client
    ///
    /// # Example
    /// ```ignore
    /// let config = aws_config::defaults(BehaviorVersion::latest()).load().await;
    /// let repo = DynamoUserRepository::new(Client::new(&config), "serverless-users");
    /// ```
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    fn key(email: &str) -> UserResult<Item> {
        serde_dynamo::to_item(UserKey { email }).map_err(|e| UserError::Encode(e.into()))
    }

    fn item(user: &User) -> UserResult<Item> {
        serde_dynamo::to_item(user).map_err(|e| UserError::Encode(e.into()))
    }

    /// Put `user` only if `condition` holds for the stored item.
    ///
    /// Returns `Ok(false)` when the condition check fails.
    async fn conditional_put(&self, user: &User, condition: &str) -> Result<bool, PutFailure> {
        let item = Self::item(user).map_err(PutFailure::Encode)?;

        let result = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression(condition)
            .expression_attribute_names(KEY_NAME, KEY_ATTRIBUTE)
            .send()
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(err)
                if err
                    .as_service_error()
                    .is_some_and(PutItemError::is_conditional_check_failed_exception) =>
            {
                Ok(false)
            }
            Err(err) => Err(PutFailure::Store(err.into())),
        }
    }
}

/// Why a conditional put did not go through
enum PutFailure {
    Encode(UserError),
    Store(BoxError),
}

#[async_trait]
impl UserRepository for DynamoUserRepository {
    #[instrument(skip(self), fields(table = %self.table_name))]
    async fn get(&self, email: &str) -> UserResult<Option<User>> {
        let key = Self::key(email)?;

        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(key))
            .send()
            .await
            .map_err(|e| UserError::Fetch(e.into()))?;

        match output.item {
            Some(item) => serde_dynamo::from_item(item)
                .map(Some)
                .map_err(|e| UserError::Decode(e.into())),
            None => Ok(None),
        }
    }

    #[instrument(skip(self), fields(table = %self.table_name))]
    async fn scan(&self) -> UserResult<Vec<User>> {
        let items: Vec<Item> = self
            .client
            .scan()
            .table_name(&self.table_name)
            .into_paginator()
            .items()
            .send()
            .collect::<Result<Vec<_>, _>>()
            .await
            .map_err(|e| UserError::FetchAll(e.into()))?;

        tracing::debug!(count = items.len(), "Scanned users table");
        serde_dynamo::from_items(items).map_err(|e| UserError::DecodeAll(e.into()))
    }

    #[instrument(skip(self, user), fields(table = %self.table_name, email = %user.email))]
    async fn insert(&self, user: User) -> UserResult<User> {
        match self.conditional_put(&user, IF_ABSENT).await {
            Ok(true) => {
                tracing::info!("User created successfully");
                Ok(user)
            }
            Ok(false) => Err(UserError::AlreadyExists),
            Err(PutFailure::Encode(err)) => Err(err),
            Err(PutFailure::Store(err)) => Err(UserError::Put(err)),
        }
    }

    #[instrument(skip(self, user), fields(table = %self.table_name, email = %user.email))]
    async fn replace(&self, user: User) -> UserResult<User> {
        match self.conditional_put(&user, IF_PRESENT).await {
            Ok(true) => {
                tracing::info!("User updated successfully");
                Ok(user)
            }
            Ok(false) => Err(UserError::NotFound),
            Err(PutFailure::Encode(err)) => Err(err),
            Err(PutFailure::Store(err)) => Err(UserError::Update(err)),
        }
    }

    #[instrument(skip(self), fields(table = %self.table_name))]
    async fn delete(&self, email: &str) -> UserResult<()> {
        let key = Self::key(email)?;

        self.client
            .delete_item()
            .table_name(&self.table_name)
            .set_key(Some(key))
            .send()
            .await
            .map_err(|e| UserError::Delete(e.into()))?;

        tracing::info!("User deleted successfully");
        Ok(())
    }
}
