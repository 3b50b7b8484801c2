use crate::collector::credentials::AwsCredentials;
use crate::collector::summary::ServiceSummary;
use anyhow::{Context, Result};
use aws_sdk_dynamodb as dynamodb;
use std::sync::Arc;

pub struct DynamoDbProbe {
    credentials: Arc<AwsCredentials>,
}

impl DynamoDbProbe {
    pub fn new(credentials: Arc<AwsCredentials>) -> Self {
        Self { credentials }
    }

    /// Count DynamoDB tables in one region.
    pub async fn count_tables(&self, region: &str) -> Result<ServiceSummary> {
        let config = self.credentials.sdk_config(region).await;
        let client = dynamodb::Client::new(&config);

        let mut total = 0u64;
        let mut paginator = client.list_tables().into_paginator().send();
        while let Some(page) = paginator
            .try_next()
            .await
            .with_context(|| format!("list_tables failed in {}", region))?
        {
            total += page.table_names.unwrap_or_default().len() as u64;
        }

        Ok(ServiceSummary::new(total))
    }
}
