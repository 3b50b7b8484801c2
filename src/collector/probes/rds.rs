use crate::collector::credentials::AwsCredentials;
use crate::collector::summary::ServiceSummary;
use anyhow::{Context, Result};
use aws_sdk_rds as rds;
use std::sync::Arc;

pub struct RdsProbe {
    credentials: Arc<AwsCredentials>,
}

impl RdsProbe {
    pub fn new(credentials: Arc<AwsCredentials>) -> Self {
        Self { credentials }
    }

    /// Count RDS databases in one region: Aurora clusters plus standalone DB
    /// instances, summed into one total.
    pub async fn count_databases(&self, region: &str) -> Result<ServiceSummary> {
        let config = self.credentials.sdk_config(region).await;
        let client = rds::Client::new(&config);

        let clusters = client
            .describe_db_clusters()
            .send()
            .await
            .with_context(|| format!("describe_db_clusters failed in {}", region))?;
        let mut total = clusters.db_clusters.unwrap_or_default().len() as u64;

        let instances = client
            .describe_db_instances()
            .send()
            .await
            .with_context(|| format!("describe_db_instances failed in {}", region))?;
        total += instances.db_instances.unwrap_or_default().len() as u64;

        Ok(ServiceSummary::new(total))
    }
}
