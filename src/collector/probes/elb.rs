use crate::collector::credentials::AwsCredentials;
use crate::collector::summary::ServiceSummary;
use anyhow::{Context, Result};
use aws_sdk_elasticloadbalancing as elb;
use std::sync::Arc;

pub struct ElbProbe {
    credentials: Arc<AwsCredentials>,
}

impl ElbProbe {
    pub fn new(credentials: Arc<AwsCredentials>) -> Self {
        Self { credentials }
    }

    /// Count classic load balancers in one region. No breakdown; every CLB is
    /// the same type.
    pub async fn count_load_balancers(&self, region: &str) -> Result<ServiceSummary> {
        let config = self.credentials.sdk_config(region).await;
        let client = elb::Client::new(&config);

        let response = client
            .describe_load_balancers()
            .send()
            .await
            .with_context(|| format!("describe_load_balancers (classic) failed in {}", region))?;

        let total = response.load_balancer_descriptions.unwrap_or_default().len() as u64;
        Ok(ServiceSummary::new(total))
    }
}
