use crate::collector::credentials::AwsCredentials;
use crate::collector::summary::{ServiceSummary, SummaryValue};
use anyhow::{Context, Result};
use aws_sdk_elasticloadbalancingv2 as elbv2;
use std::collections::BTreeMap;
use std::sync::Arc;

pub struct Elbv2Probe {
    credentials: Arc<AwsCredentials>,
}

impl Elbv2Probe {
    pub fn new(credentials: Arc<AwsCredentials>) -> Self {
        Self { credentials }
    }

    /// Count ALBs and NLBs in one region, broken down by load balancer type.
    /// The breakdown is only attached when something was found.
    pub async fn count_load_balancers(&self, region: &str) -> Result<ServiceSummary> {
        let config = self.credentials.sdk_config(region).await;
        let client = elbv2::Client::new(&config);

        let response = client
            .describe_load_balancers()
            .send()
            .await
            .with_context(|| format!("describe_load_balancers (v2) failed in {}", region))?;

        let mut total = 0u64;
        let mut per_type: BTreeMap<String, u64> = BTreeMap::new();
        for lb in response.load_balancers.unwrap_or_default() {
            if let Some(lb_type) = lb.r#type {
                *per_type.entry(lb_type.as_str().to_string()).or_insert(0) += 1;
            }
            total += 1;
        }

        let mut summary = ServiceSummary::new(total);
        if total > 0 {
            let breakdown = per_type
                .into_iter()
                .map(|(k, v)| (k, SummaryValue::Count(v)))
                .collect();
            summary = summary.with_extra("type", SummaryValue::Breakdown(breakdown));
        }
        Ok(summary)
    }
}
