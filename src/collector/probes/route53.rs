use super::ScopedSummaries;
use crate::collector::credentials::{AwsCredentials, DEFAULT_REGION};
use crate::collector::summary::{ServiceSummary, GLOBAL_SCOPE};
use anyhow::{Context, Result};
use aws_sdk_route53 as route53;
use std::sync::Arc;

/// Global probe: DNS zones have no region, so the count always lands under the
/// synthetic global scope.
pub struct Route53Probe {
    credentials: Arc<AwsCredentials>,
}

impl Route53Probe {
    pub fn new(credentials: Arc<AwsCredentials>) -> Self {
        Self { credentials }
    }

    pub async fn count_hosted_zones(&self) -> Result<ScopedSummaries> {
        let config = self.credentials.sdk_config(DEFAULT_REGION).await;
        let client = route53::Client::new(&config);

        let mut total = 0u64;
        let mut paginator = client.list_hosted_zones().into_paginator().send();
        while let Some(page) = paginator
            .try_next()
            .await
            .context("list_hosted_zones failed")?
        {
            total += page.hosted_zones.len() as u64;
        }

        let mut result = ScopedSummaries::new();
        result.insert(GLOBAL_SCOPE.to_string(), ServiceSummary::new(total));
        Ok(result)
    }
}
