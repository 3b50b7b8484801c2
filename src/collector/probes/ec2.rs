use crate::collector::credentials::AwsCredentials;
use crate::collector::summary::{ServiceSummary, SummaryValue};
use anyhow::{Context, Result};
use aws_sdk_ec2 as ec2;
use std::collections::BTreeMap;
use std::sync::Arc;

pub struct Ec2Probe {
    credentials: Arc<AwsCredentials>,
}

impl Ec2Probe {
    pub fn new(credentials: Arc<AwsCredentials>) -> Self {
        Self { credentials }
    }

    /// Count EC2 instances in one region, broken down by instance type.
    /// Dots in type names are replaced with dashes, since downstream catalog
    /// keys cannot contain dots.
    pub async fn count_instances(&self, region: &str) -> Result<ServiceSummary> {
        let config = self.credentials.sdk_config(region).await;
        let client = ec2::Client::new(&config);

        let mut total = 0u64;
        let mut per_type: BTreeMap<String, u64> = BTreeMap::new();

        let mut paginator = client.describe_instances().into_paginator().send();
        while let Some(page) = paginator
            .try_next()
            .await
            .with_context(|| format!("describe_instances failed in {}", region))?
        {
            for reservation in page.reservations.unwrap_or_default() {
                for instance in reservation.instances.unwrap_or_default() {
                    if let Some(instance_type) = instance.instance_type {
                        let key = instance_type.as_str().replace('.', "-");
                        *per_type.entry(key).or_insert(0) += 1;
                    }
                    total += 1;
                }
            }
        }

        let breakdown = per_type
            .into_iter()
            .map(|(k, v)| (k, SummaryValue::Count(v)))
            .collect();
        Ok(ServiceSummary::new(total).with_extra("type", SummaryValue::Breakdown(breakdown)))
    }
}
