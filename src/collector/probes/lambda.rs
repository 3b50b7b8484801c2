use crate::collector::credentials::AwsCredentials;
use crate::collector::summary::{ServiceSummary, SummaryValue};
use anyhow::{Context, Result};
use aws_sdk_lambda as lambda;
use std::collections::BTreeMap;
use std::sync::Arc;

pub struct LambdaProbe {
    credentials: Arc<AwsCredentials>,
}

impl LambdaProbe {
    pub fn new(credentials: Arc<AwsCredentials>) -> Self {
        Self { credentials }
    }

    /// Count Lambda functions in one region, broken down by runtime.
    pub async fn count_functions(&self, region: &str) -> Result<ServiceSummary> {
        let config = self.credentials.sdk_config(region).await;
        let client = lambda::Client::new(&config);

        let mut total = 0u64;
        let mut per_runtime: BTreeMap<String, u64> = BTreeMap::new();

        let mut paginator = client.list_functions().into_paginator().send();
        while let Some(page) = paginator
            .try_next()
            .await
            .with_context(|| format!("list_functions failed in {}", region))?
        {
            for function in page.functions.unwrap_or_default() {
                if let Some(runtime) = function.runtime {
                    *per_runtime
                        .entry(runtime.as_str().replace('.', "-"))
                        .or_insert(0) += 1;
                }
                total += 1;
            }
        }

        let mut summary = ServiceSummary::new(total);
        if total > 0 {
            let breakdown = per_runtime
                .into_iter()
                .map(|(k, v)| (k, SummaryValue::Count(v)))
                .collect();
            summary = summary.with_extra("runtime", SummaryValue::Breakdown(breakdown));
        }
        Ok(summary)
    }
}
