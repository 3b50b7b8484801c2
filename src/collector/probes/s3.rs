use super::ScopedSummaries;
use crate::collector::credentials::{AwsCredentials, DEFAULT_REGION};
use crate::collector::summary::{ServiceSummary, SummaryValue};
use anyhow::{Context, Result};
use aws_sdk_s3 as s3;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Per-region accumulator while walking the account's buckets.
#[derive(Default)]
struct RegionTally {
    buckets: u64,
    objects: u64,
    bytes: i64,
}

/// Global probe: buckets are listed account-wide, but each bucket belongs to a
/// home region, so the result is keyed by the regions the buckets resolve to.
pub struct S3Probe {
    credentials: Arc<AwsCredentials>,
}

impl S3Probe {
    pub fn new(credentials: Arc<AwsCredentials>) -> Self {
        Self { credentials }
    }

    /// Summarize every bucket in the account: per resolved region, the bucket
    /// count plus aggregate object count and size. Walks the full object
    /// listing of each bucket, which is expensive on large buckets.
    pub async fn summarize_buckets(&self) -> Result<ScopedSummaries> {
        let config = self.credentials.sdk_config(DEFAULT_REGION).await;
        let client = s3::Client::new(&config);

        let response = client
            .list_buckets()
            .send()
            .await
            .context("list_buckets failed")?;

        let mut tallies: BTreeMap<String, RegionTally> = BTreeMap::new();
        for bucket in response.buckets.unwrap_or_default() {
            let Some(name) = bucket.name else { continue };
            let location = self.bucket_location(&client, &name).await?;
            let (objects, bytes) = self.bucket_contents(&client, &name).await?;
            debug!(
                "Bucket {} in {}: {} objects, {} bytes",
                name, location, objects, bytes
            );

            let tally = tallies.entry(location).or_default();
            tally.buckets += 1;
            tally.objects += objects;
            tally.bytes += bytes;
        }

        let mut result = ScopedSummaries::new();
        for (region, tally) in tallies {
            let breakdown: BTreeMap<String, SummaryValue> = [
                (
                    "total_size(GB)".to_string(),
                    SummaryValue::Gauge(tally.bytes as f64 / BYTES_PER_GB),
                ),
                (
                    "total_objects".to_string(),
                    SummaryValue::Count(tally.objects),
                ),
            ]
            .into_iter()
            .collect();

            result.insert(
                region,
                ServiceSummary::new(tally.buckets)
                    .with_extra("type", SummaryValue::Breakdown(breakdown)),
            );
        }
        Ok(result)
    }

    /// Resolve a bucket's home region. An unset location constraint means the
    /// bucket lives in us-east-1.
    async fn bucket_location(&self, client: &s3::Client, bucket: &str) -> Result<String> {
        let response = client
            .get_bucket_location()
            .bucket(bucket)
            .send()
            .await
            .with_context(|| format!("get_bucket_location failed for bucket {}", bucket))?;

        Ok(match response.location_constraint {
            Some(constraint) if !constraint.as_str().is_empty() => {
                constraint.as_str().to_string()
            }
            _ => "us-east-1".to_string(),
        })
    }

    async fn bucket_contents(&self, client: &s3::Client, bucket: &str) -> Result<(u64, i64)> {
        let mut objects = 0u64;
        let mut bytes = 0i64;

        let mut paginator = client.list_objects_v2().bucket(bucket).into_paginator().send();
        while let Some(page) = paginator
            .try_next()
            .await
            .with_context(|| format!("list_objects_v2 failed for bucket {}", bucket))?
        {
            for object in page.contents.unwrap_or_default() {
                objects += 1;
                bytes += object.size.unwrap_or(0);
            }
        }

        Ok((objects, bytes))
    }
}
