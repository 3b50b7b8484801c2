use super::credentials::{AwsCredentials, DEFAULT_REGION};
use super::error::CollectorError;
use anyhow::Context;
use aws_sdk_ec2 as ec2;
use tracing::debug;

/// Discover the regions enabled for this account via a single
/// `describe_regions` call from the bootstrap region.
///
/// Order is whatever EC2 returns; duplicates are dropped. Failure here is a
/// prerequisite failure and aborts the whole collection.
pub async fn enumerate_regions(
    credentials: &AwsCredentials,
) -> Result<Vec<String>, CollectorError> {
    let config = credentials.sdk_config(DEFAULT_REGION).await;
    let client = ec2::Client::new(&config);

    let response = client
        .describe_regions()
        .send()
        .await
        .context("describe_regions failed")
        .map_err(CollectorError::Connectivity)?;

    let mut regions = Vec::new();
    for region in response.regions.unwrap_or_default() {
        if let Some(name) = region.region_name {
            if !regions.contains(&name) {
                regions.push(name);
            }
        }
    }

    debug!("Discovered {} regions", regions.len());
    Ok(regions)
}
