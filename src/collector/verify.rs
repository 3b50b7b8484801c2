use super::credentials::{AwsCredentials, DEFAULT_REGION};
use super::error::CollectorError;
use anyhow::Context;
use aws_sdk_sts as sts;
use serde::Serialize;
use tracing::debug;

/// Result of a connectivity pre-flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VerifyState {
    Active,
}

/// What this collector can produce, advertised to the caller next to the
/// verify state.
#[derive(Debug, Clone, Serialize)]
pub struct Capability {
    pub filter_format: Vec<String>,
    pub supported_resource_type: Vec<String>,
}

impl Default for Capability {
    fn default() -> Self {
        Self {
            filter_format: Vec::new(),
            supported_resource_type: vec![
                "CLOUD_SERVICE".to_string(),
                "CLOUD_SERVICE_TYPE".to_string(),
            ],
        }
    }
}

/// Lightweight connectivity check: one STS round trip from the bootstrap
/// region. Cheap enough to run before every expensive account-wide collect.
pub async fn verify(credentials: &AwsCredentials) -> Result<VerifyState, CollectorError> {
    let account_id = resolve_account_id(credentials).await?;
    debug!("Verified connectivity as account {}", account_id);
    Ok(VerifyState::Active)
}

/// Resolve the account id of the caller's credentials. A prerequisite of
/// collection: failure here aborts the whole call.
pub async fn resolve_account_id(credentials: &AwsCredentials) -> Result<String, CollectorError> {
    let config = credentials.sdk_config(DEFAULT_REGION).await;
    let client = sts::Client::new(&config);

    let identity = client
        .get_caller_identity()
        .send()
        .await
        .context("get_caller_identity failed")
        .map_err(CollectorError::Connectivity)?;

    identity
        .account()
        .map(str::to_string)
        .ok_or_else(|| {
            CollectorError::Connectivity(anyhow::anyhow!(
                "caller identity did not include an account id"
            ))
        })
}
