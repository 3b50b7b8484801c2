use super::error::CollectorError;
use aws_config::{BehaviorVersion, SdkConfig};
use aws_credential_types::Credentials;
use aws_types::region::Region;
use serde::Deserialize;

/// Bootstrap region for connectivity checks and region enumeration. Any region
/// works for these calls; this one matches the upstream plugin's default.
pub const DEFAULT_REGION: &str = "ap-northeast-2";

/// Static credentials handed to the collector by the caller.
///
/// The optional placement fields are accepted for compatibility with older
/// callers but are not used by the collection core.
#[derive(Debug, Clone, Deserialize)]
pub struct AwsCredentials {
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    #[serde(default)]
    pub region_id: Option<String>,
    #[serde(default)]
    pub zone_id: Option<String>,
    #[serde(default)]
    pub pool_id: Option<String>,
    #[serde(default, rename = "identity.project_id")]
    pub project_id: Option<String>,
}

impl AwsCredentials {
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            aws_access_key_id: access_key_id.into(),
            aws_secret_access_key: secret_access_key.into(),
            region_id: None,
            zone_id: None,
            pool_id: None,
            project_id: None,
        }
    }

    /// Parse the caller-provided credentials mapping, failing fast when the
    /// required keys are absent.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, CollectorError> {
        if value.get("aws_access_key_id").and_then(|v| v.as_str()).is_none() {
            return Err(CollectorError::Configuration("aws_access_key_id"));
        }
        if value
            .get("aws_secret_access_key")
            .and_then(|v| v.as_str())
            .is_none()
        {
            return Err(CollectorError::Configuration("aws_secret_access_key"));
        }
        serde_json::from_value(value.clone())
            .map_err(|_| CollectorError::Configuration("credentials"))
    }

    /// Build an SDK config bound to one region. Every worker unit calls this
    /// for itself; clients are never shared across concurrent probes.
    pub async fn sdk_config(&self, region: &str) -> SdkConfig {
        let credentials = Credentials::from_keys(
            &self.aws_access_key_id,
            &self.aws_secret_access_key,
            None,
        );
        aws_config::defaults(BehaviorVersion::latest())
            .credentials_provider(credentials)
            .region(Region::new(region.to_string()))
            .load()
            .await
    }
}
