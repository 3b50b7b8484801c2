use thiserror::Error;

/// Fatal errors surfaced to the caller of `verify` or `collect`.
///
/// Prerequisite failures (connectivity, identity, region enumeration, missing
/// configuration) abort the whole call. Individual probe failures never appear
/// here; they are isolated and reported through [`super::dispatcher::CollectReport`].
#[derive(Debug, Error)]
pub enum CollectorError {
    /// Client construction or the initial identity/region call failed.
    #[error("aws connection failed: {0:#}")]
    Connectivity(anyhow::Error),

    /// A required input field is missing; raised before any network activity.
    #[error("missing required field: {0}")]
    Configuration(&'static str),
}

/// Failure of a single probe's upstream call, tagged with the service and the
/// scope (region name or `"global"`) it was probing.
#[derive(Debug, Error)]
#[error("{service} probe failed in {scope}: {cause:#}")]
pub struct ProbeError {
    pub service: String,
    pub scope: String,
    pub cause: anyhow::Error,
}

impl ProbeError {
    pub fn new(service: &str, scope: &str, cause: anyhow::Error) -> Self {
        Self {
            service: service.to_string(),
            scope: scope.to_string(),
            cause,
        }
    }
}
