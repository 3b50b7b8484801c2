//! Account-wide AWS resource footprint collection.
//!
//! The collector answers "how much of what exists in this account": it
//! enumerates the account's regions, dispatches one concurrent probe per
//! (service, region) pair plus one per global service, merges their results
//! into a per-region summary map, and streams normalized catalog records to
//! the caller. Individual probe failures degrade the output instead of
//! aborting it; only prerequisite failures (connectivity, identity, region
//! enumeration) are fatal.

pub mod aggregator;
pub mod credentials;
pub mod dispatcher;
pub mod emitter;
pub mod error;
pub mod probes;
pub mod regions;
pub mod registry;
pub mod schema;
pub mod summary;
pub mod verify;

pub use credentials::AwsCredentials;
pub use dispatcher::{CollectOptions, CollectReport, ProbeFailure};
pub use emitter::OutputRecord;
pub use error::{CollectorError, ProbeError};
pub use summary::{RegionSummary, ServiceSummary, SummaryValue, GLOBAL_SCOPE};
pub use verify::{Capability, VerifyState};

use probes::{AwsProbeRunner, ProbeRunner};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

/// Validate the caller's parameter envelope before any network activity.
/// The transport hands `verify` and `collect` a mapping that must carry all
/// three of these fields, even when `filter` is empty.
pub fn check_required(params: &serde_json::Value) -> Result<(), CollectorError> {
    const REQUIRED: [&str; 3] = ["options", "credentials", "filter"];
    for field in REQUIRED {
        if params.get(field).is_none() {
            return Err(CollectorError::Configuration(field));
        }
    }
    Ok(())
}

/// Entry point tying the pieces together for one set of credentials.
pub struct Collector {
    credentials: Arc<AwsCredentials>,
}

impl Collector {
    pub fn new(credentials: AwsCredentials) -> Self {
        Self {
            credentials: Arc::new(credentials),
        }
    }

    /// Fast connectivity pre-flight. No side effects beyond one STS round
    /// trip.
    pub async fn verify(&self) -> Result<(VerifyState, Capability), CollectorError> {
        let state = verify::verify(&self.credentials).await?;
        Ok((state, Capability::default()))
    }

    /// Run a full account collection, streaming records into `tx` as they
    /// become available: the registration record first, then one resource
    /// record per non-empty region after all probes have joined.
    ///
    /// Returns the probe failure report. A closed receiver ends the stream
    /// early without error.
    pub async fn collect(
        &self,
        options: &CollectOptions,
        tx: mpsc::Sender<OutputRecord>,
    ) -> Result<CollectReport, CollectorError> {
        let account_id = verify::resolve_account_id(&self.credentials).await?;
        info!("Collecting summary for account {}", account_id);

        // The registration record is static; let the consumer start on it
        // while the probes run.
        if tx.send(emitter::registration_record()).await.is_err() {
            return Ok(CollectReport::default());
        }

        let region_list = regions::enumerate_regions(&self.credentials).await?;
        let runner = Arc::new(AwsProbeRunner::new(self.credentials.clone()));

        collect_with_runner(runner, &region_list, &account_id, options, tx).await
    }
}

/// Dispatch, aggregate, and emit over an arbitrary probe runner. The
/// registration record is assumed to have been sent already.
///
/// Split out from [`Collector::collect`] so the engine can be exercised
/// without upstream AWS calls.
pub async fn collect_with_runner<R: ProbeRunner>(
    runner: Arc<R>,
    region_list: &[String],
    account_id: &str,
    options: &CollectOptions,
    tx: mpsc::Sender<OutputRecord>,
) -> Result<CollectReport, CollectorError> {
    let (state, report) = dispatcher::run_collection(runner, region_list, options).await;

    for record in emitter::resource_records(&state, account_id) {
        if tx.send(record).await.is_err() {
            // Receiver is gone; stop emitting but still return the report.
            break;
        }
    }

    info!(
        "Collection finished: {}/{} probes succeeded",
        report.probes_succeeded(),
        report.probes_dispatched
    );
    Ok(report)
}
