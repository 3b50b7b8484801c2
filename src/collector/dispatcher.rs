//! The concurrency core: one worker unit per (regional service × region) pair
//! plus one per global service, all racing into the shared aggregator behind a
//! bounded semaphore, with a join barrier before any output is produced.

use super::aggregator::Aggregator;
use super::error::ProbeError;
use super::probes::ProbeRunner;
use super::registry::ProbeRegistry;
use super::summary::RegionSummary;
use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Knobs for one collection run.
#[derive(Debug, Clone)]
pub struct CollectOptions {
    /// Upper bound on simultaneously running probes, so a large account cannot
    /// open an unbounded number of upstream connections.
    pub max_concurrent: usize,
    /// Overall deadline; when it expires, outstanding probes are cancelled and
    /// emission proceeds with whatever has been merged so far.
    pub deadline: Option<Duration>,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            max_concurrent: 16,
            deadline: None,
        }
    }
}

/// One probe that did not contribute to the aggregate, with the reason.
/// Distinguishes a gap in the output from a true zero.
#[derive(Debug, Clone)]
pub struct ProbeFailure {
    pub service: String,
    pub scope: String,
    pub error: String,
}

impl ProbeFailure {
    fn from_error(err: &ProbeError) -> Self {
        Self {
            service: err.service.clone(),
            scope: err.scope.clone(),
            error: format!("{:#}", err.cause),
        }
    }

    fn cancelled(service: &str, scope: &str) -> Self {
        Self {
            service: service.to_string(),
            scope: scope.to_string(),
            error: "cancelled by deadline".to_string(),
        }
    }
}

/// Observability summary of one collection run.
#[derive(Debug, Clone, Default)]
pub struct CollectReport {
    pub probes_dispatched: usize,
    pub failed: Vec<ProbeFailure>,
}

impl CollectReport {
    pub fn probes_succeeded(&self) -> usize {
        self.probes_dispatched - self.failed.len()
    }
}

/// Dispatch every probe in the registry across the given regions and wait for
/// all of them to join.
///
/// Returns the merged aggregate state and the failure report. Individual probe
/// failures are isolated: logged, recorded, and absent from the state.
pub async fn run_collection<R: ProbeRunner>(
    runner: Arc<R>,
    regions: &[String],
    options: &CollectOptions,
) -> (BTreeMap<String, RegionSummary>, CollectReport) {
    let registry = ProbeRegistry;
    let aggregator = Arc::new(Aggregator::new());
    let failures: Arc<Mutex<Vec<ProbeFailure>>> = Arc::new(Mutex::new(Vec::new()));
    let semaphore = Arc::new(Semaphore::new(options.max_concurrent.max(1)));
    let cancel = CancellationToken::new();

    let mut units: FuturesUnordered<BoxFuture<'static, ()>> = FuturesUnordered::new();

    // Global probes: one unit per service, account-wide.
    for service in registry.global() {
        let service = *service;
        let runner = runner.clone();
        let aggregator = aggregator.clone();
        let failures = failures.clone();
        let semaphore = semaphore.clone();
        let cancel = cancel.clone();

        units.push(Box::pin(async move {
            let Ok(_permit) = semaphore.acquire().await else {
                return;
            };
            if cancel.is_cancelled() {
                record_failure(&failures, ProbeFailure::cancelled(service.name(), "global"));
                return;
            }

            let result = tokio::select! {
                result = runner.run_global(service) => result,
                _ = cancel.cancelled() => {
                    record_failure(&failures, ProbeFailure::cancelled(service.name(), "global"));
                    return;
                }
            };

            match result {
                Ok(scoped) => {
                    debug!(
                        "Global probe {} merged {} scope(s)",
                        service.name(),
                        scoped.len()
                    );
                    aggregator.merge_scoped(service.name(), scoped);
                }
                Err(e) => {
                    let err = ProbeError::new(service.name(), "global", e);
                    warn!("{}", err);
                    record_failure(&failures, ProbeFailure::from_error(&err));
                }
            }
        }));
    }

    // Regional probes: one unit per (service, region) pair.
    for region in regions {
        for service in registry.regional() {
            let service = *service;
            let region = region.clone();
            let runner = runner.clone();
            let aggregator = aggregator.clone();
            let failures = failures.clone();
            let semaphore = semaphore.clone();
            let cancel = cancel.clone();

            units.push(Box::pin(async move {
                let Ok(_permit) = semaphore.acquire().await else {
                    return;
                };
                if cancel.is_cancelled() {
                    record_failure(&failures, ProbeFailure::cancelled(service.name(), &region));
                    return;
                }

                let result = tokio::select! {
                    result = runner.run_regional(service, &region) => result,
                    _ = cancel.cancelled() => {
                        record_failure(&failures, ProbeFailure::cancelled(service.name(), &region));
                        return;
                    }
                };

                match result {
                    Ok(summary) => aggregator.merge(&region, service.name(), summary),
                    Err(e) => {
                        let err = ProbeError::new(service.name(), &region, e);
                        warn!("{}", err);
                        record_failure(&failures, ProbeFailure::from_error(&err));
                    }
                }
            }));
        }
    }

    let total_units = units.len();
    info!(
        "Dispatching {} probes across {} regions (bound: {})",
        total_units,
        regions.len(),
        options.max_concurrent
    );

    // Arm the deadline, then drain every unit: this is the barrier. After the
    // deadline fires, cancelled units still complete quickly, so the drain
    // terminates.
    if let Some(deadline) = options.deadline {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(deadline).await;
            cancel.cancel();
        });
    }
    while units.next().await.is_some() {}

    let failed = std::mem::take(&mut *failures.lock().expect("failure list poisoned"));
    if !failed.is_empty() {
        warn!(
            "{} of {} probes did not contribute results",
            failed.len(),
            total_units
        );
    }

    let report = CollectReport {
        probes_dispatched: total_units,
        failed,
    };
    (aggregator.drain(), report)
}

fn record_failure(failures: &Mutex<Vec<ProbeFailure>>, failure: ProbeFailure) {
    failures
        .lock()
        .expect("failure list poisoned")
        .push(failure);
}
