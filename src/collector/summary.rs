use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Region key used for services that are not tied to any physical region.
pub const GLOBAL_SCOPE: &str = "global";

/// A single probe-specific value inside a [`ServiceSummary`].
///
/// Probes report either plain counts, fractional gauges (e.g. aggregate S3 size
/// in GB), or a nested breakdown keyed by sub-category (instance type, load
/// balancer type, runtime, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SummaryValue {
    Count(u64),
    Gauge(f64),
    Breakdown(BTreeMap<String, SummaryValue>),
}

/// Summary of one service in one scope (a region, or the synthetic global
/// scope), as returned by a single probe invocation.
///
/// `total_count` is mandatory and drives the emitter's emptiness decision; all
/// other fields are probe-specific and flattened into the same JSON object on
/// the wire.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ServiceSummary {
    pub total_count: u64,
    #[serde(flatten)]
    pub extra: BTreeMap<String, SummaryValue>,
}

impl ServiceSummary {
    pub fn new(total_count: u64) -> Self {
        Self {
            total_count,
            extra: BTreeMap::new(),
        }
    }

    /// Attach a probe-specific extra field (builder style).
    pub fn with_extra(mut self, key: impl Into<String>, value: SummaryValue) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// A summary counts as empty when it holds nothing the emitter would report.
    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }
}

/// All service summaries accumulated for one region (or the global scope).
pub type RegionSummary = BTreeMap<String, ServiceSummary>;

/// A region is empty iff every service in it reported a zero total count.
/// A region with no services at all is also empty.
pub fn region_is_empty(summary: &RegionSummary) -> bool {
    summary.values().all(|service| service.is_empty())
}
