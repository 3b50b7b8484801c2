use super::probes::ScopedSummaries;
use super::summary::{RegionSummary, ServiceSummary};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// The single shared mutable structure of one collection run: region name →
/// service name → summary, accumulated from many concurrent probes.
///
/// All mutation goes through one mutex and is a plain map upsert; the lock is
/// never held across an await point and is not part of the public contract.
/// Callers only see `merge` and `drain`.
#[derive(Debug, Default)]
pub struct Aggregator {
    state: Mutex<BTreeMap<String, RegionSummary>>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one regional probe's result: shallow upsert of the service key
    /// inside the region's map. A duplicate service key (should not occur with
    /// the fixed registry) is replaced atomically.
    pub fn merge(&self, region: &str, service: &str, summary: ServiceSummary) {
        let mut state = self.state.lock().expect("aggregate state poisoned");
        state
            .entry(region.to_string())
            .or_default()
            .insert(service.to_string(), summary);
    }

    /// Merge one global probe's result: every scope key of the returned map is
    /// upserted under the given service name, creating region entries as
    /// needed.
    pub fn merge_scoped(&self, service: &str, scoped: ScopedSummaries) {
        let mut state = self.state.lock().expect("aggregate state poisoned");
        for (scope, summary) in scoped {
            state
                .entry(scope)
                .or_default()
                .insert(service.to_string(), summary);
        }
    }

    /// Take the accumulated state. Called once, after the dispatch barrier, so
    /// no probe can still be writing.
    pub fn drain(&self) -> BTreeMap<String, RegionSummary> {
        let mut state = self.state.lock().expect("aggregate state poisoned");
        std::mem::take(&mut *state)
    }
}
