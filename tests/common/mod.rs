//! Deterministic fake probe runner for exercising the collection engine
//! without upstream AWS calls.
#![allow(dead_code)]

use async_trait::async_trait;
use awsummary::collector::probes::{ProbeRunner, ScopedSummaries};
use awsummary::collector::registry::{GlobalService, RegionalService};
use awsummary::collector::ServiceSummary;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Default)]
pub struct FakeRunner {
    regional: HashMap<(String, String), ServiceSummary>,
    global: HashMap<String, ScopedSummaries>,
    failing: HashSet<(String, String)>,
    slow: HashMap<(String, String), Duration>,
    jitter_ms: u64,
    active: AtomicUsize,
    pub max_active: AtomicUsize,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the summary one regional probe returns. Everything not configured
    /// reports a zero count.
    pub fn with_regional(
        mut self,
        service: RegionalService,
        region: &str,
        summary: ServiceSummary,
    ) -> Self {
        self.regional
            .insert((service.name().to_string(), region.to_string()), summary);
        self
    }

    /// Fix the scope-keyed map one global probe returns. Unconfigured global
    /// probes return an empty map (nothing found anywhere).
    pub fn with_global(mut self, service: GlobalService, scoped: ScopedSummaries) -> Self {
        self.global.insert(service.name().to_string(), scoped);
        self
    }

    /// Make one probe fail. Scope is a region name, or "global" for a global
    /// service.
    pub fn with_failure(mut self, service: &str, scope: &str) -> Self {
        self.failing
            .insert((service.to_string(), scope.to_string()));
        self
    }

    /// Make one probe sleep before answering.
    pub fn with_slow(mut self, service: &str, scope: &str, delay: Duration) -> Self {
        self.slow
            .insert((service.to_string(), scope.to_string()), delay);
        self
    }

    /// Add a random delay up to `ms` to every probe, shuffling completion
    /// order across runs.
    pub fn with_jitter(mut self, ms: u64) -> Self {
        self.jitter_ms = ms;
        self
    }

    async fn simulate_call(&self, service: &str, scope: &str) -> anyhow::Result<()> {
        let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(active, Ordering::SeqCst);

        if let Some(delay) = self.slow.get(&(service.to_string(), scope.to_string())) {
            tokio::time::sleep(*delay).await;
        }
        if self.jitter_ms > 0 {
            let delay = rand::random::<u64>() % self.jitter_ms;
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        self.active.fetch_sub(1, Ordering::SeqCst);

        if self
            .failing
            .contains(&(service.to_string(), scope.to_string()))
        {
            anyhow::bail!("injected upstream failure");
        }
        Ok(())
    }
}

#[async_trait]
impl ProbeRunner for FakeRunner {
    async fn run_regional(
        &self,
        service: RegionalService,
        region: &str,
    ) -> anyhow::Result<ServiceSummary> {
        self.simulate_call(service.name(), region).await?;
        Ok(self
            .regional
            .get(&(service.name().to_string(), region.to_string()))
            .cloned()
            .unwrap_or_else(|| ServiceSummary::new(0)))
    }

    async fn run_global(&self, service: GlobalService) -> anyhow::Result<ScopedSummaries> {
        self.simulate_call(service.name(), "global").await?;
        Ok(self
            .global
            .get(service.name())
            .cloned()
            .unwrap_or_default())
    }
}

/// Summary derived only from the probe's identity, so any scheduling order
/// must converge to the same aggregate.
pub fn deterministic_summary(service: &str, region: &str) -> ServiceSummary {
    ServiceSummary::new((service.len() + region.len()) as u64)
}

/// A runner where every probe across the given regions answers with
/// [`deterministic_summary`].
pub fn deterministic_runner(regions: &[String]) -> FakeRunner {
    let mut runner = FakeRunner::new();
    for region in regions {
        for service in RegionalService::ALL {
            runner = runner.with_regional(
                service,
                region,
                deterministic_summary(service.name(), region),
            );
        }
    }

    let s3_scoped: ScopedSummaries = regions
        .iter()
        .map(|r| (r.clone(), deterministic_summary("s3", r)))
        .collect();
    runner = runner.with_global(GlobalService::S3, s3_scoped);

    let route53_scoped: ScopedSummaries = [(
        "global".to_string(),
        deterministic_summary("route53", "global"),
    )]
    .into_iter()
    .collect();
    runner.with_global(GlobalService::Route53, route53_scoped)
}
