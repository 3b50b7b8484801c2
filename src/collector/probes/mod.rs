//! One probe per AWS service. Each probe builds its own scoped client, makes
//! the minimum number of upstream calls for one summary, and never touches
//! shared state; the dispatcher owns all coordination.

use super::credentials::AwsCredentials;
use super::registry::{GlobalService, RegionalService};
use super::summary::ServiceSummary;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;

mod dynamodb;
mod ec2;
mod elb;
mod elbv2;
mod lambda;
mod rds;
mod route53;
mod s3;

pub use dynamodb::DynamoDbProbe;
pub use ec2::Ec2Probe;
pub use elb::ElbProbe;
pub use elbv2::Elbv2Probe;
pub use lambda::LambdaProbe;
pub use rds::RdsProbe;
pub use route53::Route53Probe;
pub use s3::S3Probe;

/// Result of one global probe: summaries keyed by the scope they belong to.
/// Keys are real region names (S3 resolves bucket locations) or the literal
/// global scope (Route53).
pub type ScopedSummaries = BTreeMap<String, ServiceSummary>;

/// The seam between the dispatcher and the upstream cloud.
///
/// The production implementation is [`AwsProbeRunner`]; tests drive the
/// dispatcher with deterministic fakes through this trait.
#[async_trait]
pub trait ProbeRunner: Send + Sync + 'static {
    /// Probe one regional service in one region.
    async fn run_regional(
        &self,
        service: RegionalService,
        region: &str,
    ) -> Result<ServiceSummary>;

    /// Probe one global service, account-wide.
    async fn run_global(&self, service: GlobalService) -> Result<ScopedSummaries>;
}

/// Probe runner backed by the AWS SDK. Holds only credentials; every probe
/// invocation constructs its own region-scoped config and client.
pub struct AwsProbeRunner {
    ec2: Ec2Probe,
    elb: ElbProbe,
    elbv2: Elbv2Probe,
    rds: RdsProbe,
    lambda: LambdaProbe,
    dynamodb: DynamoDbProbe,
    s3: S3Probe,
    route53: Route53Probe,
}

impl AwsProbeRunner {
    pub fn new(credentials: Arc<AwsCredentials>) -> Self {
        Self {
            ec2: Ec2Probe::new(credentials.clone()),
            elb: ElbProbe::new(credentials.clone()),
            elbv2: Elbv2Probe::new(credentials.clone()),
            rds: RdsProbe::new(credentials.clone()),
            lambda: LambdaProbe::new(credentials.clone()),
            dynamodb: DynamoDbProbe::new(credentials.clone()),
            s3: S3Probe::new(credentials.clone()),
            route53: Route53Probe::new(credentials),
        }
    }
}

#[async_trait]
impl ProbeRunner for AwsProbeRunner {
    async fn run_regional(
        &self,
        service: RegionalService,
        region: &str,
    ) -> Result<ServiceSummary> {
        match service {
            RegionalService::Ec2 => self.ec2.count_instances(region).await,
            RegionalService::Elb => self.elb.count_load_balancers(region).await,
            RegionalService::Elbv2 => self.elbv2.count_load_balancers(region).await,
            RegionalService::Rds => self.rds.count_databases(region).await,
            RegionalService::Lambda => self.lambda.count_functions(region).await,
            RegionalService::DynamoDb => self.dynamodb.count_tables(region).await,
        }
    }

    async fn run_global(&self, service: GlobalService) -> Result<ScopedSummaries> {
        match service {
            GlobalService::S3 => self.s3.summarize_buckets().await,
            GlobalService::Route53 => self.route53.count_hosted_zones().await,
        }
    }
}
