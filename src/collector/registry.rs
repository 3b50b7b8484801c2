use super::summary::GLOBAL_SCOPE;

/// Services probed once per discovered region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionalService {
    Ec2,
    Elb,
    Elbv2,
    Rds,
    Lambda,
    DynamoDb,
}

impl RegionalService {
    pub const ALL: [RegionalService; 6] = [
        RegionalService::Ec2,
        RegionalService::Elb,
        RegionalService::Elbv2,
        RegionalService::Rds,
        RegionalService::Lambda,
        RegionalService::DynamoDb,
    ];

    /// Service key used in emitted records and logs.
    pub fn name(&self) -> &'static str {
        match self {
            RegionalService::Ec2 => "ec2",
            RegionalService::Elb => "elb",
            RegionalService::Elbv2 => "elbv2",
            RegionalService::Rds => "rds",
            RegionalService::Lambda => "lambda",
            RegionalService::DynamoDb => "dynamodb",
        }
    }
}

/// Services probed exactly once per account, regardless of region count.
///
/// A global probe still reports per-scope results: S3 resolves each bucket to
/// its home region, while Route53 data lives under the synthetic global scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlobalService {
    S3,
    Route53,
}

impl GlobalService {
    pub const ALL: [GlobalService; 2] = [GlobalService::S3, GlobalService::Route53];

    pub fn name(&self) -> &'static str {
        match self {
            GlobalService::S3 => "s3",
            GlobalService::Route53 => "route53",
        }
    }
}

/// The two fixed probe groups. Kept as a unit so callers can enumerate the
/// whole registry without knowing the individual enums.
#[derive(Debug, Default)]
pub struct ProbeRegistry;

impl ProbeRegistry {
    pub fn regional(&self) -> &'static [RegionalService] {
        &RegionalService::ALL
    }

    pub fn global(&self) -> &'static [GlobalService] {
        &GlobalService::ALL
    }

    pub fn is_global(&self, service_name: &str) -> bool {
        GlobalService::ALL.iter().any(|s| s.name() == service_name)
    }

    /// Scope key a global service's synthetic results live under.
    pub fn global_scope(&self) -> &'static str {
        GLOBAL_SCOPE
    }
}
