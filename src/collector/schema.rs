//! Static catalog metadata describing the emitted records. Pure data; nothing
//! here depends on what the probes find.

use serde::{Deserialize, Serialize};

pub const PROVIDER: &str = "SpaceONE";
pub const SERVICE_GROUP: &str = "aws";
pub const SERVICE_TYPE_NAME: &str = "Summary";

/// One column the catalog renders from the emitted data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSourceEntry {
    pub name: String,
    pub key: String,
}

impl DataSourceEntry {
    fn new(name: &str, key: &str) -> Self {
        Self {
            name: name.to_string(),
            key: key.to_string(),
        }
    }
}

/// The fixed column list of the summary cloud service type.
pub fn data_source() -> Vec<DataSourceEntry> {
    vec![
        DataSourceEntry::new("Region Name", "data.region_name"),
        DataSourceEntry::new("Account ID", "data.account_id"),
        DataSourceEntry::new("EC2", "data.ec2.total_count"),
        DataSourceEntry::new("S3", "data.s3.total_count"),
        DataSourceEntry::new("RDS", "data.rds.total_count"),
        DataSourceEntry::new("Lambda", "data.lambda.total_count"),
        DataSourceEntry::new("CLB", "data.elb.total_count"),
        DataSourceEntry::new("ALB/NLB", "data.elbv2.total_count"),
        DataSourceEntry::new("DynamoDB", "data.dynamodb.total_count"),
    ]
}
