//! Converts the drained aggregate state into the output record stream:
//! exactly one type-registration record first, then one resource record per
//! non-empty region.

use super::schema::{self, DataSourceEntry};
use super::summary::{region_is_empty, RegionSummary};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// A record on the wire. Untagged: each variant serializes to its exact
/// catalog shape, distinguished downstream by `resource_type`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum OutputRecord {
    Registration(TypeRegistration),
    Resource(ResourceRecord),
}

#[derive(Debug, Clone, Serialize)]
pub struct TypeRegistration {
    pub state: String,
    pub resource_type: String,
    pub match_rules: BTreeMap<String, Vec<String>>,
    pub replace_rules: BTreeMap<String, Vec<String>>,
    pub resource: TypeRegistrationResource,
}

#[derive(Debug, Clone, Serialize)]
pub struct TypeRegistrationResource {
    pub name: String,
    pub provider: String,
    pub group: String,
    pub data_source: Vec<DataSourceEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResourceRecord {
    pub state: String,
    pub resource_type: String,
    pub match_rules: BTreeMap<String, Vec<String>>,
    pub replace_rules: BTreeMap<String, Vec<String>>,
    pub resource: ResourcePayload,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResourcePayload {
    pub cloud_service_type: String,
    pub cloud_service_group: String,
    pub provider: String,
    pub data: serde_json::Map<String, serde_json::Value>,
}

/// The static registration record, emitted exactly once per collect call,
/// before any resource record and regardless of what the probes find.
pub fn registration_record() -> OutputRecord {
    let match_rules: BTreeMap<String, Vec<String>> = [(
        "1".to_string(),
        vec![
            "name".to_string(),
            "group".to_string(),
            "provider".to_string(),
            "account_id".to_string(),
        ],
    )]
    .into_iter()
    .collect();

    OutputRecord::Registration(TypeRegistration {
        state: "SUCCESS".to_string(),
        resource_type: "CLOUD_SERVICE_TYPE".to_string(),
        match_rules,
        replace_rules: BTreeMap::new(),
        resource: TypeRegistrationResource {
            name: schema::SERVICE_TYPE_NAME.to_string(),
            provider: schema::PROVIDER.to_string(),
            group: schema::SERVICE_GROUP.to_string(),
            data_source: schema::data_source(),
        },
    })
}

/// Wrap one region's summary in the resource envelope, injecting the region
/// name and account id into the data payload.
pub fn resource_record(region: &str, summary: &RegionSummary, account_id: &str) -> OutputRecord {
    let match_rules: BTreeMap<String, Vec<String>> = [(
        "1".to_string(),
        vec![
            "data.region_name".to_string(),
            "data.account_id".to_string(),
            "name".to_string(),
            "group".to_string(),
            "provider".to_string(),
        ],
    )]
    .into_iter()
    .collect();

    let mut data = serde_json::Map::new();
    for (service, service_summary) in summary {
        data.insert(
            service.clone(),
            serde_json::to_value(service_summary).expect("summary serialization is infallible"),
        );
    }
    data.insert(
        "region_name".to_string(),
        serde_json::Value::String(region.to_string()),
    );
    data.insert(
        "account_id".to_string(),
        serde_json::Value::String(account_id.to_string()),
    );

    OutputRecord::Resource(ResourceRecord {
        state: "SUCCESS".to_string(),
        resource_type: "CLOUD_SERVICE".to_string(),
        match_rules,
        replace_rules: BTreeMap::new(),
        resource: ResourcePayload {
            cloud_service_type: schema::SERVICE_TYPE_NAME.to_string(),
            cloud_service_group: schema::SERVICE_GROUP.to_string(),
            provider: schema::PROVIDER.to_string(),
            data,
        },
    })
}

/// Walk the aggregate state in key order and build the resource records,
/// skipping regions whose every service reported a zero total.
pub fn resource_records(
    state: &BTreeMap<String, RegionSummary>,
    account_id: &str,
) -> Vec<OutputRecord> {
    let mut records = Vec::new();
    for (region, summary) in state {
        if region_is_empty(summary) {
            debug!("Skipping empty region {}", region);
            continue;
        }
        records.push(resource_record(region, summary, account_id));
    }
    records
}
