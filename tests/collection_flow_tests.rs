//! End-to-end collection flows over a fake probe runner: record ordering,
//! empty-region filtering, global scope handling, and wire shapes.

mod common;

use awsummary::collector::probes::ScopedSummaries;
use awsummary::collector::registry::{GlobalService, RegionalService};
use awsummary::collector::{
    collect_with_runner, emitter, CollectOptions, OutputRecord, ServiceSummary, SummaryValue,
};
use common::FakeRunner;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use tokio::sync::mpsc;

const ACCOUNT_ID: &str = "123456789012";

/// Drives the engine the way `Collector::collect` does: registration first,
/// then the dispatched collection, returning every record the consumer saw.
async fn run_collect(
    runner: FakeRunner,
    regions: &[&str],
    options: CollectOptions,
) -> (Vec<serde_json::Value>, awsummary::collector::CollectReport) {
    let regions: Vec<String> = regions.iter().map(|r| r.to_string()).collect();
    let (tx, mut rx) = mpsc::channel(64);

    tx.send(emitter::registration_record()).await.unwrap();
    let report = collect_with_runner(Arc::new(runner), &regions, ACCOUNT_ID, &options, tx)
        .await
        .unwrap();

    let mut records = Vec::new();
    while let Some(record) = rx.recv().await {
        records.push(serde_json::to_value(&record).unwrap());
    }
    (records, report)
}

#[tokio::test]
async fn ec2_census_emits_only_nonempty_regions() {
    let breakdown = [("t2-micro".to_string(), SummaryValue::Count(2))]
        .into_iter()
        .collect();
    let runner = FakeRunner::new().with_regional(
        RegionalService::Ec2,
        "us-east-1",
        ServiceSummary::new(2).with_extra("type", SummaryValue::Breakdown(breakdown)),
    );

    let (records, report) = run_collect(
        runner,
        &["us-east-1", "us-west-2"],
        CollectOptions::default(),
    )
    .await;

    // One registration plus exactly one resource record; us-west-2 is absent.
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["resource_type"], "CLOUD_SERVICE_TYPE");
    assert_eq!(records[1]["resource_type"], "CLOUD_SERVICE");
    assert_eq!(records[1]["resource"]["data"]["region_name"], "us-east-1");
    assert_eq!(records[1]["resource"]["data"]["account_id"], ACCOUNT_ID);
    assert_eq!(records[1]["resource"]["data"]["ec2"]["total_count"], 2);
    assert_eq!(
        records[1]["resource"]["data"]["ec2"]["type"]["t2-micro"],
        2
    );
    assert!(records
        .iter()
        .all(|r| r["resource"]["data"]["region_name"] != "us-west-2"));

    // 2 regions x 6 regional services + 2 global services, none failing.
    assert_eq!(report.probes_dispatched, 14);
    assert!(report.failed.is_empty());
}

#[tokio::test]
async fn all_zero_account_yields_registration_only() {
    let (records, report) = run_collect(
        FakeRunner::new(),
        &["us-east-1", "us-west-2", "eu-west-1"],
        CollectOptions::default(),
    )
    .await;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["resource_type"], "CLOUD_SERVICE_TYPE");
    assert!(report.failed.is_empty());
}

#[tokio::test]
async fn zero_regions_still_yields_registration() {
    let (records, _) = run_collect(FakeRunner::new(), &[], CollectOptions::default()).await;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["resource_type"], "CLOUD_SERVICE_TYPE");
}

#[tokio::test]
async fn global_dns_data_emits_synthetic_global_region() {
    let scoped: ScopedSummaries = [("global".to_string(), ServiceSummary::new(3))]
        .into_iter()
        .collect();
    let runner = FakeRunner::new().with_global(GlobalService::Route53, scoped);

    let (records, _) = run_collect(runner, &["us-east-1"], CollectOptions::default()).await;

    assert_eq!(records.len(), 2);
    assert_eq!(records[1]["resource"]["data"]["region_name"], "global");
    assert_eq!(records[1]["resource"]["data"]["route53"]["total_count"], 3);
}

#[tokio::test]
async fn bucket_census_merges_into_real_regions() {
    let scoped: ScopedSummaries = [
        ("us-east-1".to_string(), ServiceSummary::new(2)),
        ("eu-west-1".to_string(), ServiceSummary::new(1)),
    ]
    .into_iter()
    .collect();
    let runner = FakeRunner::new()
        .with_global(GlobalService::S3, scoped)
        .with_regional(RegionalService::Ec2, "us-east-1", ServiceSummary::new(1));

    let (records, _) = run_collect(
        runner,
        &["us-east-1", "eu-west-1"],
        CollectOptions::default(),
    )
    .await;

    assert_eq!(records.len(), 3);
    // Key-ordered emission: eu-west-1 before us-east-1.
    assert_eq!(records[1]["resource"]["data"]["region_name"], "eu-west-1");
    assert_eq!(records[1]["resource"]["data"]["s3"]["total_count"], 1);
    assert_eq!(records[2]["resource"]["data"]["region_name"], "us-east-1");
    assert_eq!(records[2]["resource"]["data"]["s3"]["total_count"], 2);
    assert_eq!(records[2]["resource"]["data"]["ec2"]["total_count"], 1);
}

#[tokio::test]
async fn registration_record_streams_before_probes_finish() {
    // A probe slow enough that the registration must arrive first if the
    // stream is live rather than buffer-then-flush.
    let runner = FakeRunner::new()
        .with_regional(RegionalService::Ec2, "us-east-1", ServiceSummary::new(1))
        .with_slow("ec2", "us-east-1", std::time::Duration::from_millis(200));

    let (tx, mut rx) = mpsc::channel(8);
    tx.send(emitter::registration_record()).await.unwrap();

    let regions = vec!["us-east-1".to_string()];
    let options = CollectOptions::default();
    let collect = tokio::spawn(async move {
        collect_with_runner(Arc::new(runner), &regions, ACCOUNT_ID, &options, tx).await
    });

    let first = tokio::time::timeout(std::time::Duration::from_millis(50), rx.recv())
        .await
        .expect("registration record should arrive before the slow probe")
        .unwrap();
    assert!(matches!(first, OutputRecord::Registration(_)));

    let report = collect.await.unwrap().unwrap();
    assert!(report.failed.is_empty());

    let second = rx.recv().await.unwrap();
    let value = serde_json::to_value(&second).unwrap();
    assert_eq!(value["resource"]["data"]["region_name"], "us-east-1");
}

#[tokio::test]
async fn closed_receiver_ends_emission_without_error() {
    let runner = FakeRunner::new().with_regional(
        RegionalService::Ec2,
        "us-east-1",
        ServiceSummary::new(1),
    );

    let (tx, rx) = mpsc::channel(8);
    drop(rx);

    let regions = vec!["us-east-1".to_string()];
    let report = collect_with_runner(
        Arc::new(runner),
        &regions,
        ACCOUNT_ID,
        &CollectOptions::default(),
        tx,
    )
    .await
    .unwrap();

    assert_eq!(report.probes_dispatched, 8);
}
