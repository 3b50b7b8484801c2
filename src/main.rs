#![warn(clippy::all, rust_2018_idioms)]

use awsummary::collector::{AwsCredentials, CollectOptions, Collector};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    // RUST_LOG overrides; default keeps the SDK's transport chatter down.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(
            "awsummary=info,aws_config=warn,aws_smithy_runtime=warn,aws_smithy_runtime_api=warn,aws_sigv4=warn,hyper=warn",
        )
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let access_key_id = std::env::var("AWS_ACCESS_KEY_ID")
        .map_err(|_| anyhow::anyhow!("AWS_ACCESS_KEY_ID is not set"))?;
    let secret_access_key = std::env::var("AWS_SECRET_ACCESS_KEY")
        .map_err(|_| anyhow::anyhow!("AWS_SECRET_ACCESS_KEY is not set"))?;

    let collector = Collector::new(AwsCredentials::new(access_key_id, secret_access_key));

    let (state, _capability) = collector.verify().await?;
    tracing::info!("Verify: {:?}", state);

    let (tx, mut rx) = mpsc::channel(64);
    let options = CollectOptions::default();

    let printer = tokio::spawn(async move {
        while let Some(record) = rx.recv().await {
            match serde_json::to_string(&record) {
                Ok(line) => println!("{}", line),
                Err(e) => tracing::error!("Failed to serialize record: {}", e),
            }
        }
    });

    let report = collector.collect(&options, tx).await?;
    printer.await?;

    if !report.failed.is_empty() {
        for failure in &report.failed {
            tracing::warn!(
                "Probe {} in {} contributed nothing: {}",
                failure.service,
                failure.scope,
                failure.error
            );
        }
    }
    tracing::info!(
        "Done: {}/{} probes succeeded",
        report.probes_succeeded(),
        report.probes_dispatched
    );

    Ok(())
}
