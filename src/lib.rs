#![warn(clippy::all, rust_2018_idioms)]

//! awsummary - account-wide AWS resource footprint summarizer
//!
//! Queries multiple independent AWS service APIs (EC2, load balancers, RDS,
//! Lambda, DynamoDB, S3, Route53) across every region of an account and emits
//! normalized per-region summary records for inventory/cataloguing systems.
//!
//! # Architecture
//!
//! - **Probes** ([`collector::probes`]): one pure census function per service,
//!   each building its own scoped client.
//! - **Registry** ([`collector::registry`]): the closed sets of regional and
//!   global services.
//! - **Dispatcher** ([`collector::dispatcher`]): one concurrent worker per
//!   (service, region) pair behind a bounded semaphore, with a join barrier
//!   and per-probe failure isolation.
//! - **Aggregator** ([`collector::aggregator`]): the single lock-guarded
//!   region -> service -> summary map probes merge into.
//! - **Emitter** ([`collector::emitter`]): converts the drained state into the
//!   output record stream, dropping empty regions.
//!
//! The transport layer that exposes `verify`/`collect` to remote callers is an
//! external collaborator; [`collector::Collector`] is the seam it consumes.

pub mod collector;
