//! Buildpack freshness reporting across Cloud Foundry foundations.
//!
//! Scrapes every configured foundation's Cloud Controller, scores each
//! app's buildpack against the versions deployed anywhere on that
//! foundation, and serves the result as a JSON report with a small
//! dashboard in front of it.

pub mod buildpack;
pub mod config;
pub mod platform;
pub mod report;
pub mod server;
