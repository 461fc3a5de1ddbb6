//! Platform API layer
//! - types.rs: raw records for the four per-foundation collections
//! - client.rs: FoundationClient trait
//! - cloud_controller.rs: Cloud Controller v2 implementation
//! - error.rs: client error types

pub mod client;
pub mod cloud_controller;
pub mod error;
pub mod types;

pub use client::FoundationClient;
pub use cloud_controller::CloudControllerClient;
pub use error::ClientError;
pub use types::{AppRecord, BuildpackRecord, FoundationSnapshot, OrgRecord, SpaceRecord};
