//! Report assembly
//!
//! This module turns the raw foundation collections into the report served
//! over HTTP.
//!
//! - `model`: report rows, summary counts, and placeholder buildpacks
//! - `buildpacks`: per-foundation buildpack scoring
//! - `assemble`: flattening one foundation's collections into report rows
//! - `aggregate`: concurrent fan-out across every configured foundation
//! - `error`: report assembly errors

pub mod aggregate;
pub mod assemble;
pub mod buildpacks;
pub mod error;
pub mod model;

pub use aggregate::{Aggregator, ReportSource};
pub use assemble::build_app_list;
pub use buildpacks::resolve_buildpacks;
pub use error::ReportError;
pub use model::{AppReport, Application, Buildpack, Summary, UNRESOLVED_FRESHNESS};
