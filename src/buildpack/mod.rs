//! Buildpack layer
//! - filename.rs: artifact filename parsing (name/version extraction)
//! - freshness.rs: per-major version ordering, freshness scoring, deprecation rule

pub mod filename;
pub mod freshness;

pub use filename::{FilenameError, FilenameParser, ParsedFilename};
pub use freshness::{VersionLadder, is_deprecated, parse_version};
