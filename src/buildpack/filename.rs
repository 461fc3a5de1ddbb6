//! Buildpack artifact filename parsing
//!
//! Extracts a buildpack's logical name and version from the filename of its
//! packaged artifact. Two layouts are recognized:
//! - Standard: `NAME-buildpack-v1.2.3.zip`, where `buildpack` may be
//!   preceded by `_` or `-` and an optional `-cached`/`-offline` tag sits
//!   before the version
//! - Hash-stamped: `NAME_buildpack-v1_2-TAG-abcdef0.zip`, an
//!   underscore-delimited version followed by a build tag and short hash

use regex::Regex;

/// Error type for filename parsing
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FilenameError {
    /// The filename matches none of the known layouts
    #[error("could not parse buildpack filename: {0}")]
    Unrecognized(String),
}

/// Name and version extracted from a buildpack artifact filename
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFilename {
    pub name: String,
    pub version: String,
}

/// Parser for buildpack artifact filenames
pub struct FilenameParser {
    /// Regex for the standard layout: `name-buildpack[-cached|-offline]-v1.2.3.zip`
    standard_re: Regex,
    /// Regex for the hash-stamped layout: `name_buildpack-v3_19-tag-abcdef01.zip`
    hashed_re: Regex,
}

impl FilenameParser {
    pub fn new() -> Self {
        Self {
            // Match: name[_-]buildpack[-cached|-offline]-vX.Y.Z.zip
            standard_re: Regex::new(r"^([a-z-]+)[_-]buildpack(-cached|-offline)?-v([0-9.]+)\.zip$")
                .unwrap(),
            // Match: name[_-]buildpack[-cached|-offline]-vX_Y-tag-hhhhhhh.zip
            hashed_re: Regex::new(
                r"^([a-z]+)[_-]buildpack(-cached|-offline)?-v([0-9_]+)-[a-zA-Z]+-[a-f0-9]{7}\.zip$",
            )
            .unwrap(),
        }
    }

    /// Extract name and version from a buildpack artifact filename.
    ///
    /// An empty filename yields an empty pair rather than an error: the
    /// platform reports buildpacks without an uploaded artifact that way,
    /// and callers treat them as version-unknown.
    pub fn parse(&self, filename: &str) -> Result<ParsedFilename, FilenameError> {
        if filename.is_empty() {
            return Ok(ParsedFilename::default());
        }

        if let Some(caps) = self.standard_re.captures(filename) {
            return Ok(ParsedFilename {
                name: caps[1].to_string(),
                version: caps[3].to_string(),
            });
        }

        // Some java buildpack builds stamp an underscore-delimited version
        // and a trailing build hash, e.g. `java-buildpack-v3_19-company-b7c2d95.zip`.
        if let Some(caps) = self.hashed_re.captures(filename) {
            return Ok(ParsedFilename {
                name: caps[1].to_string(),
                version: caps[3].replace('_', "."),
            });
        }

        Err(FilenameError::Unrecognized(filename.to_string()))
    }
}

impl Default for FilenameParser {
    fn default() -> Self {
        Self::new()
    }
}
