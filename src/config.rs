//! Runtime configuration
//!
//! Report policy constants and foundation credential loading. Foundations
//! are declared through numbered environment variable quadruples
//! (`CF_FOUNDATION_1`, `CF_API_1`, `CF_USERNAME_1`, `CF_PASSWORD_1`, then
//! `_2` and so on); numbering stops at the first missing `CF_FOUNDATION_i`.

use std::collections::HashMap;

// =============================================================================
// Report policy constants
// =============================================================================

/// Days without an update after which an app counts as stale (two weeks)
pub const STALE_APP_MIN_AGE_DAYS: i64 = 14;

/// Versions a buildpack may trail its major line by and still count as current
pub const BUILDPACK_FRESHNESS_CAP: u32 = 1;

/// Seconds a scraped report stays fresh before a request triggers a rebuild
pub const SCRAPE_MAX_AGE_SECS: i64 = 60;

/// Connection details for one foundation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundationConfig {
    pub name: String,
    pub api_url: String,
    pub username: String,
    pub password: String,
}

/// Error type for configuration loading
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A foundation is declared but one of its companion variables is missing
    #[error("{var} env var not found for {foundation} foundation")]
    MissingVar { var: String, foundation: String },

    /// No foundations are declared at all
    #[error(
        "no foundation environment variables found. CF_USERNAME_1, CF_PASSWORD_1, CF_API_1 and CF_FOUNDATION_1 must be set"
    )]
    NoFoundations,
}

/// Load foundation credentials from the process environment.
pub fn foundations_from_env() -> Result<Vec<FoundationConfig>, ConfigError> {
    let vars: HashMap<String, String> = std::env::vars().collect();
    foundations_from_vars(&vars)
}

/// Pure loader over key/value pairs; [`foundations_from_env`] is the thin
/// wrapper over the process environment.
///
/// Returns foundations in index order, which downstream layers rely on for
/// deterministic report output.
pub fn foundations_from_vars(
    vars: &HashMap<String, String>,
) -> Result<Vec<FoundationConfig>, ConfigError> {
    let mut foundations = Vec::new();

    for i in 1.. {
        let Some(name) = vars.get(&format!("CF_FOUNDATION_{i}")) else {
            break;
        };

        let username = required_var(vars, format!("CF_USERNAME_{i}"), name)?;
        let password = required_var(vars, format!("CF_PASSWORD_{i}"), name)?;
        let api_url = required_var(vars, format!("CF_API_{i}"), name)?;

        foundations.push(FoundationConfig {
            name: name.clone(),
            api_url,
            username,
            password,
        });
    }

    if foundations.is_empty() {
        return Err(ConfigError::NoFoundations);
    }

    Ok(foundations)
}

fn required_var(
    vars: &HashMap<String, String>,
    key: String,
    foundation: &str,
) -> Result<String, ConfigError> {
    vars.get(&key).cloned().ok_or_else(|| ConfigError::MissingVar {
        var: key,
        foundation: foundation.to_string(),
    })
}
