//! Report wire model
//!
//! The JSON document served to clients: a flat application list plus
//! derived summary counts. Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};

/// Freshness value for buildpacks whose identity could not be resolved
pub const UNRESOLVED_FRESHNESS: u32 = 99;

/// A buildpack scored against the versions available on its foundation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Buildpack {
    pub name: String,
    pub version: String,
    /// Releases behind the newest in the same major line (0 = newest,
    /// [`UNRESOLVED_FRESHNESS`] = identity unresolved)
    pub freshness: u32,
    pub is_deprecated: bool,
}

impl Buildpack {
    /// Placeholder for apps staged without any detectable buildpack
    pub fn undetected() -> Self {
        Self {
            name: "Undetected - app unable to start".to_string(),
            version: "Not applicable".to_string(),
            freshness: UNRESOLVED_FRESHNESS,
            is_deprecated: true,
        }
    }

    /// Placeholder for apps whose detected buildpack no longer exists
    pub fn deleted() -> Self {
        Self {
            name: "Deleted".to_string(),
            version: String::new(),
            freshness: UNRESOLVED_FRESHNESS,
            is_deprecated: true,
        }
    }

    /// A custom buildpack known only by free text, usually a git URL.
    /// Its version cannot be determined, so it counts as deprecated.
    pub fn custom(identifier: String) -> Self {
        Self {
            name: identifier,
            version: String::new(),
            freshness: 0,
            is_deprecated: true,
        }
    }
}

/// One deployed application with its resolved buildpack
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub name: String,
    /// Calendar date of the last update (or creation, if never updated)
    pub updated_at: String,
    pub buildpack: Buildpack,
    pub is_stale: bool,
    pub foundation: String,
    pub org: String,
    pub space: String,
    pub instances: u32,
    #[serde(rename = "memoryMB")]
    pub memory_mb: u32,
    pub state: String,
}

impl Application {
    /// An app is happy when it is neither stale nor on a deprecated buildpack
    pub fn is_happy(&self) -> bool {
        !self.is_stale && !self.buildpack.is_deprecated
    }
}

/// Counts derived from an application list
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_apps: usize,
    pub stale_apps: usize,
    pub deprecated_apps: usize,
}

impl Summary {
    pub fn from_apps(apps: &[Application]) -> Self {
        Self {
            total_apps: apps.len(),
            stale_apps: apps.iter().filter(|app| app.is_stale).count(),
            deprecated_apps: apps
                .iter()
                .filter(|app| app.buildpack.is_deprecated)
                .count(),
        }
    }
}

/// The full report document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppReport {
    pub apps: Vec<Application>,
    pub summary: Summary,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample_app(is_stale: bool, is_deprecated: bool) -> Application {
        Application {
            name: "billing".to_string(),
            updated_at: "2017-08-12".to_string(),
            buildpack: Buildpack {
                name: "ruby".to_string(),
                version: "1.6.39".to_string(),
                freshness: 0,
                is_deprecated,
            },
            is_stale,
            foundation: "dev".to_string(),
            org: "APP1234-project-x".to_string(),
            space: "DEV".to_string(),
            instances: 2,
            memory_mb: 512,
            state: "started".to_string(),
        }
    }

    #[rstest]
    #[case(false, false, true)]
    #[case(true, false, false)]
    #[case(false, true, false)]
    #[case(true, true, false)]
    fn is_happy_requires_neither_stale_nor_deprecated(
        #[case] is_stale: bool,
        #[case] is_deprecated: bool,
        #[case] expected: bool,
    ) {
        assert_eq!(sample_app(is_stale, is_deprecated).is_happy(), expected);
    }

    #[test]
    fn from_apps_counts_stale_and_deprecated_independently() {
        let apps = vec![
            sample_app(false, false),
            sample_app(true, false),
            sample_app(true, true),
        ];

        let summary = Summary::from_apps(&apps);

        assert_eq!(
            summary,
            Summary {
                total_apps: 3,
                stale_apps: 2,
                deprecated_apps: 1,
            }
        );
    }

    #[test]
    fn application_serializes_with_camel_case_field_names() {
        let value = serde_json::to_value(sample_app(false, false)).unwrap();

        assert_eq!(value["updatedAt"], "2017-08-12");
        assert_eq!(value["isStale"], false);
        assert_eq!(value["memoryMB"], 512);
        assert_eq!(value["buildpack"]["isDeprecated"], false);
        assert_eq!(value["buildpack"]["freshness"], 0);
    }

    #[test]
    fn report_serializes_as_apps_and_summary() {
        let apps = vec![sample_app(false, false)];
        let report = AppReport {
            summary: Summary::from_apps(&apps),
            apps,
        };

        let value = serde_json::to_value(report).unwrap();

        assert!(value.get("apps").is_some());
        assert_eq!(value["summary"]["totalApps"], 1);
        assert_eq!(value["summary"]["staleApps"], 0);
        assert_eq!(value["summary"]["deprecatedApps"], 0);
    }

    #[test]
    fn placeholder_buildpacks_are_deprecated_and_unresolved() {
        let undetected = Buildpack::undetected();
        assert_eq!(undetected.name, "Undetected - app unable to start");
        assert_eq!(undetected.version, "Not applicable");
        assert_eq!(undetected.freshness, UNRESOLVED_FRESHNESS);
        assert!(undetected.is_deprecated);

        let deleted = Buildpack::deleted();
        assert_eq!(deleted.name, "Deleted");
        assert_eq!(deleted.version, "");
        assert_eq!(deleted.freshness, UNRESOLVED_FRESHNESS);
        assert!(deleted.is_deprecated);

        let custom = Buildpack::custom("https://github.com/example/bp".to_string());
        assert_eq!(custom.freshness, 0);
        assert!(custom.is_deprecated);
    }
}
