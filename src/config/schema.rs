use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Workspace file: projects, their measured functions and the organization's
/// characteristic ratings.
///
/// Example YAML:
/// ```yaml
/// projects:
///   - { id: "1", name: "Sales System" }
/// entries:
///   - { project: "1", type: ILF, name: "Customer table", complexity: medium }
/// characteristics:
///   data_communications: 3
///   performance: 4
/// export:
///   path: reports/function-points.csv
/// theme: auto
/// ```
///
/// Types, complexities and ratings stay as raw values here so validation can
/// report every problem in the file at once.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub projects: Vec<ProjectConfig>,

    #[serde(default)]
    pub entries: Vec<EntryConfig>,

    /// Partial overrides keyed by snake_case characteristic name; missing keys
    /// keep their seeded rating.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub characteristics: BTreeMap<String, i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export: Option<ExportConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeMode>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EntryConfig {
    /// Id of the owning project
    pub project: String,

    /// ILF, EIF, EI, EO or EQ (APF codes ALI, AIE, EE, SE, CE also accepted)
    #[serde(rename = "type")]
    pub function_type: String,

    pub name: String,

    /// low, medium or high
    pub complexity: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ExportConfig {
    /// Destination for `export` when no `--output` is given
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Auto,
    Dark,
    Light,
}

impl Config {
    /// Demo workspace used when no workspace file exists yet.
    pub fn sample() -> Self {
        let entry = |project: &str, function_type: &str, name: &str, complexity: &str| EntryConfig {
            project: project.to_string(),
            function_type: function_type.to_string(),
            name: name.to_string(),
            complexity: complexity.to_string(),
        };

        Self {
            projects: vec![
                ProjectConfig {
                    id: "1".to_string(),
                    name: "Sales System".to_string(),
                },
                ProjectConfig {
                    id: "2".to_string(),
                    name: "Customer Portal".to_string(),
                },
            ],
            entries: vec![
                entry("1", "ILF", "Customer Table", "medium"),
                entry("1", "EIF", "External API Integration", "high"),
                entry("1", "EI", "Product Registration", "low"),
                entry("2", "EQ", "Sales Report", "high"),
                entry("2", "EO", "Stock Query", "medium"),
            ],
            characteristics: BTreeMap::new(),
            export: None,
            theme: None,
        }
    }
}
