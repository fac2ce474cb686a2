//! Dashboard file loader (strict parsing).

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid dashboard yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid dashboard: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DashboardConfig {
    /// Opaque label values (user ids) to human readable names.
    #[serde(default = "default_display_names")]
    pub display_names: IndexMap<String, String>,
    #[serde(default = "default_panels")]
    pub panels: Vec<PanelConfig>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PanelConfig {
    pub title: String,
    pub metric: String,
    /// Sum the samples per value of this label instead of listing them.
    #[serde(default)]
    pub group_by: Option<String>,
    #[serde(default)]
    pub display_names: bool,
    #[serde(default)]
    pub hide_zero: bool,
    /// Group keys that never show up, matched before name mapping.
    #[serde(default)]
    pub hidden: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            display_names: default_display_names(),
            panels: default_panels(),
        }
    }
}

impl DashboardConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.panels.is_empty() {
            return Err(ConfigError::Invalid("no panels configured".into()));
        }
        for (i, panel) in self.panels.iter().enumerate() {
            if panel.title.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("panel {i} has no title")));
            }
            if panel.metric.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "panel '{}' has no metric",
                    panel.title
                )));
            }
            if panel.group_by.as_deref().is_some_and(|l| l.trim().is_empty()) {
                return Err(ConfigError::Invalid(format!(
                    "panel '{}' groups by an empty label",
                    panel.title
                )));
            }
        }
        Ok(())
    }
}

pub fn load_from_file(path: &Path) -> Result<DashboardConfig, ConfigError> {
    let s = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<DashboardConfig, ConfigError> {
    let cfg: DashboardConfig = serde_yaml::from_str(s)?;
    cfg.validate()?;
    Ok(cfg)
}

fn default_display_names() -> IndexMap<String, String> {
    IndexMap::from([("USLACKBOT".to_string(), "Slackbot".to_string())])
}

fn scalar(title: &str, metric: &str) -> PanelConfig {
    PanelConfig {
        title: title.to_string(),
        metric: metric.to_string(),
        group_by: None,
        display_names: false,
        hide_zero: false,
        hidden: Vec::new(),
    }
}

fn per_user(title: &str, metric: &str) -> PanelConfig {
    PanelConfig {
        group_by: Some("user".to_string()),
        display_names: true,
        hide_zero: true,
        hidden: vec!["USLACKBOT".to_string()],
        ..scalar(title, metric)
    }
}

fn default_panels() -> Vec<PanelConfig> {
    vec![
        PanelConfig {
            group_by: Some("status".to_string()),
            ..scalar("Tickets by status", "jira_tickets_by_status")
        },
        PanelConfig {
            group_by: Some("assignee".to_string()),
            display_names: true,
            ..scalar("Tickets by assignee", "jira_tickets_by_assignee")
        },
        scalar("Tickets completed", "jira_tickets_completed_total"),
        scalar("Open tickets", "jira_open_tickets_total"),
        scalar("Avg hours per ticket", "jira_avg_hours_per_ticket"),
        scalar("Hours logged", "jira_hours_logged_total"),
        per_user("Slack messages", "slack_messages_total"),
        per_user("Slack reactions", "slack_reactions_total"),
        per_user("Slack mentions", "slack_mentions_total"),
        per_user("Slack active minutes", "slack_active_minutes_total"),
        per_user("Positive messages", "slack_positive_messages_total"),
    ]
}
