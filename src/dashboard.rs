//! Panels shown on the dashboard and the presentation policy applied on top
//! of the metric queries.

use std::fmt::Write as _;

use indexmap::IndexMap;

use crate::config::{DashboardConfig, PanelConfig};
use crate::prom::{MetricFamilies, Snapshot};

/// Maps opaque identifiers to display names. Unknown ids pass through.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayNames {
    names: IndexMap<String, String>,
}

impl DisplayNames {
    pub fn new(names: IndexMap<String, String>) -> DisplayNames {
        DisplayNames { names }
    }

    pub fn resolve<'a>(&'a self, id: &'a str) -> &'a str {
        self.names.get(id).map_or(id, String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelView {
    /// Every sample of the metric, one row each.
    Scalar,
    GroupBy {
        label: String,
        map_names: bool,
        hide_zero: bool,
        hidden: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub title: String,
    pub metric: String,
    pub view: PanelView,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub key: String,
    pub value: f64,
}

impl From<&PanelConfig> for Panel {
    fn from(cfg: &PanelConfig) -> Self {
        let view = match &cfg.group_by {
            Some(label) => PanelView::GroupBy {
                label: label.clone(),
                map_names: cfg.display_names,
                hide_zero: cfg.hide_zero,
                hidden: cfg.hidden.clone(),
            },
            None => PanelView::Scalar,
        };
        Panel {
            title: cfg.title.clone(),
            metric: cfg.metric.clone(),
            view,
        }
    }
}

impl Panel {
    /// Rows to display for this panel. Empty means "no data".
    pub fn evaluate(&self, families: &MetricFamilies, names: &DisplayNames) -> Vec<Row> {
        match &self.view {
            PanelView::Scalar => scalar_rows(families, &self.metric),
            PanelView::GroupBy {
                label,
                map_names,
                hide_zero,
                hidden,
            } => families
                .group_by_label(&self.metric, label)
                .into_iter()
                .filter(|(key, _)| !hidden.contains(key))
                .filter(|(_, value)| !*hide_zero || *value > 0.0)
                .map(|(key, value)| Row {
                    key: if *map_names {
                        names.resolve(&key).to_string()
                    } else {
                        key
                    },
                    value,
                })
                .collect(),
        }
    }
}

fn scalar_rows(families: &MetricFamilies, metric: &str) -> Vec<Row> {
    let Some(family) = families.family_of(metric) else {
        return Vec::new();
    };
    family
        .values
        .iter()
        .map(|sample| Row {
            key: if sample.labels.is_empty() {
                family.name.clone()
            } else {
                format_labels(&sample.labels)
            },
            value: sample.value,
        })
        .collect()
}

fn format_labels(labels: &IndexMap<String, String>) -> String {
    let inner: Vec<String> = labels.iter().map(|(k, v)| format!("{k}=\"{v}\"")).collect();
    format!("{{{}}}", inner.join(","))
}

pub fn format_value(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else if value.is_finite() {
        format!("{value:.2}")
    } else {
        value.to_string()
    }
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub panels: Vec<Panel>,
    pub names: DisplayNames,
}

impl From<&DashboardConfig> for Dashboard {
    fn from(cfg: &DashboardConfig) -> Self {
        Dashboard {
            panels: cfg.panels.iter().map(Panel::from).collect(),
            names: DisplayNames::new(cfg.display_names.clone()),
        }
    }
}

impl Dashboard {
    pub fn evaluate(&self, families: &MetricFamilies) -> Vec<(&Panel, Vec<Row>)> {
        self.panels
            .iter()
            .map(|panel| (panel, panel.evaluate(families, &self.names)))
            .collect()
    }

    /// Plain text rendering, used when the dashboard runs without a terminal UI.
    pub fn render_text(&self, snapshot: &Snapshot) -> String {
        let mut out = String::new();
        if let Some(err) = &snapshot.last_error {
            let _ = writeln!(out, "last scrape failed: {err}");
        }
        for (panel, rows) in self.evaluate(&snapshot.families) {
            let _ = writeln!(out, "== {}", panel.title);
            if rows.is_empty() {
                let _ = writeln!(out, "  no data");
            }
            for row in rows {
                let _ = writeln!(out, "  {:<30} {:>12}", row.key, format_value(row.value));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prom::parse;

    const METRICS: &str = r#"# HELP slack_messages_total Messages sent
# TYPE slack_messages_total counter
slack_messages_total{user="USLACKBOT"} 9
slack_messages_total{user="U1"} 42
slack_messages_total{user="U2"} 0
slack_messages_total{user="U3"} 3
# HELP jira_tickets_by_assignee Tickets per assignee
jira_tickets_by_assignee{assignee="U1"} 5
jira_tickets_by_assignee{assignee="Unassigned"} 2
# HELP jira_open_tickets_total Open tickets
jira_open_tickets_total 7
# HELP queue_depth Queue depth
queue_depth{queue="a"} 1.5
"#;

    fn names() -> DisplayNames {
        DisplayNames::new(IndexMap::from([
            ("U1".to_string(), "Alice".to_string()),
            ("USLACKBOT".to_string(), "Slackbot".to_string()),
        ]))
    }

    fn group(
        metric: &str,
        label: &str,
        map_names: bool,
        hide_zero: bool,
        hidden: &[&str],
    ) -> Panel {
        Panel {
            title: metric.to_string(),
            metric: metric.to_string(),
            view: PanelView::GroupBy {
                label: label.to_string(),
                map_names,
                hide_zero,
                hidden: hidden.iter().map(|s| s.to_string()).collect(),
            },
        }
    }

    fn keys(rows: &[Row]) -> Vec<&str> {
        rows.iter().map(|r| r.key.as_str()).collect()
    }

    #[test]
    fn unknown_ids_pass_through() {
        let names = names();
        assert_eq!(names.resolve("U1"), "Alice");
        assert_eq!(names.resolve("U404"), "U404");
    }

    #[test]
    fn active_users_are_filtered_and_named() {
        let families = parse(METRICS);
        let panel = group("slack_messages_total", "user", true, true, &["USLACKBOT"]);
        let rows = panel.evaluate(&families, &names());
        assert_eq!(keys(&rows), vec!["Alice", "U3"]);
        assert_eq!(rows[0].value, 42.0);
    }

    #[test]
    fn grouping_without_policy_keeps_everything() {
        let families = parse(METRICS);
        let panel = group("slack_messages_total", "user", false, false, &[]);
        let rows = panel.evaluate(&families, &names());
        assert_eq!(keys(&rows), vec!["USLACKBOT", "U1", "U2", "U3"]);
    }

    #[test]
    fn unassigned_is_kept_verbatim() {
        let families = parse(METRICS);
        let panel = group("jira_tickets_by_assignee", "assignee", true, false, &[]);
        let rows = panel.evaluate(&families, &names());
        assert_eq!(keys(&rows), vec!["Alice", "Unassigned"]);
    }

    #[test]
    fn scalar_panel_rows() {
        let families = parse(METRICS);
        let open = Panel {
            title: "Open".into(),
            metric: "jira_open_tickets_total".into(),
            view: PanelView::Scalar,
        };
        let rows = open.evaluate(&families, &names());
        assert_eq!(
            rows,
            vec![Row {
                key: "jira_open_tickets_total".into(),
                value: 7.0
            }]
        );

        let depth = Panel {
            metric: "queue_depth".into(),
            ..open
        };
        let rows = depth.evaluate(&families, &names());
        assert_eq!(keys(&rows), vec![r#"{queue="a"}"#]);
    }

    #[test]
    fn missing_metric_has_no_rows() {
        let families = parse(METRICS);
        let panel = group("slack_mentions_total", "user", true, true, &[]);
        assert!(panel.evaluate(&families, &names()).is_empty());
    }

    #[test]
    fn formats_values() {
        assert_eq!(format_value(7.0), "7");
        assert_eq!(format_value(3.456), "3.46");
        assert_eq!(format_value(f64::INFINITY), "inf");
        assert_eq!(format_value(f64::NAN), "NaN");
    }

    #[test]
    fn renders_text_report() {
        let snapshot = Snapshot {
            families: parse(METRICS),
            ..Snapshot::default()
        };
        let dashboard = Dashboard {
            panels: vec![
                group("slack_messages_total", "user", true, true, &["USLACKBOT"]),
                group("slack_mentions_total", "user", true, true, &[]),
            ],
            names: names(),
        };
        let text = dashboard.render_text(&snapshot);
        assert!(text.contains("== slack_messages_total"));
        assert!(text.contains("Alice"));
        assert!(!text.contains("Slackbot"));
        assert!(text.contains("== slack_mentions_total\n  no data\n"));
    }
}
