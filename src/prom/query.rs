use indexmap::IndexMap;

use super::model::{MetricFamilies, MetricFamily};

/// Group key used for samples that don't carry the requested label.
pub const UNSET_LABEL: &str = "unset";

impl MetricFamilies {
    /// The first family with exactly this name.
    pub fn family_of(&self, name: &str) -> Option<&MetricFamily> {
        self.iter().find(|family| family.name == name)
    }

    /// All sample values of the named family in source order. Empty when the
    /// family doesn't exist.
    pub fn values_of(&self, name: &str) -> Vec<f64> {
        self.family_of(name)
            .map(|family| family.values.iter().map(|s| s.value).collect())
            .unwrap_or_default()
    }

    /// Sums the values of the named family per value of `label`.
    ///
    /// Keys keep the order in which they were first seen. Samples without
    /// the label are accumulated under [`UNSET_LABEL`].
    pub fn group_by_label(&self, name: &str, label: &str) -> IndexMap<String, f64> {
        self.family_of(name)
            .map(|family| family.group_by_label(label))
            .unwrap_or_default()
    }
}

impl MetricFamily {
    pub fn group_by_label(&self, label: &str) -> IndexMap<String, f64> {
        let mut groups: IndexMap<String, f64> = IndexMap::new();
        for sample in &self.values {
            let key = sample.label(label).unwrap_or(UNSET_LABEL);
            *groups.entry(key.to_string()).or_insert(0.0) += sample.value;
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use crate::prom::parse;
    use crate::prom::test_data;

    use super::*;

    #[test]
    fn values_of_missing_metric_is_empty() {
        let families = parse(test_data::EMPLOYEE_METRICS);
        assert!(families.values_of("missing_metric").is_empty());
        assert!(MetricFamilies::default().values_of("anything").is_empty());
    }

    #[test]
    fn values_of_in_source_order() {
        let families = parse(test_data::EMPLOYEE_METRICS);
        assert_eq!(families.values_of("jira_open_tickets_total"), vec![7.0]);
        assert_eq!(
            families.values_of("slack_messages_total"),
            vec![0.0, 42.0, 17.0, 3.0]
        );
    }

    #[test]
    fn family_of_reports_absence() {
        let families = parse(test_data::DASHBOARD_EXAMPLE);
        assert!(families.family_of("jira_open_tickets_total").is_some());
        assert!(families.family_of("jira_open_tickets").is_none());
    }

    #[test]
    fn groups_dashboard_example_by_user() {
        let families = parse(test_data::DASHBOARD_EXAMPLE);
        let groups = families.group_by_label("slack_messages_total", "user");
        let pairs: Vec<(&str, f64)> = groups.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        assert_eq!(pairs, vec![("U1", 3.0), ("U2", 5.0)]);
    }

    #[test]
    fn grouping_sums_and_uses_unset_sentinel() {
        let families = parse(
            "# HELP tickets Tickets\n\
             tickets{status=\"Done\",team=\"a\"} 2\n\
             tickets{status=\"Open\"} 1\n\
             tickets{status=\"Done\",team=\"b\"} 3\n\
             tickets 4\n",
        );
        let groups = families.group_by_label("tickets", "status");
        let pairs: Vec<(&str, f64)> = groups.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        assert_eq!(pairs, vec![("Done", 5.0), ("Open", 1.0), (UNSET_LABEL, 4.0)]);
    }

    #[test]
    fn grouping_missing_metric_is_empty() {
        let families = parse(test_data::DASHBOARD_EXAMPLE);
        assert!(families.group_by_label("nope", "user").is_empty());
    }
}
