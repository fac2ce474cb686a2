use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;

/// Label name to label value, in the order the labels appeared on the line.
pub type LabelSet = IndexMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricType {
    Counter,
    Gauge,
    Histogram,
    Summary,
    Untyped,
    /// A type token this reader doesn't know about, kept verbatim.
    Other(String),
}

impl MetricType {
    pub fn as_str(&self) -> &str {
        match self {
            MetricType::Counter => "counter",
            MetricType::Gauge => "gauge",
            MetricType::Histogram => "histogram",
            MetricType::Summary => "summary",
            MetricType::Untyped => "untyped",
            MetricType::Other(other) => other,
        }
    }

    /// Histograms and summaries expose their samples under suffixed names.
    pub fn has_child_series(&self) -> bool {
        matches!(self, MetricType::Histogram | MetricType::Summary)
    }
}

impl FromStr for MetricType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "counter" => MetricType::Counter,
            "gauge" => MetricType::Gauge,
            "histogram" => MetricType::Histogram,
            "summary" => MetricType::Summary,
            "untyped" => MetricType::Untyped,
            other => MetricType::Other(other.to_string()),
        })
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One observation of a metric family.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    pub labels: LabelSet,
    pub value: f64,
}

impl MetricSample {
    pub fn new(labels: LabelSet, value: f64) -> MetricSample {
        MetricSample { labels, value }
    }

    pub fn label(&self, name: &str) -> Option<&str> {
        self.labels.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricFamily {
    pub name: String,
    pub help: String,
    pub metric_type: Option<MetricType>,
    pub values: Vec<MetricSample>,
}

impl MetricFamily {
    pub fn new(name: &str) -> MetricFamily {
        MetricFamily {
            name: name.to_string(),
            help: String::new(),
            metric_type: None,
            values: Vec::new(),
        }
    }

    /// The declared type, or the empty string when no TYPE line was seen.
    pub fn type_str(&self) -> &str {
        self.metric_type.as_ref().map_or("", MetricType::as_str)
    }
}

/// The outcome of one parse: metric families in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricFamilies {
    families: Vec<MetricFamily>,
}

impl MetricFamilies {
    pub fn new(families: Vec<MetricFamily>) -> MetricFamilies {
        MetricFamilies { families }
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MetricFamily> {
        self.families.iter()
    }
}

impl<'a> IntoIterator for &'a MetricFamilies {
    type Item = &'a MetricFamily;
    type IntoIter = std::slice::Iter<'a, MetricFamily>;

    fn into_iter(self) -> Self::IntoIter {
        self.families.iter()
    }
}
