use std::collections::HashMap;

use super::labels::decode_labels;
use super::line::{classify, Line, SampleLine};
use super::model::{LabelSet, MetricFamilies, MetricFamily, MetricSample, MetricType};

const CHILD_SUFFIXES: [&str; 3] = ["_bucket", "_sum", "_count"];

/// Parses Prometheus text exposition into metric families.
///
/// Never fails: lines that can't be understood are skipped. Families are
/// keyed by name and created by the first HELP or TYPE line naming them.
/// Samples without a declared family are dropped.
pub fn parse(input: &str) -> MetricFamilies {
    let mut families: Vec<MetricFamily> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    // most recently declared family, checked before the index lookup
    let mut current: Option<usize> = None;

    for (line_no, line) in input.split('\n').enumerate() {
        match classify(line) {
            Line::Help { name, help } => {
                let idx = upsert(&mut families, &mut index, name);
                let family = &mut families[idx];
                if family.help.is_empty() {
                    family.help = help.to_string();
                } else {
                    log::trace!("line {}: ignoring repeated HELP for {name}", line_no + 1);
                }
                current = Some(idx);
            }
            Line::Type { name, type_str } => {
                let idx = upsert(&mut families, &mut index, name);
                let family = &mut families[idx];
                if family.metric_type.is_none() {
                    family.metric_type = type_str.parse().ok();
                } else {
                    log::trace!("line {}: ignoring repeated TYPE for {name}", line_no + 1);
                }
                current = Some(idx);
            }
            Line::Sample(sample) => {
                let Some(idx) = find_family(&families, &index, current, sample.name) else {
                    log::trace!(
                        "line {}: no family declared for sample {}",
                        line_no + 1,
                        sample.name
                    );
                    continue;
                };
                match build_sample(&sample) {
                    Some(value) => families[idx].values.push(value),
                    None => log::trace!(
                        "line {}: invalid value {:?} for {}",
                        line_no + 1,
                        sample.value,
                        sample.name
                    ),
                }
            }
            Line::Unrecognized => {
                log::trace!("line {}: unrecognized: {line:?}", line_no + 1);
            }
            Line::Blank | Line::Comment => (),
        }
    }

    MetricFamilies::new(families)
}

fn upsert(
    families: &mut Vec<MetricFamily>,
    index: &mut HashMap<String, usize>,
    name: &str,
) -> usize {
    if let Some(&idx) = index.get(name) {
        return idx;
    }
    families.push(MetricFamily::new(name));
    let idx = families.len() - 1;
    index.insert(name.to_string(), idx);
    idx
}

fn find_family(
    families: &[MetricFamily],
    index: &HashMap<String, usize>,
    current: Option<usize>,
    name: &str,
) -> Option<usize> {
    if let Some(idx) = current {
        if families[idx].name == name {
            return Some(idx);
        }
    }
    if let Some(&idx) = index.get(name) {
        return Some(idx);
    }

    CHILD_SUFFIXES
        .iter()
        .filter_map(|suffix| name.strip_suffix(suffix))
        .filter_map(|base| index.get(base).copied())
        .find(|&idx| {
            families[idx]
                .metric_type
                .as_ref()
                .is_some_and(MetricType::has_child_series)
        })
}

fn build_sample(sample: &SampleLine) -> Option<MetricSample> {
    let value: f64 = sample.value.parse().ok()?;
    let labels = sample.labels.map(decode_labels).unwrap_or_else(LabelSet::new);
    Some(MetricSample::new(labels, value))
}
