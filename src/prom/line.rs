use std::sync::OnceLock;

use regex::Regex;

/// What a single line of exposition text turned out to be.
#[derive(Debug, Clone, PartialEq)]
pub enum Line<'a> {
    Help { name: &'a str, help: &'a str },
    Type { name: &'a str, type_str: &'a str },
    Sample(SampleLine<'a>),
    Blank,
    Comment,
    Unrecognized,
}

/// A sample line split into its raw parts. Labels are still encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleLine<'a> {
    pub name: &'a str,
    pub labels: Option<&'a str>,
    pub value: &'a str,
}

fn help_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^# HELP (\S+) (.+)$").expect("valid HELP regex"))
}

fn type_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^# TYPE (\S+) (\S+)\s*$").expect("valid TYPE regex"))
}

// name, optional {labels} (greedy so a quoted '}' stays inside), value,
// optional integer timestamp which is ignored
fn sample_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([^\s{}#]+)(?:\{(.*)\})?\s+(\S+)(?:\s+-?\d+)?\s*$")
            .expect("valid sample regex")
    })
}

pub fn classify(line: &str) -> Line<'_> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    if line.trim().is_empty() {
        return Line::Blank;
    }

    if line.starts_with("# HELP") {
        return match help_regex().captures(line) {
            Some(caps) => match (caps.get(1), caps.get(2)) {
                (Some(name), Some(help)) => Line::Help {
                    name: name.as_str(),
                    help: help.as_str(),
                },
                _ => Line::Unrecognized,
            },
            None => Line::Unrecognized,
        };
    }

    if line.starts_with("# TYPE") {
        return match type_regex().captures(line) {
            Some(caps) => match (caps.get(1), caps.get(2)) {
                (Some(name), Some(type_str)) => Line::Type {
                    name: name.as_str(),
                    type_str: type_str.as_str(),
                },
                _ => Line::Unrecognized,
            },
            None => Line::Unrecognized,
        };
    }

    if line.starts_with('#') {
        return Line::Comment;
    }

    let Some(caps) = sample_regex().captures(line) else {
        return Line::Unrecognized;
    };
    match (caps.get(1), caps.get(3)) {
        (Some(name), Some(value)) => Line::Sample(SampleLine {
            name: name.as_str(),
            labels: caps.get(2).map(|m| m.as_str()),
            value: value.as_str(),
        }),
        _ => Line::Unrecognized,
    }
}
