use super::model::LabelSet;

/// Decodes the text between `{` and `}` of a sample line.
///
/// Fragments are separated by commas outside of quotes. A fragment without
/// `=`, or with an empty name or value, is dropped.
pub fn decode_labels(block: &str) -> LabelSet {
    let mut labels = LabelSet::new();
    for fragment in split_fragments(block) {
        let Some((key, value)) = fragment.split_once('=') else {
            log::trace!("dropping label fragment without '=': {fragment:?}");
            continue;
        };
        let key = key.trim();
        let value = unquote(value.trim());
        if key.is_empty() || value.is_empty() {
            continue;
        }
        labels.insert(key.to_string(), value);
    }
    labels
}

fn split_fragments(block: &str) -> Vec<&str> {
    let mut fragments = Vec::new();
    let mut in_quotes = false;
    let mut escaped = false;
    let mut start = 0;
    for (i, ch) in block.char_indices() {
        match ch {
            _ if escaped => escaped = false,
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fragments.push(&block[start..i]);
                start = i + 1;
            }
            _ => (),
        }
    }
    fragments.push(&block[start..]);
    fragments.retain(|f| !f.trim().is_empty());
    fragments
}

/// Strips one leading and one trailing quote, then decodes `\\`, `\"` and `\n`.
fn unquote(value: &str) -> String {
    let value = value.strip_prefix('"').unwrap_or(value);
    let value = value.strip_suffix('"').unwrap_or(value);
    if !value.contains('\\') {
        return value.to_string();
    }

    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(labels: &LabelSet) -> Vec<(&str, &str)> {
        labels
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    #[test]
    fn decodes_in_encounter_order() {
        let labels = decode_labels(r#"a="1",b="two""#);
        assert_eq!(pairs(&labels), vec![("a", "1"), ("b", "two")]);
    }

    #[test]
    fn empty_block_yields_no_labels() {
        assert!(decode_labels("").is_empty());
        assert!(decode_labels("  ").is_empty());
    }

    #[test]
    fn drops_bad_fragments() {
        let labels = decode_labels(r#"novalue,="x",empty="",ok="yes""#);
        assert_eq!(pairs(&labels), vec![("ok", "yes")]);
    }

    #[test]
    fn tolerates_spaces_and_trailing_comma() {
        let labels = decode_labels(r#" method = "post" , code="200","#);
        assert_eq!(pairs(&labels), vec![("method", "post"), ("code", "200")]);
    }

    #[test]
    fn keeps_commas_and_equals_inside_quotes() {
        let labels = decode_labels(r#"code="2,00",content="text==true""#);
        assert_eq!(
            pairs(&labels),
            vec![("code", "2,00"), ("content", "text==true")]
        );
    }

    #[test]
    fn decodes_escapes() {
        let labels = decode_labels(
            r#"path="C:\\DIR\\FILE.TXT",error="Cannot find file:\n\"FILE.TXT\"""#,
        );
        assert_eq!(labels["path"], "C:\\DIR\\FILE.TXT");
        assert_eq!(labels["error"], "Cannot find file:\n\"FILE.TXT\"");
    }

    #[test]
    fn accepts_unquoted_values() {
        let labels = decode_labels(r#"a=unquoted,b="quoted""#);
        assert_eq!(pairs(&labels), vec![("a", "unquoted"), ("b", "quoted")]);
    }

    #[test]
    fn repeated_key_takes_later_value() {
        let labels = decode_labels(r#"user="U1",user="U2""#);
        assert_eq!(pairs(&labels), vec![("user", "U2")]);
    }
}
