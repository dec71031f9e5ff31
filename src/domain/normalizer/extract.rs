//! Locating and repairing the JSON array inside free-form model output

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::domain::DomainError;

static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```(?:json)?\n?").expect("valid code fence pattern"));

/// Removes every markdown code fence marker and trims the result
pub fn strip_code_fences(text: &str) -> String {
    CODE_FENCE.replace_all(text, "").trim().to_string()
}

/// Returns the span from the first `[` to the last `]`, or the whole text when there is no
/// such pair
pub fn extract_array_candidate(text: &str) -> &str {
    match (text.find('['), text.rfind(']')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text,
    }
}

/// Closers appended by [`repair_truncation`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RepairReport {
    pub braces_added: usize,
    pub brackets_added: usize,
}

impl RepairReport {
    pub fn is_noop(&self) -> bool {
        self.braces_added == 0 && self.brackets_added == 0
    }
}

/// Best-effort recovery of output cut off at the model's token limit.
///
/// Appends the deficit of `}` followed by the deficit of `]`. Characters inside string
/// literals are counted too, and the closing order ignores nesting, so this only helps when
/// the text was truncated and the unclosed structures happen to close in that order. Nothing
/// is guaranteed for other kinds of corruption.
pub fn repair_truncation(candidate: &str) -> (Cow<'_, str>, RepairReport) {
    let count = |needle: char| candidate.chars().filter(|c| *c == needle).count();

    let report = RepairReport {
        braces_added: count('{').saturating_sub(count('}')),
        brackets_added: count('[').saturating_sub(count(']')),
    };

    if report.is_noop() {
        return (Cow::Borrowed(candidate), report);
    }

    debug!(
        braces_added = report.braces_added,
        brackets_added = report.brackets_added,
        "Repairing unbalanced model output"
    );

    let mut repaired = String::with_capacity(
        candidate.len() + report.braces_added + report.brackets_added,
    );
    repaired.push_str(candidate);
    repaired.extend(std::iter::repeat_n('}', report.braces_added));
    repaired.extend(std::iter::repeat_n(']', report.brackets_added));

    (Cow::Owned(repaired), report)
}

/// Runs fence stripping, array extraction and repair, then parses the result as a JSON array
pub fn parse_json_array(text: &str) -> Result<Vec<Value>, DomainError> {
    let stripped = strip_code_fences(text);
    let candidate = extract_array_candidate(&stripped);
    let (repaired, _) = repair_truncation(candidate);

    let value: Value = serde_json::from_str(&repaired)
        .map_err(|e| DomainError::parse(format!("Invalid JSON in model response: {}", e)))?;

    match value {
        Value::Array(items) => Ok(items),
        other => Err(DomainError::parse(format!(
            "Expected a JSON array, got {}",
            describe(&other)
        ))),
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fences() {
        let text = "Here you go:\n```json\n[{\"a\":1}]\n```\n";
        assert_eq!(strip_code_fences(text), "Here you go:\n[{\"a\":1}]");
    }

    #[test]
    fn test_extract_array_candidate() {
        assert_eq!(extract_array_candidate("noise [1, 2] trailing"), "[1, 2]");
        assert_eq!(extract_array_candidate("[1] and [2]"), "[1] and [2]");
        assert_eq!(extract_array_candidate("no brackets"), "no brackets");
        assert_eq!(extract_array_candidate("] reversed ["), "] reversed [");
    }

    #[test]
    fn test_repair_appends_exact_deficit() {
        let (repaired, report) = repair_truncation(r#"[{"name":"A","contactDetails":{"phone":"1""#);

        assert_eq!(report.braces_added, 2);
        assert_eq!(report.brackets_added, 1);
        assert_eq!(
            repaired,
            r#"[{"name":"A","contactDetails":{"phone":"1"}}]"#
        );
    }

    #[test]
    fn test_repair_leaves_balanced_text_alone() {
        let (repaired, report) = repair_truncation("[{}]");

        assert!(report.is_noop());
        assert!(matches!(repaired, Cow::Borrowed("[{}]")));
    }

    #[test]
    fn test_parse_truncated_array() {
        let items = parse_json_array(r#"```json
[{"name":"A","fees":[]},{"name":"B","coursesAvailable":["MBA"]"#)
        .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[1]["coursesAvailable"][0], "MBA");
    }

    #[test]
    fn test_parse_rejects_non_array() {
        let error = parse_json_array(r#"{"name":"A"}"#).unwrap_err();
        assert!(matches!(error, DomainError::Parse { .. }));
        assert!(error.to_string().contains("an object"));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let error = parse_json_array("I could not find any colleges.").unwrap_err();
        assert!(matches!(error, DomainError::Parse { .. }));
    }
}
