//! Strict normalizer used for the primary prompt

use serde_json::Value;

use super::extract::parse_json_array;
use super::fields::{fee_list, nested_contact, string_list, text};
use crate::domain::college::{College, CollegeType};
use crate::domain::DomainError;

/// Parses model output and keeps only entries with every required field.
///
/// Required: non-empty `name` and `address`, a non-empty `coursesAvailable` array and a
/// `fees` array. Contact details default to empty and `type` to `Both`.
pub fn normalize_strict(text: &str) -> Result<Vec<College>, DomainError> {
    let entries = parse_json_array(text)?;
    let total = entries.len();

    let colleges: Vec<College> = entries.iter().filter_map(strict_college).collect();

    if colleges.is_empty() {
        return Err(DomainError::empty_result(format!(
            "No valid colleges found in response ({} entries rejected)",
            total
        )));
    }

    Ok(colleges)
}

fn strict_college(entry: &Value) -> Option<College> {
    let name = text(entry.get("name"))?;
    let address = text(entry.get("address"))?;
    let courses = string_list(entry.get("coursesAvailable")).filter(|c| !c.is_empty())?;
    let fees = fee_list(entry.get("fees"))?;

    Some(College {
        name,
        address,
        contact_details: nested_contact(entry),
        courses_available: courses,
        fees,
        college_type: CollegeType::from_loose(entry.get("type").and_then(Value::as_str)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_entry(name: &str) -> Value {
        json!({
            "name": name,
            "address": "Powai, Mumbai 400076",
            "contactDetails": {"phone": "+91-22-2572-2545", "website": "https://www.iitb.ac.in"},
            "coursesAvailable": ["B.Tech CSE", "MBA"],
            "fees": [{"course": "B.Tech CSE", "amount": "230000"}],
            "type": "IT"
        })
    }

    #[test]
    fn test_keeps_only_complete_entries() {
        let payload = json!([
            valid_entry("IIT Bombay"),
            {"name": "No Address", "coursesAvailable": ["MBA"], "fees": []},
            {"name": "No Fees", "address": "Pune", "coursesAvailable": ["MBA"]},
            {"name": "Courses Not A List", "address": "Pune", "coursesAvailable": "MBA", "fees": []},
            {"name": "No Courses", "address": "Pune", "coursesAvailable": [], "fees": []},
            {"name": "Minimal", "address": "Thane", "coursesAvailable": ["BBA"], "fees": []}
        ]);

        let colleges = normalize_strict(&payload.to_string()).unwrap();

        assert_eq!(colleges.len(), 2);
        assert_eq!(colleges[0].name, "IIT Bombay");
        assert_eq!(colleges[0].college_type, CollegeType::It);
        assert_eq!(
            colleges[0].contact_details.website.as_deref(),
            Some("https://www.iitb.ac.in")
        );

        assert_eq!(colleges[1].name, "Minimal");
        assert!(colleges[1].contact_details.is_empty());
        assert_eq!(colleges[1].college_type, CollegeType::Both);
        assert!(colleges[1].fees.is_empty());
    }

    #[test]
    fn test_unrecognized_type_defaults_to_both() {
        let mut entry = valid_entry("NMIMS");
        entry["type"] = json!("Commerce");

        let colleges = normalize_strict(&json!([entry]).to_string()).unwrap();
        assert_eq!(colleges[0].college_type, CollegeType::Both);
    }

    #[test]
    fn test_empty_result_is_distinct_from_parse_error() {
        let empty = normalize_strict("[]").unwrap_err();
        assert!(matches!(empty, DomainError::EmptyResult { .. }));

        let rejected = normalize_strict(r#"[{"name": "Only a name"}]"#).unwrap_err();
        assert!(matches!(rejected, DomainError::EmptyResult { .. }));

        let garbage = normalize_strict("Sorry, I can't help with that.").unwrap_err();
        assert!(matches!(garbage, DomainError::Parse { .. }));
    }

    #[test]
    fn test_fenced_and_chatty_output() {
        let text = format!(
            "Sure! Here are the colleges:\n```json\n{}\n```\nLet me know if you need more.",
            json!([valid_entry("IIT Bombay")])
        );

        let colleges = normalize_strict(&text).unwrap();
        assert_eq!(colleges.len(), 1);
    }

    #[test]
    fn test_truncated_output_recovers_complete_entries() {
        let complete = valid_entry("IIT Bombay").to_string();
        let text = format!(
            r#"[{},{{"name":"JBIMS","address":"Churchgate","coursesAvailable":["MMS"],"fees":[{{"course":"MBA","amount":"2000"#,
            complete
        );

        let colleges = normalize_strict(&text).unwrap();

        assert_eq!(colleges.len(), 1);
        assert_eq!(colleges[0].name, "IIT Bombay");
    }

    #[test]
    fn test_output_is_idempotent() {
        let payload = json!([
            valid_entry("IIT Bombay"),
            {"name": "SPJIMR", "address": "Andheri", "coursesAvailable": ["PGDM", 2024],
             "fees": [{"course": "PGDM", "amount": 2100000}], "type": "management"}
        ]);

        let first = normalize_strict(&payload.to_string()).unwrap();
        let reserialized = serde_json::to_string(&first).unwrap();
        let second = normalize_strict(&reserialized).unwrap();

        assert_eq!(first, second);
    }
}
