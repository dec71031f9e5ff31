//! Field accessors shared by both normalizer variants

use serde_json::Value;

use crate::domain::college::{ContactDetails, FeeEntry};

/// A non-empty string field
pub(super) fn text(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// A string or a number rendered as text, e.g. fee amounts returned as `200000`
pub(super) fn text_or_number(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::Number(n)) => Some(n.to_string()),
        other => text(other),
    }
}

/// Items of an array field, `None` when the field is missing or not an array
pub(super) fn string_list(value: Option<&Value>) -> Option<Vec<String>> {
    let items = value?.as_array()?;

    Some(
        items
            .iter()
            .filter_map(|item| text_or_number(Some(item)))
            .collect(),
    )
}

/// Fee entries of an array field; items without a course or amount are dropped
pub(super) fn fee_list(value: Option<&Value>) -> Option<Vec<FeeEntry>> {
    let items = value?.as_array()?;

    Some(
        items
            .iter()
            .filter_map(|item| {
                let course = text(item.get("course"))?;
                let amount = text_or_number(item.get("amount"))?;
                Some(FeeEntry::new(course, amount))
            })
            .collect(),
    )
}

/// The nested `contactDetails` object, empty when missing or malformed
pub(super) fn nested_contact(entry: &Value) -> ContactDetails {
    let Some(contact) = entry.get("contactDetails").filter(|c| c.is_object()) else {
        return ContactDetails::default();
    };

    ContactDetails {
        phone: text(contact.get("phone")),
        email: text(contact.get("email")),
        website: text(contact.get("website")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fee_list_accepts_numeric_amounts() {
        let fees = fee_list(Some(&json!([
            {"course": "MBA", "amount": 250000},
            {"course": "BBA"},
            "not a fee"
        ])))
        .unwrap();

        assert_eq!(fees, vec![FeeEntry::new("MBA", "250000")]);
    }

    #[test]
    fn test_string_list_requires_array() {
        assert!(string_list(Some(&json!("B.Tech"))).is_none());
        assert!(string_list(None).is_none());
        assert_eq!(
            string_list(Some(&json!(["B.Tech", "", null, "MBA"]))).unwrap(),
            vec!["B.Tech".to_string(), "MBA".to_string()]
        );
    }

    #[test]
    fn test_nested_contact_ignores_non_objects() {
        assert!(nested_contact(&json!({"contactDetails": "call us"})).is_empty());

        let contact = nested_contact(&json!({"contactDetails": {"email": "info@iitb.ac.in"}}));
        assert_eq!(contact.email.as_deref(), Some("info@iitb.ac.in"));
        assert!(contact.phone.is_none());
    }
}
