//! Permissive normalizer used for the fallback prompt
//!
//! Accepts flattened contact fields and `courses` as an alias for `coursesAvailable`, and
//! fills anything missing with placeholders instead of rejecting the entry.

use serde_json::Value;

use super::extract::parse_json_array;
use super::fields::{fee_list, string_list, text};
use crate::domain::college::{College, CollegeType, ContactDetails, FeeEntry};
use crate::domain::DomainError;

const PHONE_PLACEHOLDER: &str = "Contact college directly";
const NOT_AVAILABLE: &str = "Not available";
const DEFAULT_COURSES: &[&str] = &["B.Tech Computer Science", "MBA", "BBA"];
const DEFAULT_FEES: &[(&str, &str)] = &[
    ("B.Tech", "₹1,50,000 - ₹3,00,000 per year"),
    ("MBA", "₹2,00,000 - ₹5,00,000 per year"),
];

/// Parses model output, keeping every object entry and synthesizing missing fields
pub fn normalize_permissive(text: &str, location: &str) -> Result<Vec<College>, DomainError> {
    let entries = parse_json_array(text)?;

    let colleges: Vec<College> = entries
        .iter()
        .filter(|entry| entry.is_object())
        .map(|entry| permissive_college(entry, location))
        .collect();

    if colleges.is_empty() {
        return Err(DomainError::empty_result("No colleges found in fallback response"));
    }

    Ok(colleges)
}

fn permissive_college(entry: &Value, location: &str) -> College {
    let courses = string_list(entry.get("courses"))
        .filter(|c| !c.is_empty())
        .or_else(|| string_list(entry.get("coursesAvailable")).filter(|c| !c.is_empty()))
        .unwrap_or_else(|| DEFAULT_COURSES.iter().map(|c| c.to_string()).collect());

    let fees = fee_list(entry.get("fees"))
        .filter(|f| !f.is_empty())
        .unwrap_or_else(|| {
            DEFAULT_FEES
                .iter()
                .map(|(course, amount)| FeeEntry::new(*course, *amount))
                .collect()
        });

    College {
        name: text(entry.get("name")).unwrap_or_else(|| format!("College in {}", location)),
        address: text(entry.get("address")).unwrap_or_else(|| format!("{}, India", location)),
        contact_details: flattened_contact(entry),
        courses_available: courses,
        fees,
        college_type: CollegeType::from_loose(entry.get("type").and_then(Value::as_str)),
    }
}

/// Top-level contact fields win over the nested object; gaps get placeholders
fn flattened_contact(entry: &Value) -> ContactDetails {
    let nested = entry.get("contactDetails");
    let field = |name: &str| {
        text(entry.get(name)).or_else(|| text(nested.and_then(|c| c.get(name))))
    };

    ContactDetails {
        phone: Some(field("phone").unwrap_or_else(|| PHONE_PLACEHOLDER.to_string())),
        email: Some(field("email").unwrap_or_else(|| NOT_AVAILABLE.to_string())),
        website: Some(field("website").unwrap_or_else(|| NOT_AVAILABLE.to_string())),
    }
}
