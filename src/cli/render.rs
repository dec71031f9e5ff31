//! Plain-text result cards

use std::fmt::Write;

use crate::domain::{College, CollegeType, SearchState};

/// Label shown on a card for the college's focus
pub fn type_label(college_type: CollegeType) -> &'static str {
    match college_type {
        CollegeType::Both => "IT & Management",
        other => other.as_str(),
    }
}

pub fn render_college(index: usize, college: &College) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}. {} [{}]", index, college.name, type_label(college.college_type));
    let _ = writeln!(out, "   Address: {}", college.address);

    let contact = &college.contact_details;
    if let Some(phone) = &contact.phone {
        let _ = writeln!(out, "   Phone:   {}", phone);
    }
    if let Some(email) = &contact.email {
        let _ = writeln!(out, "   Email:   {}", email);
    }
    if let Some(website) = &contact.website {
        let _ = writeln!(out, "   Website: {}", website);
    }

    if !college.courses_available.is_empty() {
        let _ = writeln!(out, "   Courses: {}", college.courses_available.join(", "));
    }

    if !college.fees.is_empty() {
        let _ = writeln!(out, "   Fees:");
        for fee in &college.fees {
            let _ = writeln!(out, "     - {}: {}", fee.course, fee.amount);
        }
    }

    out
}

/// Heading, visible cards and the "more" hint for the current state
pub fn render_state(state: &SearchState) -> String {
    if let Some(error) = &state.error {
        return format!("{}\n", error);
    }

    let Some(location) = &state.location else {
        return "No search yet. Pick a state or city and search.\n".to_string();
    };

    let visible = state.visible();
    let mut out = String::new();

    let _ = writeln!(out, "Colleges in {}", location);
    let _ = writeln!(
        out,
        "Displaying {} of {} institution{}\n",
        visible.len(),
        state.total(),
        if state.total() == 1 { "" } else { "s" }
    );

    for (i, college) in visible.iter().enumerate() {
        out.push_str(&render_college(i + 1, college));
        out.push('\n');
    }

    if state.has_more() {
        let _ = writeln!(
            out,
            "{} more available (type `more` to see them)",
            state.total() - visible.len()
        );
    }

    out
}
