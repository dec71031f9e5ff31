use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Course focus of a college
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum CollegeType {
    #[serde(rename = "IT")]
    It,
    Management,
    #[default]
    Both,
}

impl CollegeType {
    /// Parses a model-supplied value, falling back to `Both` for anything unrecognized
    pub fn from_loose(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CollegeType::It => "IT",
            CollegeType::Management => "Management",
            CollegeType::Both => "Both",
        }
    }
}

impl fmt::Display for CollegeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollegeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "it" => Ok(CollegeType::It),
            "management" => Ok(CollegeType::Management),
            "both" => Ok(CollegeType::Both),
            other => Err(format!("Unknown college type: {}", other)),
        }
    }
}

impl<'de> Deserialize<'de> for CollegeType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(CollegeType::from_loose(value.as_deref()))
    }
}

/// Contact information; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl ContactDetails {
    pub fn is_empty(&self) -> bool {
        self.phone.is_none() && self.email.is_none() && self.website.is_none()
    }
}

/// Fee for a single course, as free text (e.g. "₹2,00,000 per year")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeEntry {
    pub course: String,
    pub amount: String,
}

impl FeeEntry {
    pub fn new(course: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            course: course.into(),
            amount: amount.into(),
        }
    }
}

/// A college record as shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct College {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub contact_details: ContactDetails,
    pub courses_available: Vec<String>,
    pub fees: Vec<FeeEntry>,
    #[serde(rename = "type", default)]
    pub college_type: CollegeType,
}

impl College {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            contact_details: ContactDetails::default(),
            courses_available: Vec::new(),
            fees: Vec::new(),
            college_type: CollegeType::Both,
        }
    }

    pub fn with_contact(mut self, contact: ContactDetails) -> Self {
        self.contact_details = contact;
        self
    }

    pub fn with_course(mut self, course: impl Into<String>) -> Self {
        self.courses_available.push(course.into());
        self
    }

    pub fn with_fee(mut self, course: impl Into<String>, amount: impl Into<String>) -> Self {
        self.fees.push(FeeEntry::new(course, amount));
        self
    }

    pub fn with_type(mut self, college_type: CollegeType) -> Self {
        self.college_type = college_type;
        self
    }
}
