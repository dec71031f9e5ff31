//! College domain model and prompts

mod catalog;
mod entity;
mod prompt;

pub use catalog::{INDIAN_STATES, MAJOR_CITIES, is_known_location};
pub use entity::{College, CollegeType, ContactDetails, FeeEntry};
pub use prompt::{PromptKind, PromptSettings};
