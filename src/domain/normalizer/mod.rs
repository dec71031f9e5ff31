//! Turning free-form model output into validated college records

mod extract;
mod fields;
mod permissive;
mod strict;

pub use extract::{
    RepairReport, extract_array_candidate, parse_json_array, repair_truncation, strip_code_fences,
};
pub use permissive::normalize_permissive;
pub use strict::normalize_strict;

use crate::domain::DomainError;
use crate::domain::college::{College, PromptKind};

/// Normalizer variant applied to a model response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalizer {
    /// Rejects entries missing required fields
    Strict,
    /// Synthesizes placeholders for anything missing
    Permissive,
}

impl Normalizer {
    pub fn for_prompt(kind: PromptKind) -> Self {
        match kind {
            PromptKind::Primary => Normalizer::Strict,
            PromptKind::Fallback => Normalizer::Permissive,
        }
    }

    pub fn normalize(&self, text: &str, location: &str) -> Result<Vec<College>, DomainError> {
        match self {
            Normalizer::Strict => normalize_strict(text),
            Normalizer::Permissive => normalize_permissive(text, location),
        }
    }
}
