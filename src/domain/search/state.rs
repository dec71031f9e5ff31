//! Observable state of the search screen

use crate::domain::college::College;

/// What the presentation layer renders
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchState {
    pub colleges: Vec<College>,
    pub loading: bool,
    pub error: Option<String>,
    /// Location of the most recent foreground search
    pub location: Option<String>,
    /// Number of results currently revealed
    pub display_count: usize,
}

impl SearchState {
    pub fn visible(&self) -> &[College] {
        let end = self.display_count.min(self.colleges.len());
        &self.colleges[..end]
    }

    pub fn has_more(&self) -> bool {
        self.display_count < self.colleges.len()
    }

    pub fn total(&self) -> usize {
        self.colleges.len()
    }
}
