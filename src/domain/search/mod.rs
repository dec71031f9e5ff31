//! Search screen state and error presentation

mod classify;
mod state;

pub use classify::{ErrorCategory, no_results_message};
pub use state::SearchState;
