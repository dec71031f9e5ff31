//! Infrastructure services

mod query_service;
mod search_orchestrator;

pub use query_service::{CollegeQueryService, CollegeQueryServiceTrait, QueryServiceConfig};
pub use search_orchestrator::{SearchOrchestrator, SearchOrchestratorConfig};
