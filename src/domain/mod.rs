//! Domain layer - Core business logic and entities

pub mod cache;
pub mod college;
pub mod credentials;
pub mod error;
pub mod llm;
pub mod normalizer;
pub mod search;

pub use cache::{CachePolicy, CachedColleges, KeyStrategy, LocationCache};
pub use college::{College, CollegeType, ContactDetails, FeeEntry, PromptKind, PromptSettings};
pub use credentials::{Credential, CredentialProvider};
pub use error::DomainError;
pub use llm::{
    FinishReason, LlmProvider, LlmRequest, LlmRequestBuilder, LlmResponse, Message, MessageRole,
    Usage,
};
pub use normalizer::Normalizer;
pub use search::{ErrorCategory, SearchState};
