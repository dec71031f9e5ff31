//! Credential management domain

mod credential;
mod provider;

pub use credential::{Credential, mask_key};
pub use provider::CredentialProvider;

#[cfg(test)]
pub use provider::MockCredentialProvider;
