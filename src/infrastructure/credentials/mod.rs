//! Credential provider implementations

mod env_provider;

pub use env_provider::{
    ChainCredentialProvider, DEFAULT_API_KEY_VARS, EnvCredentialProvider,
    StaticCredentialProvider,
};
