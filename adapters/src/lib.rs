//! Core `adapters` crate for EDA identity handling.
//!
//! This crate defines the `IdentityAdapter` trait, which validates bearer
//! tokens into session identities, and provides the concrete implementations
//! (fixture-backed demo mode and an HTTP backend). It also owns the static
//! fixture directory and the credential resolver that turns a selected role
//! into a session payload.

pub mod demo;
pub mod errors;
pub mod fixtures;
pub mod models;
pub mod remote;
pub mod resolver;
pub mod token;

use async_trait::async_trait;

pub use demo::DemoAdapter;
pub use errors::{AdapterError, ResolveError};
pub use fixtures::{FixtureDirectory, RoleMapping};
pub use models::*;
pub use remote::RemoteAdapter;
pub use resolver::CredentialResolver;

/// Validates opaque tokens against some identity source.
///
/// Implementations never fail: malformed, unknown or unverifiable tokens all
/// come back as [`Validation::Invalid`].
#[async_trait]
pub trait IdentityAdapter: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    async fn validate(&self, token: Option<&str>) -> Validation;

    /// Like [`validate`](Self::validate) but surfaces backend failures
    /// instead of folding them into `Invalid`. Used for profile refetches,
    /// where the caller wants to tell "logged out" from "backend down".
    async fn check(&self, token: Option<&str>) -> Result<Validation, AdapterError> {
        Ok(self.validate(token).await)
    }
}
