//! Fixture-backed identity adapter.
//!
//! This file contains the concrete implementation of the `IdentityAdapter`
//! trait used in demo mode: tokens are decoded locally and looked up in the
//! fixture directory, with no network involved.

use crate::models::Validation;
use crate::resolver::CredentialResolver;
use crate::token::parse as parse_token;
use crate::IdentityAdapter;
use async_trait::async_trait;
use log::debug;

#[derive(Debug, Clone)]
pub struct DemoAdapter {
    resolver: CredentialResolver,
}

impl DemoAdapter {
    #[must_use]
    pub fn new(resolver: CredentialResolver) -> Self {
        Self { resolver }
    }

    /// Synchronous lookup behind [`IdentityAdapter::validate`].
    #[must_use]
    pub fn lookup(&self, token: Option<&str>) -> Validation {
        let Some(id) = token.and_then(parse_token) else {
            debug!("token missing or not in demo format");
            return Validation::Invalid;
        };
        let Some(user) = self.resolver.directory().user_by_id(id) else {
            debug!("token refers to unknown demo user {id}");
            return Validation::Invalid;
        };

        let payload = self.resolver.resolve_user(user).payload;
        Validation::Valid {
            user: payload.user,
            role: payload.role,
            permissions: payload.permissions,
        }
    }
}

#[async_trait]
impl IdentityAdapter for DemoAdapter {
    fn name(&self) -> &'static str {
        "demo"
    }

    async fn validate(&self, token: Option<&str>) -> Validation {
        self.lookup(token)
    }
}
