//! Credential resolution: demo role id to session payload.
//!
//! Resolution is pure. It looks the role up in the fixture directory, applies
//! the role mapping (or the fallback), normalizes the user and mints a token.
//! Persisting the result is the caller's job.

use crate::errors::ResolveError;
use crate::fixtures::{FixtureDirectory, RoleMapping};
use crate::models::{DemoUser, Resolution, RoleDescriptor, SessionPayload, SessionUser};
use crate::token;
use log::{debug, warn};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct CredentialResolver {
    directory: Arc<FixtureDirectory>,
}

impl CredentialResolver {
    #[must_use]
    pub fn new(directory: Arc<FixtureDirectory>) -> Self {
        Self { directory }
    }

    #[must_use]
    pub fn directory(&self) -> &FixtureDirectory {
        &self.directory
    }

    /// Resolves a role id selected on the entry view.
    ///
    /// A role that exists in the directory but lacks a permission mapping
    /// succeeds with [`Resolution::defaulted`] set; a role that does not
    /// exist at all is an error.
    pub fn resolve(&self, role_id: &str) -> Result<Resolution, ResolveError> {
        let role_id = role_id.trim();
        if role_id.is_empty() {
            return Err(ResolveError::EmptyRole);
        }
        let user = self
            .directory
            .user_for_role(role_id)
            .ok_or_else(|| ResolveError::RoleNotFound(role_id.to_string()))?;
        Ok(self.resolve_user(user))
    }

    /// Builds the payload for a fixture that is already in hand.
    #[must_use]
    pub fn resolve_user(&self, user: &DemoUser) -> Resolution {
        let (mapping, defaulted) = match self.directory.mapping_for(&user.role) {
            Some(mapping) => (mapping.clone(), false),
            None => {
                warn!(
                    "role '{}' has no permission mapping, applying fallback",
                    user.role
                );
                (RoleMapping::fallback(), true)
            }
        };

        let (first_name, last_name) = split_name(&user.full_name);
        let option = self.directory.role_option(&user.role);
        let display_name = option.map_or_else(|| user.role.clone(), |o| o.display_name.clone());

        let session_user = SessionUser {
            id: user.id,
            username: user.username.clone(),
            first_name,
            last_name,
            email: user.email.clone(),
            avatar: user.avatar.clone(),
            role: user.role.clone(),
            permissions: mapping.permissions.clone(),
            profile: user.profile.clone(),
            must_change_password: false,
        };
        let role = RoleDescriptor {
            id: user.role.clone(),
            nombre: mapping.nombre,
            display_name,
            dashboard: option.map(|o| o.dashboard),
        };

        debug!("resolved user {} as role '{}'", user.id, role.nombre);

        Resolution {
            payload: SessionPayload {
                token: token::mint(user.id),
                user: session_user,
                role,
                permissions: mapping.permissions,
            },
            defaulted,
        }
    }
}

/// Splits a full name at the first run of whitespace.
fn split_name(full_name: &str) -> (String, String) {
    let trimmed = full_name.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some((first, rest)) => (first.to_string(), rest.trim_start().to_string()),
        None => (trimmed.to_string(), String::new()),
    }
}
