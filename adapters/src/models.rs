//! Generic data models for the `adapters` crate.
//!
//! These models define common representations of EDA identity entities
//! (demo users, role descriptors, permission sets, session payloads) that any
//! identity adapter produces, allowing the backend services to work with a
//! consistent data format whether a session was validated locally or remotely.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Permission string that grants every capability.
pub const WILDCARD_PERMISSION: &str = "all";

/// Top-level dashboard a role lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardVariant {
    Admin,
    Teacher,
    Parent,
    Specialist,
    Director,
}

/// A role-selection card shown on the entry view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleOption {
    pub id: String,
    pub display_name: String,
    pub icon: String,
    pub description: String,
    pub dashboard: DashboardVariant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildRecord {
    pub name: String,
    pub grade: String,
}

/// Role-specific fields of a user.
///
/// Each variant only carries what is meaningful for that role; a parent has
/// children, a teacher has a classroom, and so on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoleProfile {
    Administration { office: String },
    Teacher { classroom: String, subjects: Vec<String> },
    Parent { children: Vec<ChildRecord> },
    Specialist { specialty: String },
    Staff,
}

/// A canned identity from the fixture directory. Never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoUser {
    pub id: u32,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub avatar: String,
    /// Demo role id this fixture is selected by (`docente`, `padre`, ...).
    pub role: String,
    pub profile: RoleProfile,
}

/// Unordered set of capability strings attached to a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(BTreeSet<String>);

impl PermissionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the set holds `permission` or the `all` wildcard.
    #[must_use]
    pub fn allows(&self, permission: &str) -> bool {
        self.0.contains(WILDCARD_PERMISSION) || self.0.contains(permission)
    }

    /// Exact membership, ignoring the wildcard.
    #[must_use]
    pub fn contains(&self, permission: &str) -> bool {
        self.0.contains(permission)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// The normalized user object stored in a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: u32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub avatar: String,
    /// Legacy flat role string, kept alongside the canonical role object.
    pub role: String,
    pub permissions: PermissionSet,
    pub profile: RoleProfile,
    #[serde(default)]
    pub must_change_password: bool,
}

impl SessionUser {
    #[must_use]
    pub fn full_name(&self) -> String {
        if self.last_name.is_empty() {
            self.first_name.clone()
        } else {
            format!("{} {}", self.first_name, self.last_name)
        }
    }
}

/// The canonical role object of a session. `nombre` is the name the
/// dashboard dispatch keys on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleDescriptor {
    pub id: String,
    pub nombre: String,
    pub display_name: String,
    /// Dashboard of the role card the user was picked from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dashboard: Option<DashboardVariant>,
}

/// Everything a successful login hands to the session store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPayload {
    pub token: String,
    pub user: SessionUser,
    pub role: RoleDescriptor,
    pub permissions: PermissionSet,
}

/// Outcome of resolving a role id into a session payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub payload: SessionPayload,
    /// `true` when the role had no permission mapping and the default was used.
    pub defaulted: bool,
}

/// Result of validating a token. Validation never fails with an error;
/// anything unrecognized is simply `Invalid`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "ValidationWire", try_from = "ValidationWire")]
pub enum Validation {
    Invalid,
    Valid {
        user: SessionUser,
        role: RoleDescriptor,
        permissions: PermissionSet,
    },
}

impl Validation {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    #[must_use]
    pub fn user(&self) -> Option<&SessionUser> {
        match self {
            Self::Valid { user, .. } => Some(user),
            Self::Invalid => None,
        }
    }
}

/// `{ "valid": bool, ... }` as exchanged with a remote validation endpoint.
#[derive(Debug, Serialize, Deserialize)]
struct ValidationWire {
    valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<SessionUser>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<RoleDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    permissions: Option<PermissionSet>,
}

impl From<Validation> for ValidationWire {
    fn from(validation: Validation) -> Self {
        match validation {
            Validation::Invalid => Self {
                valid: false,
                user: None,
                role: None,
                permissions: None,
            },
            Validation::Valid {
                user,
                role,
                permissions,
            } => Self {
                valid: true,
                user: Some(user),
                role: Some(role),
                permissions: Some(permissions),
            },
        }
    }
}

impl TryFrom<ValidationWire> for Validation {
    type Error = String;

    fn try_from(wire: ValidationWire) -> Result<Self, Self::Error> {
        if !wire.valid {
            return Ok(Self::Invalid);
        }
        match (wire.user, wire.role) {
            (Some(user), Some(role)) => {
                let permissions = wire.permissions.unwrap_or_else(|| user.permissions.clone());
                Ok(Self::Valid {
                    user,
                    role,
                    permissions,
                })
            }
            _ => Err("valid validation result is missing user or role".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wildcard_allows_everything() {
        let perms: PermissionSet = ["all"].into_iter().collect();
        assert!(perms.allows("write_students"));
        assert!(!perms.contains("write_students"));
    }

    #[test]
    fn invalid_validation_serializes_as_flag_only() {
        let value = serde_json::to_value(Validation::Invalid).unwrap();
        assert_eq!(value, json!({ "valid": false }));
    }

    #[test]
    fn valid_flag_without_user_is_rejected() {
        let result: Result<Validation, _> = serde_json::from_value(json!({ "valid": true }));
        assert!(result.is_err());
    }

    #[test]
    fn role_profile_is_tagged_by_kind() {
        let profile = RoleProfile::Specialist {
            specialty: "Psicología".to_string(),
        };
        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["kind"], "specialist");
        assert_eq!(value["specialty"], "Psicología");
    }
}
