//! Role-to-dashboard dispatch.
//!
//! Two historical user shapes are in circulation: one carries a canonical
//! role object (`role.nombre`), the other only a flat demo role string on the
//! user. Dispatch checks the canonical name first and the legacy string
//! second. A role neither stage recognizes yields [`View::Unknown`] and never
//! a privileged dashboard.

use crate::auth::models::SessionState;
use eda_adapters::DashboardVariant;
use serde::Serialize;

/// Top-level view to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    Anonymous,
    Admin,
    Teacher,
    Parent,
    Specialist,
    Director,
    #[serde(rename_all = "camelCase")]
    Unknown {
        role_name: Option<String>,
        legacy_role_name: Option<String>,
    },
}

impl View {
    /// Route the client is redirected to for this view.
    #[must_use]
    pub fn path(&self) -> &'static str {
        match self {
            Self::Anonymous => "/login",
            Self::Admin => "/admin",
            Self::Teacher => "/docente",
            Self::Parent => "/padre",
            Self::Specialist => "/especialista",
            Self::Director => "/direccion",
            Self::Unknown { .. } => "/unknown-role",
        }
    }

    #[must_use]
    pub fn dashboard(&self) -> Option<DashboardVariant> {
        match self {
            Self::Admin => Some(DashboardVariant::Admin),
            Self::Teacher => Some(DashboardVariant::Teacher),
            Self::Parent => Some(DashboardVariant::Parent),
            Self::Specialist => Some(DashboardVariant::Specialist),
            Self::Director => Some(DashboardVariant::Director),
            Self::Anonymous | Self::Unknown { .. } => None,
        }
    }
}

fn canonical_view(role_name: &str) -> Option<View> {
    match role_name {
        "admin" | "administrador" | "DIRECTORA" => Some(View::Admin),
        "SECRETARIA" => Some(View::Director),
        "trabajador" | "docente" | "Docente" => Some(View::Teacher),
        "padre" | "ESTUDIANTE" => Some(View::Parent),
        "especialista" => Some(View::Specialist),
        _ => None,
    }
}

fn legacy_view(legacy_role_name: &str) -> Option<View> {
    match legacy_role_name {
        "administracion" => Some(View::Admin),
        "docente" => Some(View::Teacher),
        "padre" => Some(View::Parent),
        "especialista" => Some(View::Specialist),
        _ => None,
    }
}

/// Picks the view for an authentication state. First match wins:
/// unauthenticated, canonical role, legacy role, unknown.
#[must_use]
pub fn dispatch(
    is_authenticated: bool,
    role_name: Option<&str>,
    legacy_role_name: Option<&str>,
) -> View {
    if !is_authenticated {
        return View::Anonymous;
    }
    if let Some(view) = role_name.and_then(canonical_view) {
        return view;
    }
    if let Some(view) = legacy_role_name.and_then(legacy_view) {
        return view;
    }
    View::Unknown {
        role_name: role_name.map(str::to_string),
        legacy_role_name: legacy_role_name.map(str::to_string),
    }
}

/// [`dispatch`] over a session; a session without a user is anonymous.
#[must_use]
pub fn dispatch_session(state: &SessionState) -> View {
    if state.user.is_none() {
        return View::Anonymous;
    }
    dispatch(
        state.is_authenticated,
        state.role_name(),
        state.legacy_role_name(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use eda_adapters::{CredentialResolver, FixtureDirectory};
    use std::sync::Arc;

    #[test]
    fn unauthenticated_is_anonymous_regardless_of_roles() {
        assert_eq!(dispatch(false, Some("admin"), Some("administracion")), View::Anonymous);
    }

    #[test]
    fn canonical_wins_over_legacy() {
        assert_eq!(dispatch(true, Some("DIRECTORA"), Some("docente")), View::Admin);
    }

    #[test]
    fn legacy_used_when_canonical_missing() {
        assert_eq!(dispatch(true, None, Some("padre")), View::Parent);
    }

    #[test]
    fn legacy_used_when_canonical_unrecognized() {
        assert_eq!(dispatch(true, Some("rector"), Some("especialista")), View::Specialist);
    }

    #[test]
    fn unknown_keeps_both_raw_fields() {
        assert_eq!(
            dispatch(true, Some("mystery_role"), Some("mystery2")),
            View::Unknown {
                role_name: Some("mystery_role".to_string()),
                legacy_role_name: Some("mystery2".to_string()),
            }
        );
    }

    #[test]
    fn canonical_table() {
        let cases = [
            ("admin", View::Admin),
            ("administrador", View::Admin),
            ("DIRECTORA", View::Admin),
            ("SECRETARIA", View::Director),
            ("trabajador", View::Teacher),
            ("docente", View::Teacher),
            ("Docente", View::Teacher),
            ("padre", View::Parent),
            ("ESTUDIANTE", View::Parent),
            ("especialista", View::Specialist),
        ];
        for (role, expected) in cases {
            assert_eq!(dispatch(true, Some(role), None), expected, "role {role}");
        }
    }

    #[test]
    fn legacy_namespace_is_not_merged_into_canonical() {
        // "administracion" is only a legacy name
        assert!(matches!(
            dispatch(true, Some("administracion"), None),
            View::Unknown { .. }
        ));
    }

    #[test]
    fn sessions_from_fixtures_reach_their_dashboards() {
        let resolver = CredentialResolver::new(Arc::new(FixtureDirectory::demo()));
        let cases = [
            ("administracion", View::Admin),
            ("docente", View::Teacher),
            ("padre", View::Parent),
            ("especialista", View::Specialist),
            ("secretaria", View::Teacher),
        ];
        for (role, expected) in cases {
            let payload = resolver.resolve(role).unwrap().payload;
            let state = SessionState::from_payload(payload);
            assert_eq!(dispatch_session(&state), expected, "role {role}");
        }
    }

    #[test]
    fn authenticated_flag_without_user_is_anonymous() {
        let state = SessionState {
            is_authenticated: true,
            ..SessionState::default()
        };
        assert_eq!(dispatch_session(&state), View::Anonymous);
    }

    #[test]
    fn unknown_serializes_both_fields() {
        let view = dispatch(true, Some("x"), None);
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["view"], "unknown");
        assert_eq!(value["roleName"], "x");
        assert!(value["legacyRoleName"].is_null());
    }
}
