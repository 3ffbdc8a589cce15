//! Handler functions for the dashboard endpoint.

use crate::auth::models::SessionState;
use crate::services::dispatcher::{dispatch_session, View};
use crate::AppState;
use axum::extract::State;
use axum::Json;
use eda_adapters::DashboardVariant;
use serde::Serialize;

/// Raw role fields shown when no dashboard matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticPanel {
    pub title: &'static str,
    pub role_name: Option<String>,
    pub legacy_role_name: Option<String>,
    pub user_id: Option<u32>,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub view: View,
    pub redirect: &'static str,
    pub dashboard: Option<DashboardVariant>,
    pub panel: Option<DiagnosticPanel>,
}

impl DashboardResponse {
    pub fn for_session(session: &SessionState) -> Self {
        let view = dispatch_session(session);
        let panel = match &view {
            View::Unknown {
                role_name,
                legacy_role_name,
            } => Some(DiagnosticPanel {
                title: "Rol no reconocido",
                role_name: role_name.clone(),
                legacy_role_name: legacy_role_name.clone(),
                user_id: session.user.as_ref().map(|u| u.id),
                username: session.user.as_ref().map(|u| u.username.clone()),
            }),
            _ => None,
        };
        Self {
            redirect: view.path(),
            dashboard: view.dashboard(),
            panel,
            view,
        }
    }
}

pub async fn dashboard(State(state): State<AppState>) -> Json<DashboardResponse> {
    Json(DashboardResponse::for_session(&state.auth.session()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use eda_adapters::{CredentialResolver, FixtureDirectory};
    use std::sync::Arc;

    fn session(role: &str) -> SessionState {
        let resolver = CredentialResolver::new(Arc::new(FixtureDirectory::demo()));
        SessionState::from_payload(resolver.resolve(role).unwrap().payload)
    }

    #[test]
    fn known_roles_have_no_panel() {
        let response = DashboardResponse::for_session(&session("padre"));
        assert_eq!(response.view, View::Parent);
        assert_eq!(response.dashboard, Some(DashboardVariant::Parent));
        assert!(response.panel.is_none());
    }

    #[test]
    fn unknown_role_gets_diagnostic_panel() {
        let mut state = session("docente");
        if let Some(role) = state.role.as_mut() {
            role.nombre = "mystery_role".to_string();
        }
        if let Some(user) = state.user.as_mut() {
            user.role = "mystery2".to_string();
        }

        let response = DashboardResponse::for_session(&state);
        let panel = response.panel.expect("panel");
        assert_eq!(response.redirect, "/unknown-role");
        assert_eq!(panel.role_name.as_deref(), Some("mystery_role"));
        assert_eq!(panel.legacy_role_name.as_deref(), Some("mystery2"));
        assert_eq!(panel.user_id, Some(2));
    }

    #[test]
    fn anonymous_redirects_to_login() {
        let response = DashboardResponse::for_session(&SessionState::default());
        assert_eq!(response.view, View::Anonymous);
        assert_eq!(response.redirect, "/login");
    }
}
