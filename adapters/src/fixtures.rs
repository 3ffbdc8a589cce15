//! Static fixture directory of demo roles and users.
//!
//! The directory is built once at startup and only ever read. It holds the
//! role-selection cards, one demo user per role, and the table mapping a
//! demo role id to its canonical role name and permission set.

use crate::models::{ChildRecord, DashboardVariant, DemoUser, PermissionSet, RoleOption, RoleProfile};
use std::collections::HashMap;

/// Canonical name and permissions granted to a demo role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleMapping {
    pub nombre: String,
    pub permissions: PermissionSet,
}

impl RoleMapping {
    fn new(nombre: &str, permissions: &[&str]) -> Self {
        Self {
            nombre: nombre.to_string(),
            permissions: permissions.iter().copied().collect(),
        }
    }

    /// Low-privilege mapping applied to roles without an entry.
    #[must_use]
    pub fn fallback() -> Self {
        Self::new("trabajador", &["read_students"])
    }
}

#[derive(Debug, Clone)]
pub struct FixtureDirectory {
    roles: Vec<RoleOption>,
    users: Vec<DemoUser>,
    mappings: HashMap<String, RoleMapping>,
}

impl FixtureDirectory {
    /// Builds a directory from explicit parts.
    #[must_use]
    pub fn new(
        roles: Vec<RoleOption>,
        users: Vec<DemoUser>,
        mappings: HashMap<String, RoleMapping>,
    ) -> Self {
        Self {
            roles,
            users,
            mappings,
        }
    }

    /// The demo data set shipped with EDA.
    #[must_use]
    pub fn demo() -> Self {
        let roles = vec![
            role_option(
                "administracion",
                "Administración",
                "building",
                "Gestión institucional, usuarios y reportes",
                DashboardVariant::Admin,
            ),
            role_option(
                "docente",
                "Docente",
                "chalkboard",
                "Aulas, asistencia y calificaciones",
                DashboardVariant::Teacher,
            ),
            role_option(
                "padre",
                "Padre de familia",
                "family",
                "Seguimiento de hijos, notas y asistencia",
                DashboardVariant::Parent,
            ),
            role_option(
                "especialista",
                "Especialista",
                "stethoscope",
                "Evaluaciones y seguimiento especializado",
                DashboardVariant::Specialist,
            ),
            role_option(
                "secretaria",
                "Secretaría",
                "folder",
                "Trámites y atención administrativa",
                DashboardVariant::Teacher,
            ),
        ];

        let users = vec![
            DemoUser {
                id: 1,
                username: "admin.demo".to_string(),
                full_name: "Carmen Rodríguez".to_string(),
                email: "admin@eda.demo".to_string(),
                avatar: "/avatars/admin.png".to_string(),
                role: "administracion".to_string(),
                profile: RoleProfile::Administration {
                    office: "Dirección General".to_string(),
                },
            },
            DemoUser {
                id: 2,
                username: "docente.demo".to_string(),
                full_name: "Luis Fernández Ruiz".to_string(),
                email: "docente@eda.demo".to_string(),
                avatar: "/avatars/docente.png".to_string(),
                role: "docente".to_string(),
                profile: RoleProfile::Teacher {
                    classroom: "3° B".to_string(),
                    subjects: vec!["Matemáticas".to_string(), "Ciencias".to_string()],
                },
            },
            DemoUser {
                id: 3,
                username: "padre.demo".to_string(),
                full_name: "Rosa Martínez".to_string(),
                email: "padre@eda.demo".to_string(),
                avatar: "/avatars/padre.png".to_string(),
                role: "padre".to_string(),
                profile: RoleProfile::Parent {
                    children: vec![
                        ChildRecord {
                            name: "Diego Martínez".to_string(),
                            grade: "3° B".to_string(),
                        },
                        ChildRecord {
                            name: "Lucía Martínez".to_string(),
                            grade: "1° A".to_string(),
                        },
                    ],
                },
            },
            DemoUser {
                id: 4,
                username: "especialista.demo".to_string(),
                full_name: "Jorge Salazar".to_string(),
                email: "especialista@eda.demo".to_string(),
                avatar: "/avatars/especialista.png".to_string(),
                role: "especialista".to_string(),
                profile: RoleProfile::Specialist {
                    specialty: "Psicología educativa".to_string(),
                },
            },
            DemoUser {
                id: 5,
                username: "secretaria.demo".to_string(),
                full_name: "Patricia Gómez".to_string(),
                email: "secretaria@eda.demo".to_string(),
                avatar: "/avatars/secretaria.png".to_string(),
                role: "secretaria".to_string(),
                profile: RoleProfile::Staff,
            },
        ];

        // secretaria intentionally has no mapping
        let mappings = HashMap::from([
            (
                "administracion".to_string(),
                RoleMapping::new(
                    "admin",
                    &[
                        "all",
                        "read_students",
                        "write_students",
                        "manage_users",
                        "financial_access",
                        "reports_access",
                    ],
                ),
            ),
            (
                "docente".to_string(),
                RoleMapping::new(
                    "trabajador",
                    &[
                        "read_students",
                        "write_students",
                        "academic_access",
                        "attendance_access",
                    ],
                ),
            ),
            (
                "padre".to_string(),
                RoleMapping::new(
                    "padre",
                    &["read_own_children", "view_grades", "view_attendance"],
                ),
            ),
            (
                "especialista".to_string(),
                RoleMapping::new(
                    "especialista",
                    &["read_students", "specialist_access", "write_reports"],
                ),
            ),
        ]);

        Self::new(roles, users, mappings)
    }

    #[must_use]
    pub fn role_options(&self) -> &[RoleOption] {
        &self.roles
    }

    #[must_use]
    pub fn role_option(&self, role_id: &str) -> Option<&RoleOption> {
        self.roles.iter().find(|r| r.id == role_id)
    }

    /// The demo user selected by a role id.
    #[must_use]
    pub fn user_for_role(&self, role_id: &str) -> Option<&DemoUser> {
        self.users.iter().find(|u| u.role == role_id)
    }

    #[must_use]
    pub fn user_by_id(&self, id: u32) -> Option<&DemoUser> {
        self.users.iter().find(|u| u.id == id)
    }

    #[must_use]
    pub fn mapping_for(&self, role_id: &str) -> Option<&RoleMapping> {
        self.mappings.get(role_id)
    }

    pub fn users(&self) -> impl Iterator<Item = &DemoUser> {
        self.users.iter()
    }
}

fn role_option(
    id: &str,
    display_name: &str,
    icon: &str,
    description: &str,
    dashboard: DashboardVariant,
) -> RoleOption {
    RoleOption {
        id: id.to_string(),
        display_name: display_name.to_string(),
        icon: icon.to_string(),
        description: description.to_string(),
        dashboard,
    }
}
