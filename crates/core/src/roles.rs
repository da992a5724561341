//! Dashboard roles and the views each role may open.

use serde::{Deserialize, Serialize};

pub const ROLE_STUDENT: &str = "student";
pub const ROLE_ADMIN: &str = "admin";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Admin,
}

impl Role {
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            ROLE_STUDENT => Ok(Self::Student),
            ROLE_ADMIN => Ok(Self::Admin),
            _ => Err(format!("Invalid role '{s}'. Must be one of: student, admin")),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => ROLE_STUDENT,
            Self::Admin => ROLE_ADMIN,
        }
    }

    /// The views this role can navigate to, in sidebar order.
    pub fn allowed_views(&self) -> &'static [View] {
        match self {
            Self::Admin => &[View::Analytics, View::Approvals, View::Form, View::History],
            Self::Student => &[View::Form],
        }
    }

    /// The view shown right after login.
    pub fn default_view(&self) -> View {
        match self {
            Self::Admin => View::Analytics,
            Self::Student => View::Form,
        }
    }

    pub fn can_open(&self, view: View) -> bool {
        self.allowed_views().contains(&view)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Analytics,
    Approvals,
    Form,
    History,
}

impl View {
    /// Sidebar label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Analytics => "Dashboard",
            Self::Approvals => "Aprobaciones",
            Self::Form => "Cargar Informe",
            Self::History => "Historial de Informes",
        }
    }
}
