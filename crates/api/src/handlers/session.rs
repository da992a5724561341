//! Handlers for the `/session` resource (current role and navigation).

use axum::Json;
use impacto_core::roles::{Role, View};
use impacto_core::session::DashboardSession;
use impacto_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::session::ActiveSession;
use crate::response::DataResponse;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ViewInfo {
    pub view: View,
    pub label: &'static str,
}

/// Shell state for the client.
#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub session_id: Uuid,
    pub role: Role,
    pub active_view: View,
    pub allowed_views: Vec<ViewInfo>,
    pub project_count: usize,
    pub opened_at: Timestamp,
}

impl SessionInfo {
    pub fn describe(session_id: Uuid, session: &DashboardSession) -> Self {
        Self {
            session_id,
            role: session.role(),
            active_view: session.active_view(),
            allowed_views: session
                .role()
                .allowed_views()
                .iter()
                .map(|&view| ViewInfo {
                    view,
                    label: view.label(),
                })
                .collect(),
            project_count: session.projects().len(),
            opened_at: session.opened_at(),
        }
    }
}

/// Request body for `PUT /session/view`.
#[derive(Debug, Deserialize)]
pub struct SetViewRequest {
    pub view: View,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/session
pub async fn get_session(active: ActiveSession) -> AppResult<Json<DataResponse<SessionInfo>>> {
    let session = active.session.lock().await;
    Ok(Json(DataResponse {
        data: SessionInfo::describe(active.id, &session),
    }))
}

/// PUT /api/v1/session/view
///
/// Switch the active view. Views outside the role's capability table are
/// refused with 403 and the active view is left as it was.
pub async fn set_view(
    active: ActiveSession,
    Json(input): Json<SetViewRequest>,
) -> AppResult<Json<DataResponse<SessionInfo>>> {
    let mut session = active.session.lock().await;
    session.navigate(input.view)?;
    Ok(Json(DataResponse {
        data: SessionInfo::describe(active.id, &session),
    }))
}
