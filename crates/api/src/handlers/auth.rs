//! Handlers for the `/auth` resource (login, logout).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use impacto_core::error::CoreError;
use impacto_core::roles::Role;
use impacto_core::session::DashboardSession;
use serde::Deserialize;

use crate::auth::password::{verify_admin_password, AdminAuthError};
use crate::error::{AppError, AppResult};
use crate::handlers::session::SessionInfo;
use crate::middleware::session::ActiveSession;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub role: String,
    /// Required for the admin role, ignored for students.
    #[serde(default)]
    pub password: Option<String>,
}

/// POST /api/v1/auth/login
///
/// Open a dashboard session for the chosen role. The report collection is
/// loaded once here; a storage outage yields an empty collection.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<DataResponse<SessionInfo>>> {
    let role = Role::from_str_value(&input.role).map_err(CoreError::Validation)?;

    if role == Role::Admin {
        let password = input.password.as_deref().unwrap_or_default();
        verify_admin_password(password, state.config.admin_password_hash.as_deref()).map_err(
            |e| match e {
                AdminAuthError::Misconfigured(msg) => AppError::Misconfigured(msg),
                AdminAuthError::Denied => {
                    tracing::warn!("Rejected administrator login");
                    AppError::Core(CoreError::Unauthorized("Incorrect password".into()))
                }
            },
        )?;
    }

    let session = DashboardSession::open(role, &*state.store).await;
    let (id, shared) = state.sessions.open(session).await;
    let session = shared.lock().await;

    tracing::info!(
        session_id = %id,
        role = role.as_str(),
        projects = session.projects().len(),
        "Dashboard session opened"
    );

    Ok(Json(DataResponse {
        data: SessionInfo::describe(id, &session),
    }))
}

/// POST /api/v1/auth/logout
pub async fn logout(State(state): State<AppState>, active: ActiveSession) -> StatusCode {
    state.sessions.close(active.id).await;
    tracing::info!(session_id = %active.id, "Dashboard session closed");
    StatusCode::NO_CONTENT
}
