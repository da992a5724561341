//! Dashboard session extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use impacto_core::error::CoreError;
use uuid::Uuid;

use crate::error::AppError;
use crate::sessions::{SharedSession, SESSION_HEADER};
use crate::state::AppState;

/// The open session named by the `x-dashboard-session` header.
///
/// ```ignore
/// async fn my_handler(active: ActiveSession) -> AppResult<Json<()>> {
///     let session = active.session.lock().await;
///     tracing::info!(session_id = %active.id, role = session.role().as_str(), "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Clone)]
pub struct ActiveSession {
    pub id: Uuid,
    pub session: SharedSession,
}

impl FromRequestParts<AppState> for ActiveSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(format!(
                    "Missing {SESSION_HEADER} header"
                )))
            })?;

        let id = Uuid::parse_str(raw.trim()).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Malformed session key".into()))
        })?;

        let session = state.sessions.get(id).await.ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Unknown or expired session. Please log in again".into(),
            ))
        })?;

        Ok(ActiveSession { id, session })
    }
}
