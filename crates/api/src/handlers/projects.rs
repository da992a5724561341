//! Handlers for the `/projects` resource: the session's report collection.

use axum::Json;
use impacto_core::analytics::HistoryRow;
use impacto_core::project::Project;
use impacto_core::roles::View;

use crate::error::AppResult;
use crate::middleware::session::ActiveSession;
use crate::response::DataResponse;

/// GET /api/v1/projects
///
/// The collection as loaded at login plus this session's submissions, newest
/// first.
pub async fn list_projects(active: ActiveSession) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let session = active.session.lock().await;
    session.require(View::Form)?;
    Ok(Json(DataResponse {
        data: session.projects().to_vec(),
    }))
}

/// GET /api/v1/projects/history
pub async fn list_history(active: ActiveSession) -> AppResult<Json<DataResponse<Vec<HistoryRow>>>> {
    let session = active.session.lock().await;
    Ok(Json(DataResponse {
        data: session.history()?,
    }))
}
