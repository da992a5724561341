//! Handlers for the registration approval workflow.
//!
//! The session keeps its own copy of the request list, loaded on first use.
//! Searches filter that copy; decisions are written through the gateway and
//! only then reflected in it.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use impacto_core::approval::{ApprovalStatus, Decision, StudentApproval};
use impacto_core::types::RecordId;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::session::ActiveSession;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub search: String,
}

/// Request body for `POST /approvals`.
#[derive(Debug, Deserialize)]
pub struct CreateApprovalRequest {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct DecisionResponse {
    pub id: RecordId,
    pub status: ApprovalStatus,
    /// The updated request, or `null` when the id is not in the session copy.
    pub approval: Option<StudentApproval>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/approvals?search=
pub async fn list_approvals(
    State(state): State<AppState>,
    active: ActiveSession,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<StudentApproval>>>> {
    let mut session = active.session.lock().await;
    let board = session.approvals(&*state.store).await?;
    let items = board.search(&params.search).into_iter().cloned().collect();
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/approvals
///
/// Register a new pending request.
pub async fn create_approval(
    State(state): State<AppState>,
    active: ActiveSession,
    Json(input): Json<CreateApprovalRequest>,
) -> AppResult<impl IntoResponse> {
    let mut session = active.session.lock().await;
    let created = session
        .register_approval(&*state.store, &input.name, &input.code)
        .await?;

    tracing::info!(approval_id = %created.id, code = %created.code, "Registration request created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// POST /api/v1/approvals/{id}/approve
pub async fn approve(
    state: State<AppState>,
    active: ActiveSession,
    id: Path<RecordId>,
) -> AppResult<Json<DataResponse<DecisionResponse>>> {
    decide(state, active, id, Decision::Approved).await
}

/// POST /api/v1/approvals/{id}/reject
pub async fn reject(
    state: State<AppState>,
    active: ActiveSession,
    id: Path<RecordId>,
) -> AppResult<Json<DataResponse<DecisionResponse>>> {
    decide(state, active, id, Decision::Rejected).await
}

async fn decide(
    State(state): State<AppState>,
    active: ActiveSession,
    Path(id): Path<RecordId>,
    decision: Decision,
) -> AppResult<Json<DataResponse<DecisionResponse>>> {
    let mut session = active.session.lock().await;
    let approval = session.decide_approval(&*state.store, id, decision).await?;

    tracing::info!(
        session_id = %active.id,
        approval_id = %id,
        status = decision.status().as_str(),
        "Registration request decided"
    );

    Ok(Json(DataResponse {
        data: DecisionResponse {
            id,
            status: decision.status(),
            approval,
        },
    }))
}
