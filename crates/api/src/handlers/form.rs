//! Handlers for the `/form` resource: the session's in-progress report.
//!
//! Every mutating endpoint answers with the updated form snapshot so the
//! client can re-render without a second request.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use impacto_core::currency::CurrencyInput;
use impacto_core::form::{Attachment, CurrencyField, FormPatch, FormSection, FormSnapshot};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::session::ActiveSession;
use crate::response::DataResponse;
use crate::state::AppState;

type SnapshotResponse = AppResult<Json<DataResponse<FormSnapshot>>>;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct SelectSectionRequest {
    pub section: FormSection,
}

#[derive(Debug, Deserialize)]
pub struct ToggleGoalRequest {
    pub goal: String,
}

/// Request body for `PUT /form/currency`: raw keyboard input for one amount.
#[derive(Debug, Deserialize)]
pub struct CurrencyRequest {
    pub field: CurrencyField,
    pub raw: String,
}

#[derive(Debug, Serialize)]
pub struct CurrencyResponse {
    pub field: CurrencyField,
    /// The value now shown in the field, with thousands separators.
    pub value: String,
    /// True when the input was too large and the previous value was kept.
    pub overflow: bool,
}

fn snapshot(form: &impacto_core::form::ReportForm) -> SnapshotResponse {
    Ok(Json(DataResponse {
        data: form.snapshot(),
    }))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/form
pub async fn get_form(active: ActiveSession) -> SnapshotResponse {
    let session = active.session.lock().await;
    snapshot(session.form())
}

/// PATCH /api/v1/form
///
/// Apply a partial update. The patch is validated as a whole before any field
/// changes.
pub async fn patch_form(active: ActiveSession, Json(patch): Json<FormPatch>) -> SnapshotResponse {
    let mut session = active.session.lock().await;
    session.form_mut().apply(patch)?;
    snapshot(session.form())
}

/// PUT /api/v1/form/section
pub async fn select_section(
    active: ActiveSession,
    Json(input): Json<SelectSectionRequest>,
) -> SnapshotResponse {
    let mut session = active.session.lock().await;
    session.form_mut().select_section(input.section);
    snapshot(session.form())
}

/// POST /api/v1/form/next
pub async fn next_section(active: ActiveSession) -> SnapshotResponse {
    let mut session = active.session.lock().await;
    session.form_mut().go_next();
    snapshot(session.form())
}

/// POST /api/v1/form/prev
pub async fn prev_section(active: ActiveSession) -> SnapshotResponse {
    let mut session = active.session.lock().await;
    session.form_mut().go_prev();
    snapshot(session.form())
}

/// POST /api/v1/form/goals/toggle
pub async fn toggle_goal(
    active: ActiveSession,
    Json(input): Json<ToggleGoalRequest>,
) -> SnapshotResponse {
    let mut session = active.session.lock().await;
    session.form_mut().toggle_goal(&input.goal)?;
    snapshot(session.form())
}

/// PUT /api/v1/form/attachment
///
/// Record the chosen file's name and size. The file content never reaches the
/// server.
pub async fn set_attachment(
    active: ActiveSession,
    Json(input): Json<Attachment>,
) -> SnapshotResponse {
    let mut session = active.session.lock().await;
    session.form_mut().attach_file(input);
    snapshot(session.form())
}

/// DELETE /api/v1/form/attachment
pub async fn clear_attachment(active: ActiveSession) -> SnapshotResponse {
    let mut session = active.session.lock().await;
    session.form_mut().clear_attachment();
    snapshot(session.form())
}

/// PUT /api/v1/form/currency
pub async fn set_currency(
    active: ActiveSession,
    Json(input): Json<CurrencyRequest>,
) -> AppResult<Json<DataResponse<CurrencyResponse>>> {
    let mut session = active.session.lock().await;
    let outcome = session.form_mut().set_currency_field(input.field, &input.raw);
    Ok(Json(DataResponse {
        data: CurrencyResponse {
            field: input.field,
            value: session.form().currency_value(input.field).to_string(),
            overflow: outcome == CurrencyInput::Overflow,
        },
    }))
}

/// POST /api/v1/form/submit
///
/// Finalize the form and store the report. Returns 201 with the stored
/// report, 400 when a required field is missing (form untouched) or 502 when
/// storage fails (form already reset, report not added to the session).
pub async fn submit(
    State(state): State<AppState>,
    active: ActiveSession,
) -> AppResult<impl IntoResponse> {
    let mut session = active.session.lock().await;
    let project = session.submit_report(&*state.store).await?.clone();

    tracing::info!(
        session_id = %active.id,
        project_id = %project.id,
        title = %project.title,
        "Report submitted"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}
