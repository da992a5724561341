//! Route definitions for the `/approvals` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::approvals;
use crate::state::AppState;

/// Routes mounted at `/approvals` (admin sessions only).
///
/// ```text
/// GET, POST  /               -> list_approvals (?search=), create_approval
/// POST       /{id}/approve   -> approve
/// POST       /{id}/reject    -> reject
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(approvals::list_approvals).post(approvals::create_approval),
        )
        .route("/{id}/approve", post(approvals::approve))
        .route("/{id}/reject", post(approvals::reject))
}
