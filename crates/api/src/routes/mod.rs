pub mod approvals;
pub mod auth;
pub mod form;
pub mod health;

use axum::routing::{get, put};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Everything except `/auth/login` and `/catalogs` needs an
/// `x-dashboard-session` header naming an open session.
///
/// ```text
/// /auth/login                     open a session (public)
/// /auth/logout                    close the session
///
/// /session                        role, active view, allowed views
/// /session/view                   switch view (PUT)
///
/// /form                           snapshot, partial update (GET, PATCH)
/// /form/section                   jump to a section (PUT)
/// /form/next, /form/prev          step through sections (POST)
/// /form/goals/toggle              toggle a sustainability goal (POST)
/// /form/attachment                set, clear (PUT, DELETE)
/// /form/currency                  formatted amount input (PUT)
/// /form/submit                    finalize and store (POST)
///
/// /projects                       session report collection
/// /projects/history               history table (admin)
/// /analytics                      dashboard aggregates (admin)
///
/// /approvals                      list (?search=), create (admin)
/// /approvals/{id}/approve         approve (POST, admin)
/// /approvals/{id}/reject          reject (POST, admin)
///
/// /catalogs                       form option lists (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .route("/session", get(handlers::session::get_session))
        .route("/session/view", put(handlers::session::set_view))
        .nest("/form", form::router())
        .route("/projects", get(handlers::projects::list_projects))
        .route("/projects/history", get(handlers::projects::list_history))
        .route("/analytics", get(handlers::analytics::get_analytics))
        .nest("/approvals", approvals::router())
        .route("/catalogs", get(handlers::catalogs::get_catalogs))
}
