//! Route definitions for the `/form` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::form;
use crate::state::AppState;

/// Routes mounted at `/form`.
///
/// ```text
/// GET, PATCH     /              -> get_form, patch_form
/// PUT            /section       -> select_section
/// POST           /next          -> next_section
/// POST           /prev          -> prev_section
/// POST           /goals/toggle  -> toggle_goal
/// PUT, DELETE    /attachment    -> set_attachment, clear_attachment
/// PUT            /currency      -> set_currency
/// POST           /submit        -> submit
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(form::get_form).patch(form::patch_form))
        .route("/section", put(form::select_section))
        .route("/next", post(form::next_section))
        .route("/prev", post(form::prev_section))
        .route("/goals/toggle", post(form::toggle_goal))
        .route(
            "/attachment",
            put(form::set_attachment).delete(form::clear_attachment),
        )
        .route("/currency", put(form::set_currency))
        .route("/submit", post(form::submit))
}
