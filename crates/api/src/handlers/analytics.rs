use axum::Json;
use impacto_core::analytics::DashboardAnalytics;

use crate::error::AppResult;
use crate::middleware::session::ActiveSession;
use crate::response::DataResponse;

/// GET /api/v1/analytics
///
/// Every dashboard aggregate, computed from the session collection.
pub async fn get_analytics(
    active: ActiveSession,
) -> AppResult<Json<DataResponse<DashboardAnalytics>>> {
    let session = active.session.lock().await;
    Ok(Json(DataResponse {
        data: session.analytics()?,
    }))
}
