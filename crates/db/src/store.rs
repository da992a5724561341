//! PostgreSQL implementation of the dashboard storage seams.
//!
//! Driver errors never reach the session: writes surface a [`StorageFault`]
//! and reads log the failure and return an empty list. Rows that cannot be
//! decoded into domain records are logged and skipped.

use async_trait::async_trait;
use impacto_core::approval::{ApprovalStatus, StudentApproval};
use impacto_core::project::Project;
use impacto_core::store::{ApprovalStore, ProjectStore, StorageFault};
use impacto_core::types::RecordId;

use crate::models::project::CreateProject;
use crate::repositories::{ApprovalRepo, ProjectRepo};
use crate::DbPool;

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

fn fault(operation: &str, err: sqlx::Error) -> StorageFault {
    tracing::error!(error = %err, operation, "Storage write failed");
    StorageFault::new(format!("{operation}: {err}"))
}

/// Decode rows, dropping the ones that do not map onto a domain record.
fn decode_rows<R, T>(rows: Vec<R>, table: &str) -> Vec<T>
where
    T: TryFrom<R, Error = String>,
{
    rows.into_iter()
        .filter_map(|row| match T::try_from(row) {
            Ok(record) => Some(record),
            Err(reason) => {
                tracing::warn!(table, %reason, "Skipping undecodable row");
                None
            }
        })
        .collect()
}

#[async_trait]
impl ProjectStore for PgStore {
    async fn insert_project(&self, project: &Project) -> Result<(), StorageFault> {
        let input = CreateProject::try_from(project).map_err(|e| {
            tracing::error!(error = %e, project_id = %project.id, "Could not encode report");
            StorageFault::new(format!("encode report: {e}"))
        })?;
        ProjectRepo::create(&self.pool, &input)
            .await
            .map_err(|e| fault("insert report", e))?;
        tracing::info!(project_id = %project.id, title = %project.title, "Report stored");
        Ok(())
    }

    async fn list_projects(&self) -> Vec<Project> {
        match ProjectRepo::list(&self.pool).await {
            Ok(rows) => decode_rows(rows, "projects"),
            Err(e) => {
                tracing::error!(error = %e, "Failed to list reports");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl ApprovalStore for PgStore {
    async fn insert_approval(&self, approval: &StudentApproval) -> Result<(), StorageFault> {
        ApprovalRepo::create(&self.pool, approval)
            .await
            .map_err(|e| fault("insert registration request", e))?;
        tracing::info!(approval_id = %approval.id, "Registration request stored");
        Ok(())
    }

    async fn list_approvals(&self) -> Vec<StudentApproval> {
        match ApprovalRepo::list(&self.pool).await {
            Ok(rows) => decode_rows(rows, "approvals"),
            Err(e) => {
                tracing::error!(error = %e, "Failed to list registration requests");
                Vec::new()
            }
        }
    }

    async fn update_approval_status(
        &self,
        id: RecordId,
        status: ApprovalStatus,
    ) -> Result<(), StorageFault> {
        let touched = ApprovalRepo::update_status(&self.pool, id, status.as_str())
            .await
            .map_err(|e| fault("update registration status", e))?;
        if touched == 0 {
            tracing::warn!(approval_id = %id, "Status update matched no registration request");
        } else {
            tracing::info!(approval_id = %id, status = status.as_str(), "Registration status updated");
        }
        Ok(())
    }
}
