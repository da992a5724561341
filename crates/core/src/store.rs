//! Storage seams used by the dashboard session.
//!
//! Writes report a [`StorageFault`] instead of propagating the driver error;
//! reads never fail and yield an empty collection when storage is
//! unavailable. Implemented for PostgreSQL by `impacto_db::PgStore`.

use async_trait::async_trait;

use crate::approval::{ApprovalStatus, StudentApproval};
use crate::project::Project;
use crate::types::RecordId;

/// A write that did not reach durable storage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Storage fault: {0}")]
pub struct StorageFault(pub String);

impl StorageFault {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Persist one finalized report.
    async fn insert_project(&self, project: &Project) -> Result<(), StorageFault>;

    /// Every stored report, newest first. Empty when storage is unavailable.
    async fn list_projects(&self) -> Vec<Project>;
}

#[async_trait]
pub trait ApprovalStore: Send + Sync {
    async fn insert_approval(&self, approval: &StudentApproval) -> Result<(), StorageFault>;

    /// Every registration request, most recent registration first. Empty when
    /// storage is unavailable.
    async fn list_approvals(&self) -> Vec<StudentApproval>;

    /// Set the status of one request. Last write wins; an unknown id is not
    /// an error.
    async fn update_approval_status(
        &self,
        id: RecordId,
        status: ApprovalStatus,
    ) -> Result<(), StorageFault>;
}

#[cfg(test)]
pub(crate) mod memory {
    //! In-memory stores for session and workflow tests.

    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct MemoryStore {
        pub projects: Mutex<Vec<Project>>,
        pub approvals: Mutex<Vec<StudentApproval>>,
        pub status_updates: Mutex<Vec<(RecordId, ApprovalStatus)>>,
        pub fail_writes: bool,
    }

    impl MemoryStore {
        pub fn failing() -> Self {
            Self {
                fail_writes: true,
                ..Default::default()
            }
        }

        pub fn with_approvals(approvals: Vec<StudentApproval>) -> Self {
            Self {
                approvals: Mutex::new(approvals),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl ProjectStore for MemoryStore {
        async fn insert_project(&self, project: &Project) -> Result<(), StorageFault> {
            if self.fail_writes {
                return Err(StorageFault::new("connection refused"));
            }
            self.projects.lock().unwrap().insert(0, project.clone());
            Ok(())
        }

        async fn list_projects(&self) -> Vec<Project> {
            self.projects.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ApprovalStore for MemoryStore {
        async fn insert_approval(&self, approval: &StudentApproval) -> Result<(), StorageFault> {
            if self.fail_writes {
                return Err(StorageFault::new("connection refused"));
            }
            self.approvals.lock().unwrap().insert(0, approval.clone());
            Ok(())
        }

        async fn list_approvals(&self) -> Vec<StudentApproval> {
            self.approvals.lock().unwrap().clone()
        }

        async fn update_approval_status(
            &self,
            id: RecordId,
            status: ApprovalStatus,
        ) -> Result<(), StorageFault> {
            self.status_updates.lock().unwrap().push((id, status));
            if self.fail_writes {
                return Err(StorageFault::new("connection refused"));
            }
            if let Some(row) = self.approvals.lock().unwrap().iter_mut().find(|a| a.id == id) {
                row.status = status;
            }
            Ok(())
        }
    }
}
