//! Registration request rows.

use impacto_core::approval::{ApprovalStatus, StudentApproval};
use impacto_core::types::{RecordId, Timestamp};
use sqlx::FromRow;

/// A row from the `approvals` table.
#[derive(Debug, Clone, FromRow)]
pub struct ApprovalRow {
    pub id: RecordId,
    pub name: String,
    pub code: String,
    pub registration_date: Timestamp,
    pub status: String,
}

impl TryFrom<ApprovalRow> for StudentApproval {
    type Error = String;

    fn try_from(row: ApprovalRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            name: row.name,
            code: row.code,
            registration_date: row.registration_date,
            status: ApprovalStatus::from_str_value(&row.status)?,
        })
    }
}
