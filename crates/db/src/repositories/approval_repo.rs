//! Repository for the `approvals` table.

use impacto_core::approval::StudentApproval;
use impacto_core::types::RecordId;
use sqlx::PgPool;

use crate::models::approval::ApprovalRow;

/// Column list for approvals queries.
const COLUMNS: &str = "id, name, code, registration_date, status";

/// Provides CRUD operations for registration requests.
pub struct ApprovalRepo;

impl ApprovalRepo {
    /// Insert a new request, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &StudentApproval,
    ) -> Result<ApprovalRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO approvals (id, name, code, registration_date, status)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ApprovalRow>(&query)
            .bind(input.id)
            .bind(&input.name)
            .bind(&input.code)
            .bind(input.registration_date)
            .bind(input.status.as_str())
            .fetch_one(pool)
            .await
    }

    /// List all requests, most recent registration first.
    pub async fn list(pool: &PgPool) -> Result<Vec<ApprovalRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM approvals ORDER BY registration_date DESC, id DESC"
        );
        sqlx::query_as::<_, ApprovalRow>(&query)
            .fetch_all(pool)
            .await
    }

    /// Set the status of a request. Returns the number of rows touched, which
    /// is zero for an unknown id.
    pub async fn update_status(
        pool: &PgPool,
        id: RecordId,
        status: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE approvals SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
