//! Repository for the `projects` table.

use sqlx::PgPool;

use crate::models::project::{CreateProject, ProjectRow};

/// Column list for projects queries.
const COLUMNS: &str = "id, document_type, document_number, institutional_email, title, \
    objectives, specific_objectives, problem_statement, justification, \
    demographic_description, scope, has_ally, ally_name, start_date, end_date, \
    population, students, teachers, student_hours, teacher_hours, ods, intervention_type, \
    institutional_budget, ally_budget, satisfaction_level, requires_maintenance, \
    file_name, date";

/// Insert and read operations for submitted reports. Reports are never
/// updated or deleted.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a report, returning the stored row.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<ProjectRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects ({COLUMNS})
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                     $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27, $28)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectRow>(&query)
            .bind(input.id)
            .bind(input.document_type)
            .bind(&input.document_number)
            .bind(&input.institutional_email)
            .bind(&input.title)
            .bind(&input.objectives)
            .bind(&input.specific_objectives)
            .bind(&input.problem_statement)
            .bind(&input.justification)
            .bind(&input.demographic_description)
            .bind(input.scope)
            .bind(input.has_ally)
            .bind(&input.ally_name)
            .bind(&input.start_date)
            .bind(&input.end_date)
            .bind(input.population)
            .bind(input.students)
            .bind(input.teachers)
            .bind(input.student_hours)
            .bind(input.teacher_hours)
            .bind(&input.ods)
            .bind(&input.intervention_type)
            .bind(input.institutional_budget)
            .bind(input.ally_budget)
            .bind(input.satisfaction_level)
            .bind(input.requires_maintenance)
            .bind(&input.file_name)
            .bind(input.date)
            .fetch_one(pool)
            .await
    }

    /// List every report, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<ProjectRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY date DESC, id DESC");
        sqlx::query_as::<_, ProjectRow>(&query)
            .fetch_all(pool)
            .await
    }
}
