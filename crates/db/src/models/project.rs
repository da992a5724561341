//! Report rows.

use impacto_core::catalog::{DocumentType, Scope};
use impacto_core::project::Project;
use impacto_core::types::{RecordId, Timestamp};
use sqlx::FromRow;

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectRow {
    pub id: RecordId,
    pub document_type: String,
    pub document_number: String,
    pub institutional_email: String,
    pub title: String,
    pub objectives: String,
    pub specific_objectives: String,
    pub problem_statement: String,
    pub justification: String,
    pub demographic_description: String,
    pub scope: String,
    pub has_ally: i16,
    pub ally_name: String,
    pub start_date: String,
    pub end_date: String,
    pub population: i64,
    pub students: i64,
    pub teachers: i64,
    pub student_hours: i64,
    pub teacher_hours: i64,
    /// JSON array of goal labels.
    pub ods: String,
    pub intervention_type: String,
    pub institutional_budget: i64,
    pub ally_budget: i64,
    pub satisfaction_level: i16,
    pub requires_maintenance: i16,
    pub file_name: String,
    pub date: Timestamp,
}

/// Insert payload for a finalized report, already in column encoding.
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub id: RecordId,
    pub document_type: &'static str,
    pub document_number: String,
    pub institutional_email: String,
    pub title: String,
    pub objectives: String,
    pub specific_objectives: String,
    pub problem_statement: String,
    pub justification: String,
    pub demographic_description: String,
    pub scope: &'static str,
    pub has_ally: i16,
    pub ally_name: String,
    pub start_date: String,
    pub end_date: String,
    pub population: i64,
    pub students: i64,
    pub teachers: i64,
    pub student_hours: i64,
    pub teacher_hours: i64,
    pub ods: String,
    pub intervention_type: String,
    pub institutional_budget: i64,
    pub ally_budget: i64,
    pub satisfaction_level: i16,
    pub requires_maintenance: i16,
    pub file_name: String,
    pub date: Timestamp,
}

fn flag(value: bool) -> i16 {
    i16::from(value)
}

impl TryFrom<&Project> for CreateProject {
    type Error = serde_json::Error;

    fn try_from(p: &Project) -> Result<Self, Self::Error> {
        Ok(Self {
            id: p.id,
            document_type: p.document_type.as_str(),
            document_number: p.document_number.clone(),
            institutional_email: p.institutional_email.clone(),
            title: p.title.clone(),
            objectives: p.objectives.clone(),
            specific_objectives: p.specific_objectives.clone(),
            problem_statement: p.problem_statement.clone(),
            justification: p.justification.clone(),
            demographic_description: p.demographic_description.clone(),
            scope: p.scope.as_str(),
            has_ally: flag(p.has_ally),
            ally_name: p.ally_name.clone(),
            start_date: p.start_date.clone(),
            end_date: p.end_date.clone(),
            population: p.population,
            students: p.students,
            teachers: p.teachers,
            student_hours: p.student_hours,
            teacher_hours: p.teacher_hours,
            ods: serde_json::to_string(&p.ods)?,
            intervention_type: p.intervention_type.clone(),
            institutional_budget: p.institutional_budget,
            ally_budget: p.ally_budget,
            satisfaction_level: i16::from(p.satisfaction_level),
            requires_maintenance: flag(p.requires_maintenance),
            file_name: p.file_name.clone(),
            date: p.date,
        })
    }
}

impl TryFrom<ProjectRow> for Project {
    type Error = String;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        let ods: Vec<String> = serde_json::from_str(&row.ods)
            .map_err(|e| format!("project {}: malformed ods column: {e}", row.id))?;
        let satisfaction_level = u8::try_from(row.satisfaction_level)
            .ok()
            .filter(|level| *level <= 5)
            .ok_or_else(|| {
                format!(
                    "project {}: satisfaction level {} out of range",
                    row.id, row.satisfaction_level
                )
            })?;

        Ok(Self {
            id: row.id,
            document_type: DocumentType::from_str_value(&row.document_type)?,
            document_number: row.document_number,
            institutional_email: row.institutional_email,
            title: row.title,
            objectives: row.objectives,
            specific_objectives: row.specific_objectives,
            problem_statement: row.problem_statement,
            justification: row.justification,
            demographic_description: row.demographic_description,
            scope: Scope::from_str_value(&row.scope)?,
            has_ally: row.has_ally != 0,
            ally_name: row.ally_name,
            start_date: row.start_date,
            end_date: row.end_date,
            population: row.population,
            students: row.students,
            teachers: row.teachers,
            student_hours: row.student_hours,
            teacher_hours: row.teacher_hours,
            ods,
            intervention_type: row.intervention_type,
            institutional_budget: row.institutional_budget,
            ally_budget: row.ally_budget,
            satisfaction_level,
            requires_maintenance: row.requires_maintenance != 0,
            file_name: row.file_name,
            date: row.date,
        })
    }
}
