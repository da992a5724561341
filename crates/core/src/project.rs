//! The submitted social work report.

use serde::{Deserialize, Serialize};

use crate::catalog::{DocumentType, Scope};
use crate::types::{RecordId, Timestamp};

/// File name recorded when a report is submitted without an attachment.
pub const NO_ATTACHMENT_LABEL: &str = "Sin archivo";

/// One finalized report. Built only by [`crate::form::ReportForm::submit`]
/// and never edited afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: RecordId,

    // Responsible student
    pub document_type: DocumentType,
    pub document_number: String,
    pub institutional_email: String,

    // General information
    pub title: String,
    pub objectives: String,
    pub specific_objectives: String,
    pub problem_statement: String,
    pub justification: String,
    pub demographic_description: String,
    pub scope: Scope,
    pub has_ally: bool,
    /// Always empty when `has_ally` is false.
    pub ally_name: String,
    pub start_date: String,
    pub end_date: String,

    // Effort and impact
    pub population: i64,
    pub students: i64,
    pub teachers: i64,
    pub student_hours: i64,
    pub teacher_hours: i64,

    // Strategic alignment
    pub ods: Vec<String>,
    /// One of [`crate::catalog::INTERVENTION_TYPES`] or empty.
    pub intervention_type: String,

    // Resources and evaluation
    pub institutional_budget: i64,
    pub ally_budget: i64,
    /// 0 means unrated, otherwise 1..=5.
    pub satisfaction_level: u8,
    pub requires_maintenance: bool,

    pub file_name: String,
    pub date: Timestamp,
}

impl Project {
    /// Combined institutional and ally budget, saturating at `i64::MAX`.
    pub fn total_budget(&self) -> i64 {
        self.institutional_budget.saturating_add(self.ally_budget)
    }

    pub fn aligns_with(&self, goal: &str) -> bool {
        self.ods.iter().any(|g| g == goal)
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::project;
    use crate::catalog::Scope;

    #[test]
    fn test_total_budget_saturates() {
        let mut p = project("A", Scope::Nacional);
        p.institutional_budget = 1_500_000;
        p.ally_budget = 500_000;
        assert_eq!(p.total_budget(), 2_000_000);

        p.institutional_budget = 9_000_000_000_000_000_000;
        p.ally_budget = 9_000_000_000_000_000_000;
        assert_eq!(p.total_budget(), i64::MAX);
    }
}
