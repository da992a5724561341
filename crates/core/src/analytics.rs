//! Dashboard aggregates derived from the report collection.
//!
//! Everything here is a pure function of a `&[Project]` slice and is cheap
//! enough to recompute on every request. The collection is expected newest
//! first, which is the order the store returns and the session keeps.

use serde::{Serialize, Serializer};

use crate::catalog::{Scope, INTERVENTION_TYPES, ODS_OPTIONS, ODS_SHORT_LABELS};
use crate::project::Project;
use crate::types::{RecordId, Timestamp};

/// How many reports feed the per-project charts.
pub const RECENT_WINDOW: usize = 6;

/// Character budgets for chart labels.
pub const BENEFICIARIES_LABEL_CHARS: usize = 18;
pub const STAFFING_LABEL_CHARS: usize = 15;
pub const INTERVENTION_LABEL_CHARS: usize = 16;

/// Placeholder shown for missing values and an undefined social ROI.
pub const NOT_APPLICABLE: &str = "N/A";

/// Currency units per social ROI denominator step (one million COP).
const ROI_BUDGET_UNIT: f64 = 1_000_000.0;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub projects: usize,
    pub population: i64,
    pub students: i64,
    pub teachers: i64,
    pub student_hours: i64,
    pub teacher_hours: i64,
    pub institutional_budget: i64,
    pub ally_budget: i64,
    pub total_budget: i64,
    pub total_hours: i64,
}

/// Beneficiaries per million COP invested.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SocialRoi {
    /// No budget was recorded, so the ratio is undefined.
    NotApplicable,
    /// Rounded to one decimal.
    Ratio(f64),
}

impl Serialize for SocialRoi {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::NotApplicable => serializer.serialize_str(NOT_APPLICABLE),
            Self::Ratio(value) => serializer.serialize_f64(*value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopeSlice {
    pub name: &'static str,
    pub value: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BeneficiariesPoint {
    pub name: String,
    pub students: i64,
    pub population: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaffingPoint {
    pub name: String,
    pub teachers: i64,
    pub students: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoalAlignment {
    pub goal: &'static str,
    /// Short radar axis label.
    pub subject: &'static str,
    pub count: usize,
    /// Radar scale maximum, never below 1.
    pub full_mark: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterventionCount {
    pub name: String,
    pub intervention_type: &'static str,
    pub projects: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardAnalytics {
    pub totals: Totals,
    pub social_roi: SocialRoi,
    pub scope_distribution: Vec<ScopeSlice>,
    pub beneficiaries: Vec<BeneficiariesPoint>,
    pub staffing: Vec<StaffingPoint>,
    pub goal_alignment: Vec<GoalAlignment>,
    pub interventions: Vec<InterventionCount>,
}

/// One line of the report history table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryRow {
    pub id: RecordId,
    pub title: String,
    pub scope: Scope,
    pub intervention: String,
    pub ally: String,
    pub population: i64,
    pub institutional_email: String,
    pub file_name: String,
    pub date: Timestamp,
}

// ---------------------------------------------------------------------------
// Computation
// ---------------------------------------------------------------------------

/// Compute every dashboard aggregate.
pub fn compute(projects: &[Project]) -> DashboardAnalytics {
    let totals = totals(projects);
    DashboardAnalytics {
        social_roi: social_roi(totals.population, totals.total_budget),
        scope_distribution: scope_distribution(projects),
        beneficiaries: beneficiaries_series(projects),
        staffing: staffing_series(projects),
        goal_alignment: goal_alignment(projects),
        interventions: intervention_counts(projects),
        totals,
    }
}

pub fn totals(projects: &[Project]) -> Totals {
    // Sums saturate at `i64::MAX`; the form accepts any value that fits.
    let mut t = projects.iter().fold(Totals::default(), |mut t, p| {
        t.population = t.population.saturating_add(p.population);
        t.students = t.students.saturating_add(p.students);
        t.teachers = t.teachers.saturating_add(p.teachers);
        t.student_hours = t.student_hours.saturating_add(p.student_hours);
        t.teacher_hours = t.teacher_hours.saturating_add(p.teacher_hours);
        t.institutional_budget = t.institutional_budget.saturating_add(p.institutional_budget);
        t.ally_budget = t.ally_budget.saturating_add(p.ally_budget);
        t
    });
    t.projects = projects.len();
    t.total_budget = t.institutional_budget.saturating_add(t.ally_budget);
    t.total_hours = t.student_hours.saturating_add(t.teacher_hours);
    t
}

/// `population / (budget / 1_000_000)`, one decimal. Undefined at zero budget.
pub fn social_roi(population: i64, total_budget: i64) -> SocialRoi {
    if total_budget <= 0 {
        return SocialRoi::NotApplicable;
    }
    let ratio = population as f64 / (total_budget as f64 / ROI_BUDGET_UNIT);
    SocialRoi::Ratio((ratio * 10.0).round() / 10.0)
}

/// National and international counts. Records with any other scope would
/// fall in neither bucket.
pub fn scope_distribution(projects: &[Project]) -> Vec<ScopeSlice> {
    Scope::ALL
        .iter()
        .map(|scope| ScopeSlice {
            name: scope.as_str(),
            value: projects.iter().filter(|p| p.scope == *scope).count(),
        })
        .collect()
}

/// The most recent reports, in collection order.
pub fn recent_window(projects: &[Project]) -> &[Project] {
    &projects[..projects.len().min(RECENT_WINDOW)]
}

pub fn beneficiaries_series(projects: &[Project]) -> Vec<BeneficiariesPoint> {
    recent_window(projects)
        .iter()
        .map(|p| BeneficiariesPoint {
            name: truncate_label(&p.title, BENEFICIARIES_LABEL_CHARS),
            students: p.students,
            population: p.population,
        })
        .collect()
}

pub fn staffing_series(projects: &[Project]) -> Vec<StaffingPoint> {
    recent_window(projects)
        .iter()
        .map(|p| StaffingPoint {
            name: truncate_label(&p.title, STAFFING_LABEL_CHARS),
            teachers: p.teachers,
            students: p.students,
        })
        .collect()
}

/// Per-goal count of reports whose goal list contains that goal.
pub fn goal_alignment(projects: &[Project]) -> Vec<GoalAlignment> {
    let full_mark = projects.len().max(1);
    ODS_OPTIONS
        .iter()
        .zip(ODS_SHORT_LABELS.iter())
        .map(|(&goal, &subject)| GoalAlignment {
            goal,
            subject,
            count: projects.iter().filter(|p| p.aligns_with(goal)).count(),
            full_mark,
        })
        .collect()
}

/// Per-type count of reports whose intervention type is exactly that type.
pub fn intervention_counts(projects: &[Project]) -> Vec<InterventionCount> {
    INTERVENTION_TYPES
        .iter()
        .map(|&kind| InterventionCount {
            name: truncate_label(kind, INTERVENTION_LABEL_CHARS),
            intervention_type: kind,
            projects: projects
                .iter()
                .filter(|p| p.intervention_type == kind)
                .count(),
        })
        .collect()
}

pub fn history(projects: &[Project]) -> Vec<HistoryRow> {
    projects
        .iter()
        .map(|p| HistoryRow {
            id: p.id,
            title: p.title.clone(),
            scope: p.scope,
            intervention: non_empty_or_na(&p.intervention_type),
            ally: if p.has_ally {
                non_empty_or_na(&p.ally_name)
            } else {
                NOT_APPLICABLE.to_string()
            },
            population: p.population,
            institutional_email: p.institutional_email.clone(),
            file_name: p.file_name.clone(),
            date: p.date,
        })
        .collect()
}

/// Cut `label` to `max_chars` characters, appending `...` when it was longer.
pub fn truncate_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() > max_chars {
        let head: String = label.chars().take(max_chars).collect();
        format!("{head}...")
    } else {
        label.to_string()
    }
}

fn non_empty_or_na(value: &str) -> String {
    if value.is_empty() {
        NOT_APPLICABLE.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::fixtures::project;

    const ODS_6: &str = "ODS 6: Agua Limpia y Saneamiento";

    #[test]
    fn test_empty_collection() {
        let a = compute(&[]);
        assert_eq!(a.totals, Totals::default());
        assert_eq!(a.social_roi, SocialRoi::NotApplicable);
        assert!(a.beneficiaries.is_empty());
        assert!(a.goal_alignment.iter().all(|g| g.count == 0 && g.full_mark == 1));
        assert_eq!(a.scope_distribution[0].value, 0);
        assert_eq!(a.scope_distribution[1].value, 0);
    }

    #[test]
    fn test_totals_sum_every_metric() {
        let mut a = project("A", Scope::Nacional);
        a.population = 100;
        a.students = 4;
        a.teachers = 1;
        a.student_hours = 40;
        a.teacher_hours = 8;
        a.institutional_budget = 1_000_000;
        let mut b = project("B", Scope::Internacional);
        b.population = 50;
        b.students = 2;
        b.ally_budget = 500_000;

        let t = totals(&[a, b]);
        assert_eq!(t.projects, 2);
        assert_eq!(t.population, 150);
        assert_eq!(t.students, 6);
        assert_eq!(t.teachers, 1);
        assert_eq!(t.total_hours, 48);
        assert_eq!(t.total_budget, 1_500_000);
    }

    #[test]
    fn test_totals_saturate_on_huge_values() {
        let mut a = project("A", Scope::Nacional);
        a.population = 1_000;
        a.student_hours = i64::MAX;
        a.teacher_hours = 10;
        a.institutional_budget = 9_000_000_000_000_000_000;
        a.ally_budget = 9_000_000_000_000_000_000;
        let mut b = project("B", Scope::Nacional);
        b.population = i64::MAX;
        b.institutional_budget = 9_000_000_000_000_000_000;

        let t = totals(&[a.clone(), b]);
        assert_eq!(t.population, i64::MAX);
        assert_eq!(t.institutional_budget, i64::MAX);
        assert_eq!(t.total_budget, i64::MAX);
        assert_eq!(t.total_hours, i64::MAX);

        let single = compute(&[a]);
        assert_eq!(single.totals.total_budget, i64::MAX);
        match single.social_roi {
            SocialRoi::Ratio(value) => assert!(value >= 0.0),
            SocialRoi::NotApplicable => panic!("positive budget must yield a ratio"),
        }
    }

    #[test]
    fn test_submitted_report_with_max_budgets_aggregates() {
        use crate::catalog::DocumentType;
        use crate::form::{CurrencyField, MetricField, ReportForm, TextField};

        let mut form = ReportForm::new();
        form.set_document_type(DocumentType::NationalId);
        form.set_text(TextField::DocumentNumber, "1023456789");
        form.set_text(TextField::InstitutionalEmail, "ana@unimecatronica.edu.co");
        form.set_text(TextField::Title, "Presupuesto extremo");
        form.set_scope(Scope::Nacional);
        form.set_metric(MetricField::Population, "99999999999999999999");
        form.set_currency_field(CurrencyField::InstitutionalBudget, "9000000000000000000");
        form.set_currency_field(CurrencyField::AllyBudget, "9000000000000000000");
        let report = form.submit().unwrap();

        let a = compute(&[report]);
        assert_eq!(a.totals.population, i64::MAX);
        assert_eq!(a.totals.total_budget, i64::MAX);
        assert_matches::assert_matches!(a.social_roi, SocialRoi::Ratio(_));
    }

    #[test]
    fn test_social_roi() {
        assert_eq!(social_roi(500, 0), SocialRoi::NotApplicable);
        assert_eq!(social_roi(0, 0), SocialRoi::NotApplicable);
        assert_eq!(social_roi(500, 2_000_000), SocialRoi::Ratio(250.0));
        assert_eq!(social_roi(100, 3_000_000), SocialRoi::Ratio(33.3));
        assert_eq!(social_roi(0, 1_000_000), SocialRoi::Ratio(0.0));
    }

    #[test]
    fn test_social_roi_serialization() {
        assert_eq!(serde_json::to_value(SocialRoi::NotApplicable).unwrap(), "N/A");
        assert_eq!(serde_json::to_value(SocialRoi::Ratio(250.0)).unwrap(), 250.0);
    }

    #[test]
    fn test_scope_distribution_counts() {
        let projects = vec![
            project("A", Scope::Nacional),
            project("B", Scope::Nacional),
            project("C", Scope::Internacional),
        ];
        let dist = scope_distribution(&projects);
        assert_eq!(dist[0], ScopeSlice { name: "Nacional", value: 2 });
        assert_eq!(dist[1], ScopeSlice { name: "Internacional", value: 1 });
    }

    #[test]
    fn test_recent_window_keeps_first_six_in_order() {
        let projects: Vec<_> = (0..8)
            .map(|i| project(&format!("P{i}"), Scope::Nacional))
            .collect();
        let series = beneficiaries_series(&projects);
        let names: Vec<_> = series.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["P0", "P1", "P2", "P3", "P4", "P5"]);
    }

    #[test]
    fn test_chart_labels_are_truncated() {
        let projects = vec![project("Fortalecimiento de huertas comunitarias", Scope::Nacional)];
        assert_eq!(beneficiaries_series(&projects)[0].name, "Fortalecimiento de...");
        assert_eq!(staffing_series(&projects)[0].name, "Fortalecimiento...");
    }

    #[test]
    fn test_truncate_label_counts_chars() {
        assert_eq!(truncate_label("corto", 18), "corto");
        assert_eq!(truncate_label("exactamente quince", 18), "exactamente quince");
        assert_eq!(truncate_label("Acompañamiento comunitario", 16), "Acompañamiento c...");
    }

    #[test]
    fn test_goal_alignment_bounds() {
        let mut a = project("A", Scope::Nacional);
        a.ods = vec![ODS_6.into(), ODS_OPTIONS[0].into()];
        let mut b = project("B", Scope::Nacional);
        b.ods = vec![ODS_6.into()];
        let c = project("C", Scope::Internacional);
        let projects = vec![a, b, c];

        let alignment = goal_alignment(&projects);
        let pairs: usize = projects.iter().map(|p| p.ods.len()).sum();
        let total: usize = alignment.iter().map(|g| g.count).sum();
        assert!(total >= pairs);
        assert!(alignment.iter().all(|g| g.count <= projects.len()));
        assert!(alignment.iter().all(|g| g.full_mark == 3));

        let agua = alignment.iter().find(|g| g.goal == ODS_6).unwrap();
        assert_eq!(agua.subject, "Agua");
        assert_eq!(agua.count, 2);
    }

    #[test]
    fn test_intervention_counts_exact_match() {
        let mut a = project("A", Scope::Nacional);
        a.intervention_type = "Capacitacion".into();
        let mut b = project("B", Scope::Nacional);
        b.intervention_type = "capacitacion".into();
        let counts = intervention_counts(&[a, b]);
        assert_eq!(counts.len(), 6);
        let cap = counts
            .iter()
            .find(|c| c.intervention_type == "Capacitacion")
            .unwrap();
        assert_eq!(cap.projects, 1);
        assert_eq!(counts.iter().map(|c| c.projects).sum::<usize>(), 1);
    }

    #[test]
    fn test_history_rows_fill_placeholders() {
        let mut a = project("A", Scope::Nacional);
        a.has_ally = true;
        a.ally_name = "Fundacion Rio".into();
        a.intervention_type = "Capacitacion".into();
        let b = project("B", Scope::Internacional);

        let rows = history(&[a, b]);
        assert_eq!(rows[0].ally, "Fundacion Rio");
        assert_eq!(rows[0].intervention, "Capacitacion");
        assert_eq!(rows[1].ally, NOT_APPLICABLE);
        assert_eq!(rows[1].intervention, NOT_APPLICABLE);
    }
}
