//! Report form state engine.
//!
//! [`ReportForm`] owns an in-progress submission: every field is an
//! independent slot and `active_section` points into the four ordered
//! sections. Sections are freely revisitable; the only gate is the
//! required-field check in [`ReportForm::submit`], which turns the form into
//! a finalized [`Project`] and resets it.

use serde::{Deserialize, Serialize};

use crate::catalog::{is_known_goal, validate_intervention_type, DocumentType, Scope};
use crate::currency::{normalize_currency_input, parse_count, parse_currency, CurrencyInput};
use crate::error::CoreError;
use crate::project::{Project, NO_ATTACHMENT_LABEL};
use crate::types::new_record_id;

/// Highest satisfaction rating; 0 means unrated.
pub const MAX_SATISFACTION_LEVEL: u8 = 5;

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// The four form sections, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormSection {
    #[default]
    General,
    Impact,
    Strategic,
    Resources,
}

impl FormSection {
    pub const ALL: [FormSection; 4] = [
        Self::General,
        Self::Impact,
        Self::Strategic,
        Self::Resources,
    ];

    /// Position in [`FormSection::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Self::General => 0,
            Self::Impact => 1,
            Self::Strategic => 2,
            Self::Resources => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::General => "Informacion General",
            Self::Impact => "Esfuerzo e Impacto",
            Self::Strategic => "Alineacion Estrategica",
            Self::Resources => "Recursos y Evaluacion",
        }
    }
}

// ---------------------------------------------------------------------------
// Field selectors
// ---------------------------------------------------------------------------

/// Free-text slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextField {
    DocumentNumber,
    InstitutionalEmail,
    Title,
    Objectives,
    SpecificObjectives,
    ProblemStatement,
    Justification,
    DemographicDescription,
    AllyName,
    StartDate,
    EndDate,
}

/// Impact counters, kept as typed text until submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricField {
    Population,
    Students,
    Teachers,
    StudentHours,
    TeacherHours,
}

/// Amounts shown with thousands separators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurrencyField {
    InstitutionalBudget,
    AllyBudget,
}

/// An attached report document. Only its name and size are ever looked at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    /// Size in bytes.
    pub size: u64,
}

impl Attachment {
    /// Size in kilobytes, one decimal, as displayed next to the file name.
    pub fn size_kb(&self) -> f64 {
        (self.size as f64 / 1024.0 * 10.0).round() / 10.0
    }
}

/// Partial update applied with [`ReportForm::apply`]. Absent fields are left
/// untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormPatch {
    pub document_type: Option<DocumentType>,
    pub document_number: Option<String>,
    pub institutional_email: Option<String>,
    pub title: Option<String>,
    pub objectives: Option<String>,
    pub specific_objectives: Option<String>,
    pub problem_statement: Option<String>,
    pub justification: Option<String>,
    pub demographic_description: Option<String>,
    pub scope: Option<Scope>,
    pub has_ally: Option<bool>,
    pub ally_name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub population: Option<String>,
    pub students: Option<String>,
    pub teachers: Option<String>,
    pub student_hours: Option<String>,
    pub teacher_hours: Option<String>,
    pub intervention_type: Option<String>,
    pub institutional_budget: Option<String>,
    pub ally_budget: Option<String>,
    pub satisfaction_level: Option<u8>,
    pub requires_maintenance: Option<bool>,
}

// ---------------------------------------------------------------------------
// Form state
// ---------------------------------------------------------------------------

/// In-progress report. `Default` is the initial (empty) state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportForm {
    active_section: FormSection,

    document_type: Option<DocumentType>,
    document_number: String,
    institutional_email: String,

    title: String,
    objectives: String,
    specific_objectives: String,
    problem_statement: String,
    justification: String,
    demographic_description: String,
    scope: Option<Scope>,
    has_ally: bool,
    ally_name: String,
    start_date: String,
    end_date: String,
    attachment: Option<Attachment>,

    population: String,
    students: String,
    teachers: String,
    student_hours: String,
    teacher_hours: String,

    selected_ods: Vec<String>,
    intervention_type: String,

    institutional_budget: String,
    ally_budget: String,
    satisfaction_level: u8,
    requires_maintenance: bool,
}

impl ReportForm {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Navigation ---

    pub fn active_section(&self) -> FormSection {
        self.active_section
    }

    /// Jump straight to a section. No validation happens between sections.
    pub fn select_section(&mut self, section: FormSection) {
        self.active_section = section;
    }

    /// Advance one section; stays put on the last one.
    pub fn go_next(&mut self) {
        let idx = self.active_section.index();
        if let Some(next) = FormSection::ALL.get(idx + 1) {
            self.active_section = *next;
        }
    }

    /// Go back one section; stays put on the first one.
    pub fn go_prev(&mut self) {
        let idx = self.active_section.index();
        if idx > 0 {
            self.active_section = FormSection::ALL[idx - 1];
        }
    }

    // --- Field setters ---

    pub fn set_text(&mut self, field: TextField, value: impl Into<String>) {
        let value = value.into();
        let slot = match field {
            TextField::DocumentNumber => &mut self.document_number,
            TextField::InstitutionalEmail => &mut self.institutional_email,
            TextField::Title => &mut self.title,
            TextField::Objectives => &mut self.objectives,
            TextField::SpecificObjectives => &mut self.specific_objectives,
            TextField::ProblemStatement => &mut self.problem_statement,
            TextField::Justification => &mut self.justification,
            TextField::DemographicDescription => &mut self.demographic_description,
            TextField::AllyName => &mut self.ally_name,
            TextField::StartDate => &mut self.start_date,
            TextField::EndDate => &mut self.end_date,
        };
        *slot = value;
    }

    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::DocumentNumber => &self.document_number,
            TextField::InstitutionalEmail => &self.institutional_email,
            TextField::Title => &self.title,
            TextField::Objectives => &self.objectives,
            TextField::SpecificObjectives => &self.specific_objectives,
            TextField::ProblemStatement => &self.problem_statement,
            TextField::Justification => &self.justification,
            TextField::DemographicDescription => &self.demographic_description,
            TextField::AllyName => &self.ally_name,
            TextField::StartDate => &self.start_date,
            TextField::EndDate => &self.end_date,
        }
    }

    pub fn set_document_type(&mut self, document_type: DocumentType) {
        self.document_type = Some(document_type);
    }

    pub fn set_scope(&mut self, scope: Scope) {
        self.scope = Some(scope);
    }

    /// Turning the alliance off keeps whatever was typed as ally name; it is
    /// discarded at submission.
    pub fn set_has_ally(&mut self, has_ally: bool) {
        self.has_ally = has_ally;
    }

    pub fn set_metric(&mut self, field: MetricField, raw: impl Into<String>) {
        let raw = raw.into();
        let slot = match field {
            MetricField::Population => &mut self.population,
            MetricField::Students => &mut self.students,
            MetricField::Teachers => &mut self.teachers,
            MetricField::StudentHours => &mut self.student_hours,
            MetricField::TeacherHours => &mut self.teacher_hours,
        };
        *slot = raw;
    }

    /// Store the separator-formatted rendering of `raw`. Input that overflows
    /// leaves the previous value in place.
    pub fn set_currency_field(&mut self, field: CurrencyField, raw: &str) -> CurrencyInput {
        let normalized = normalize_currency_input(raw);
        let slot = match field {
            CurrencyField::InstitutionalBudget => &mut self.institutional_budget,
            CurrencyField::AllyBudget => &mut self.ally_budget,
        };
        match &normalized {
            CurrencyInput::Cleared => slot.clear(),
            CurrencyInput::Formatted(value) => *slot = value.clone(),
            CurrencyInput::Overflow => {}
        }
        normalized
    }

    pub fn currency_value(&self, field: CurrencyField) -> &str {
        match field {
            CurrencyField::InstitutionalBudget => &self.institutional_budget,
            CurrencyField::AllyBudget => &self.ally_budget,
        }
    }

    /// Add or remove a goal. Returns whether the goal is selected afterwards.
    pub fn toggle_goal(&mut self, label: &str) -> Result<bool, CoreError> {
        if !is_known_goal(label) {
            return Err(CoreError::Validation(format!(
                "Unknown sustainability goal '{label}'"
            )));
        }
        if let Some(pos) = self.selected_ods.iter().position(|g| g == label) {
            self.selected_ods.remove(pos);
            Ok(false)
        } else {
            self.selected_ods.push(label.to_string());
            Ok(true)
        }
    }

    pub fn selected_goals(&self) -> &[String] {
        &self.selected_ods
    }

    pub fn set_intervention_type(&mut self, value: impl Into<String>) -> Result<(), CoreError> {
        let value = value.into();
        validate_intervention_type(&value).map_err(CoreError::Validation)?;
        self.intervention_type = value;
        Ok(())
    }

    pub fn set_satisfaction_level(&mut self, level: u8) -> Result<(), CoreError> {
        validate_satisfaction_level(level).map_err(CoreError::Validation)?;
        self.satisfaction_level = level;
        Ok(())
    }

    pub fn set_requires_maintenance(&mut self, requires: bool) {
        self.requires_maintenance = requires;
    }

    /// Replace any previously attached document.
    pub fn attach_file(&mut self, attachment: Attachment) {
        self.attachment = Some(attachment);
    }

    pub fn clear_attachment(&mut self) {
        self.attachment = None;
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    /// Apply a partial update. Choice fields are validated before anything is
    /// written, so a rejected patch leaves the form untouched.
    pub fn apply(&mut self, patch: FormPatch) -> Result<(), CoreError> {
        if let Some(value) = &patch.intervention_type {
            validate_intervention_type(value).map_err(CoreError::Validation)?;
        }
        if let Some(level) = patch.satisfaction_level {
            validate_satisfaction_level(level).map_err(CoreError::Validation)?;
        }

        if let Some(v) = patch.document_type {
            self.set_document_type(v);
        }
        if let Some(v) = patch.scope {
            self.set_scope(v);
        }
        if let Some(v) = patch.has_ally {
            self.set_has_ally(v);
        }
        if let Some(v) = patch.requires_maintenance {
            self.set_requires_maintenance(v);
        }
        if let Some(v) = patch.intervention_type {
            self.intervention_type = v;
        }
        if let Some(v) = patch.satisfaction_level {
            self.satisfaction_level = v;
        }

        let texts = [
            (TextField::DocumentNumber, patch.document_number),
            (TextField::InstitutionalEmail, patch.institutional_email),
            (TextField::Title, patch.title),
            (TextField::Objectives, patch.objectives),
            (TextField::SpecificObjectives, patch.specific_objectives),
            (TextField::ProblemStatement, patch.problem_statement),
            (TextField::Justification, patch.justification),
            (TextField::DemographicDescription, patch.demographic_description),
            (TextField::AllyName, patch.ally_name),
            (TextField::StartDate, patch.start_date),
            (TextField::EndDate, patch.end_date),
        ];
        for (field, value) in texts {
            if let Some(v) = value {
                self.set_text(field, v);
            }
        }

        let metrics = [
            (MetricField::Population, patch.population),
            (MetricField::Students, patch.students),
            (MetricField::Teachers, patch.teachers),
            (MetricField::StudentHours, patch.student_hours),
            (MetricField::TeacherHours, patch.teacher_hours),
        ];
        for (field, value) in metrics {
            if let Some(v) = value {
                self.set_metric(field, v);
            }
        }

        if let Some(v) = patch.institutional_budget {
            self.set_currency_field(CurrencyField::InstitutionalBudget, &v);
        }
        if let Some(v) = patch.ally_budget {
            self.set_currency_field(CurrencyField::AllyBudget, &v);
        }
        Ok(())
    }

    // --- Submission ---

    /// Whether every required field (title, scope, document type, document
    /// number, institutional email) has a value.
    pub fn has_required_fields(&self) -> bool {
        !self.title.is_empty()
            && self.scope.is_some()
            && self.document_type.is_some()
            && !self.document_number.is_empty()
            && !self.institutional_email.is_empty()
    }

    /// Finalize the report.
    ///
    /// Returns `None` and changes nothing when a required field is missing.
    /// Otherwise coerces the numeric slots, stamps a fresh id and timestamp,
    /// resets the whole form and returns the record.
    pub fn submit(&mut self) -> Option<Project> {
        let (Some(document_type), Some(scope)) = (self.document_type, self.scope) else {
            return None;
        };
        if !self.has_required_fields() {
            return None;
        }

        let form = std::mem::take(self);
        let ally_name = if form.has_ally { form.ally_name } else { String::new() };
        let file_name = form
            .attachment
            .map(|a| a.name)
            .unwrap_or_else(|| NO_ATTACHMENT_LABEL.to_string());

        Some(Project {
            id: new_record_id(),
            document_type,
            document_number: form.document_number,
            institutional_email: form.institutional_email,
            title: form.title,
            objectives: form.objectives,
            specific_objectives: form.specific_objectives,
            problem_statement: form.problem_statement,
            justification: form.justification,
            demographic_description: form.demographic_description,
            scope,
            has_ally: form.has_ally,
            ally_name,
            start_date: form.start_date,
            end_date: form.end_date,
            population: parse_count(&form.population),
            students: parse_count(&form.students),
            teachers: parse_count(&form.teachers),
            student_hours: parse_count(&form.student_hours),
            teacher_hours: parse_count(&form.teacher_hours),
            ods: form.selected_ods,
            intervention_type: form.intervention_type,
            institutional_budget: parse_currency(&form.institutional_budget),
            ally_budget: parse_currency(&form.ally_budget),
            satisfaction_level: form.satisfaction_level,
            requires_maintenance: form.requires_maintenance,
            file_name,
            date: chrono::Utc::now(),
        })
    }

    /// Serializable view of the form for clients.
    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            section: self.active_section,
            section_index: self.active_section.index(),
            section_label: self.active_section.label(),
            section_count: FormSection::ALL.len(),
            attachment_size_kb: self.attachment.as_ref().map(Attachment::size_kb),
            fields: self.clone(),
        }
    }
}

/// Client-facing rendering of a [`ReportForm`].
#[derive(Debug, Clone, Serialize)]
pub struct FormSnapshot {
    pub section: FormSection,
    pub section_index: usize,
    pub section_label: &'static str,
    pub section_count: usize,
    pub attachment_size_kb: Option<f64>,
    pub fields: ReportForm,
}

/// Validate a star rating (0 = unrated).
pub fn validate_satisfaction_level(level: u8) -> Result<(), String> {
    if level > MAX_SATISFACTION_LEVEL {
        return Err(format!(
            "Satisfaction level must be between 0 and {MAX_SATISFACTION_LEVEL}, got {level}"
        ));
    }
    Ok(())
}
