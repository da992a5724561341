//! Per-login dashboard state.
//!
//! A [`DashboardSession`] is what one browser tab works against: the role
//! chosen at login, the open view, the report form, the report collection
//! loaded once when the session opens and the approval board loaded the first
//! time the approvals view is used. Collections are never refreshed from the
//! store afterwards; the session copy is the source of truth until logout.

use crate::analytics::{self, DashboardAnalytics, HistoryRow};
use crate::approval::{ApprovalBoard, Decision, DecisionError, RegisterError, StudentApproval};
use crate::error::CoreError;
use crate::form::ReportForm;
use crate::project::Project;
use crate::roles::{Role, View};
use crate::store::{ApprovalStore, ProjectStore, StorageFault};
use crate::types::{RecordId, Timestamp};

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// A required field is empty. The form is left as it was.
    #[error("The report is missing required fields")]
    Incomplete,

    /// The report was finalized but could not be stored. It is not added to
    /// the session collection.
    #[error(transparent)]
    Storage(#[from] StorageFault),
}

#[derive(Debug)]
pub struct DashboardSession {
    role: Role,
    active_view: View,
    form: ReportForm,
    projects: Vec<Project>,
    approvals: Option<ApprovalBoard>,
    opened_at: Timestamp,
}

impl DashboardSession {
    /// Start a session for `role` and load the report collection.
    pub async fn open(role: Role, store: &dyn ProjectStore) -> Self {
        let projects = store.list_projects().await;
        Self::with_projects(role, projects)
    }

    /// Start a session over an already loaded collection (newest first).
    pub fn with_projects(role: Role, projects: Vec<Project>) -> Self {
        Self {
            role,
            active_view: role.default_view(),
            form: ReportForm::new(),
            projects,
            approvals: None,
            opened_at: chrono::Utc::now(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn active_view(&self) -> View {
        self.active_view
    }

    pub fn opened_at(&self) -> Timestamp {
        self.opened_at
    }

    /// Fail with `Forbidden` unless the session's role may open `view`.
    pub fn require(&self, view: View) -> Result<(), CoreError> {
        if self.role.can_open(view) {
            Ok(())
        } else {
            Err(CoreError::Forbidden(format!(
                "The {} role cannot open the {} view",
                self.role.as_str(),
                view.label()
            )))
        }
    }

    pub fn navigate(&mut self, view: View) -> Result<(), CoreError> {
        self.require(view)?;
        self.active_view = view;
        Ok(())
    }

    pub fn form(&self) -> &ReportForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ReportForm {
        &mut self.form
    }

    /// The session's report collection, newest first.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Finalize the form and store the report.
    ///
    /// A complete form is reset as soon as it is finalized, whether or not the
    /// store accepts the record.
    pub async fn submit_report(
        &mut self,
        store: &dyn ProjectStore,
    ) -> Result<&Project, SubmitError> {
        let project = self.form.submit().ok_or(SubmitError::Incomplete)?;
        store.insert_project(&project).await?;
        self.projects.insert(0, project);
        Ok(&self.projects[0])
    }

    pub fn analytics(&self) -> Result<DashboardAnalytics, CoreError> {
        self.require(View::Analytics)?;
        Ok(analytics::compute(&self.projects))
    }

    pub fn history(&self) -> Result<Vec<HistoryRow>, CoreError> {
        self.require(View::History)?;
        Ok(analytics::history(&self.projects))
    }

    /// The approval board, fetched from the store on first use.
    pub async fn approvals(
        &mut self,
        store: &dyn ApprovalStore,
    ) -> Result<&mut ApprovalBoard, CoreError> {
        self.require(View::Approvals)?;
        if self.approvals.is_none() {
            self.approvals = Some(ApprovalBoard::load(store).await);
        }
        self.approvals
            .as_mut()
            .ok_or_else(|| CoreError::Internal("approval board not loaded".into()))
    }

    /// Decide a registration request through the session's board.
    pub async fn decide_approval(
        &mut self,
        store: &dyn ApprovalStore,
        id: RecordId,
        decision: Decision,
    ) -> Result<Option<StudentApproval>, DecisionError> {
        let board = self.approvals(store).await?;
        let updated = board.decide(store, id, decision).await?;
        Ok(updated.cloned())
    }

    /// Register a pending request and show it at the top of the board.
    pub async fn register_approval(
        &mut self,
        store: &dyn ApprovalStore,
        name: &str,
        code: &str,
    ) -> Result<StudentApproval, RegisterError> {
        let board = self.approvals(store).await?;
        let created = board.create(store, name, code).await?;
        Ok(created.clone())
    }
}
