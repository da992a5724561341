//! Student access request review.
//!
//! A request starts `pending` and is decided once, to `approved` or
//! `rejected`. [`ApprovalBoard`] is the administrator's session copy of the
//! request list: it filters locally and only reflects a decision after the
//! store reports success. It is never re-fetched after a decision.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::store::{ApprovalStore, StorageFault};
use crate::types::{new_record_id, RecordId, Timestamp};

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_APPROVED: &str = "approved";
pub const STATUS_REJECTED: &str = "rejected";

/// All valid status values.
pub const VALID_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_APPROVED, STATUS_REJECTED];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            STATUS_PENDING => Ok(Self::Pending),
            STATUS_APPROVED => Ok(Self::Approved),
            STATUS_REJECTED => Ok(Self::Rejected),
            _ => Err(format!(
                "Invalid approval status '{s}'. Must be one of: {}",
                VALID_STATUSES.join(", ")
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => STATUS_PENDING,
            Self::Approved => STATUS_APPROVED,
            Self::Rejected => STATUS_REJECTED,
        }
    }

    /// Approved and rejected requests are final.
    pub fn is_processed(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// The outcome an administrator can pick for a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Approved,
    Rejected,
}

impl Decision {
    pub fn status(&self) -> ApprovalStatus {
        match self {
            Self::Approved => ApprovalStatus::Approved,
            Self::Rejected => ApprovalStatus::Rejected,
        }
    }
}

/// One registration request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentApproval {
    pub id: RecordId,
    pub name: String,
    /// Student code.
    pub code: String,
    pub registration_date: Timestamp,
    pub status: ApprovalStatus,
}

impl StudentApproval {
    /// Build a new pending request registered now.
    pub fn new_pending(name: &str, code: &str) -> Result<Self, CoreError> {
        let name = name.trim();
        let code = code.trim();
        if name.is_empty() || code.is_empty() {
            return Err(CoreError::Validation(
                "Registration requests need a name and a student code".into(),
            ));
        }
        Ok(Self {
            id: new_record_id(),
            name: name.to_string(),
            code: code.to_string(),
            registration_date: chrono::Utc::now(),
            status: ApprovalStatus::Pending,
        })
    }

    /// Case-insensitive match on the name, or case-sensitive substring match
    /// on the student code. An empty query matches everything.
    pub fn matches_search(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase()) || self.code.contains(query)
    }
}

/// Filter a request list for display. Order is preserved.
pub fn search<'a>(items: &'a [StudentApproval], query: &str) -> Vec<&'a StudentApproval> {
    items.iter().filter(|a| a.matches_search(query)).collect()
}

#[derive(Debug, thiserror::Error)]
pub enum DecisionError {
    #[error("Registration request {0} was already processed")]
    AlreadyProcessed(RecordId),

    #[error(transparent)]
    Storage(#[from] StorageFault),

    #[error(transparent)]
    Core(#[from] CoreError),
}

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error(transparent)]
    Invalid(#[from] CoreError),

    #[error(transparent)]
    Storage(#[from] StorageFault),
}

/// Session copy of the registration requests.
#[derive(Debug, Clone, Default)]
pub struct ApprovalBoard {
    items: Vec<StudentApproval>,
}

impl ApprovalBoard {
    pub fn new(items: Vec<StudentApproval>) -> Self {
        Self { items }
    }

    /// Fetch the current list. A storage outage yields an empty board.
    pub async fn load(store: &dyn ApprovalStore) -> Self {
        Self::new(store.list_approvals().await)
    }

    pub fn items(&self) -> &[StudentApproval] {
        &self.items
    }

    pub fn search(&self, query: &str) -> Vec<&StudentApproval> {
        search(&self.items, query)
    }

    pub fn get(&self, id: RecordId) -> Option<&StudentApproval> {
        self.items.iter().find(|a| a.id == id)
    }

    /// Record a decision.
    ///
    /// A request already processed in this board is refused before the store
    /// is called. Ids unknown to the board are still sent to the store. The
    /// local copy only changes once the store reports success.
    pub async fn decide(
        &mut self,
        store: &dyn ApprovalStore,
        id: RecordId,
        decision: Decision,
    ) -> Result<Option<&StudentApproval>, DecisionError> {
        if self.get(id).is_some_and(|a| a.status.is_processed()) {
            return Err(DecisionError::AlreadyProcessed(id));
        }

        store.update_approval_status(id, decision.status()).await?;

        let entry = self.items.iter_mut().find(|a| a.id == id);
        Ok(entry.map(|a| {
            a.status = decision.status();
            &*a
        }))
    }

    /// Store a new pending request and show it at the top of the board.
    pub async fn register(
        &mut self,
        store: &dyn ApprovalStore,
        request: StudentApproval,
    ) -> Result<&StudentApproval, StorageFault> {
        store.insert_approval(&request).await?;
        self.items.insert(0, request);
        Ok(&self.items[0])
    }

    /// Validate and register a new pending request for `name` and `code`.
    pub async fn create(
        &mut self,
        store: &dyn ApprovalStore,
        name: &str,
        code: &str,
    ) -> Result<&StudentApproval, RegisterError> {
        let request = StudentApproval::new_pending(name, code)?;
        Ok(self.register(store, request).await?)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::store::memory::MemoryStore;

    fn request(name: &str, code: &str) -> StudentApproval {
        StudentApproval::new_pending(name, code).unwrap()
    }

    #[test]
    fn test_status_round_trip() {
        for s in VALID_STATUSES {
            assert_eq!(ApprovalStatus::from_str_value(s).unwrap().as_str(), *s);
        }
        assert!(ApprovalStatus::from_str_value("flagged").is_err());
    }

    #[test]
    fn test_new_pending_requires_name_and_code() {
        assert_matches!(
            StudentApproval::new_pending("  ", "2020101"),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            StudentApproval::new_pending("Laura", ""),
            Err(CoreError::Validation(_))
        );
        assert_eq!(request("Laura", "2020101").status, ApprovalStatus::Pending);
    }

    #[test]
    fn test_search_by_name_ignores_case() {
        let items = vec![request("Laura Gomez", "2020101"), request("Pedro Ruiz", "2020555")];
        let hits = search(&items, "LAURA");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Laura Gomez");
    }

    #[test]
    fn test_search_by_code_substring() {
        let items = vec![request("Laura Gomez", "2020101"), request("Pedro Ruiz", "2020555")];
        let hits = search(&items, "555");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].code, "2020555");
    }

    #[test]
    fn test_empty_search_matches_all() {
        let items = vec![request("Laura Gomez", "2020101"), request("Pedro Ruiz", "2020555")];
        assert_eq!(search(&items, "").len(), 2);
    }

    #[test]
    fn test_search_code_is_case_sensitive() {
        let items = vec![request("Laura", "MEC-01")];
        assert!(search(&items, "mec").is_empty());
        assert_eq!(search(&items, "MEC").len(), 1);
    }

    #[tokio::test]
    async fn test_decide_updates_local_copy_on_success() {
        let pending = request("Laura", "2020101");
        let id = pending.id;
        let store = MemoryStore::with_approvals(vec![pending]);
        let mut board = ApprovalBoard::load(&store).await;

        let updated = board.decide(&store, id, Decision::Approved).await.unwrap();
        assert_eq!(updated.unwrap().status, ApprovalStatus::Approved);
        assert_eq!(board.get(id).unwrap().status, ApprovalStatus::Approved);
        assert_eq!(store.status_updates.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_decide_failure_leaves_local_copy() {
        let pending = request("Laura", "2020101");
        let id = pending.id;
        let store = MemoryStore::failing();
        let mut board = ApprovalBoard::new(vec![pending]);

        let result = board.decide(&store, id, Decision::Rejected).await;
        assert_matches!(result, Err(DecisionError::Storage(_)));
        assert_eq!(board.get(id).unwrap().status, ApprovalStatus::Pending);
    }

    #[tokio::test]
    async fn test_processed_request_is_not_reopened() {
        let pending = request("Laura", "2020101");
        let id = pending.id;
        let store = MemoryStore::with_approvals(vec![pending]);
        let mut board = ApprovalBoard::load(&store).await;

        board.decide(&store, id, Decision::Rejected).await.unwrap();
        let again = board.decide(&store, id, Decision::Approved).await;

        assert_matches!(again, Err(DecisionError::AlreadyProcessed(rid)) if rid == id);
        assert_eq!(board.get(id).unwrap().status, ApprovalStatus::Rejected);
        assert_eq!(store.status_updates.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_id_still_reaches_store() {
        let store = MemoryStore::default();
        let mut board = ApprovalBoard::default();
        let id = new_record_id();

        let result = board.decide(&store, id, Decision::Approved).await.unwrap();
        assert!(result.is_none());
        assert_eq!(store.status_updates.lock().unwrap()[0], (id, ApprovalStatus::Approved));
    }

    #[tokio::test]
    async fn test_register_prepends_on_success() {
        let store = MemoryStore::default();
        let mut board = ApprovalBoard::new(vec![request("Pedro", "1")]);
        board.register(&store, request("Laura", "2")).await.unwrap();
        assert_eq!(board.items()[0].name, "Laura");
        assert_eq!(store.approvals.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_input() {
        let store = MemoryStore::default();
        let mut board = ApprovalBoard::default();
        let result = board.create(&store, "", "2020101").await;
        assert_matches!(result, Err(RegisterError::Invalid(CoreError::Validation(_))));
        assert!(store.approvals.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_register_failure_keeps_board() {
        let store = MemoryStore::failing();
        let mut board = ApprovalBoard::default();
        assert!(board.register(&store, request("Laura", "2")).await.is_err());
        assert!(board.items().is_empty());
    }
}
