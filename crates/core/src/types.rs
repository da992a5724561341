/// Record identifiers are UUIDs generated by the application, never by the database.
pub type RecordId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh, time-ordered record identifier.
pub fn new_record_id() -> RecordId {
    uuid::Uuid::now_v7()
}
