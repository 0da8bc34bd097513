/// All record identifiers are UUIDs (v7, time-ordered, generated by the application).
pub type DbId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh record identifier.
pub fn new_id() -> DbId {
    uuid::Uuid::now_v7()
}
