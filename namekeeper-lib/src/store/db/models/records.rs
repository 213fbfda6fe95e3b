use agdb::{DbId, DbType};

/// Every save targets this slot, so a second save replaces the first instead of adding a row.
pub(crate) const RECORD_UID: u64 = 0;

#[derive(Debug, Clone, DbType, PartialEq, PartialOrd)]
pub(crate) struct RecordModel {
    db_id: Option<DbId>,
    uid: u64,
    /// The name as the user typed it. May be empty.
    name: String,
}

impl RecordModel {
    pub fn new(name: &str) -> Self {
        Self {
            db_id: None,
            uid: RECORD_UID,
            name: name.into(),
        }
    }
}
