use agdb::{DbId, DbType};

/// The only schema this crate knows how to read. There is no migration path; a database with any
/// other version is rejected on open.
pub(crate) const CURRENT_MODEL_VERSION: u64 = 1;

#[derive(Debug, Clone, DbType, PartialEq, PartialOrd)]
pub(crate) struct ModelVersion {
    db_id: Option<DbId>,
    version: u64,
}

impl ModelVersion {
    pub fn version(&self) -> u64 {
        self.version
    }

    #[cfg(test)]
    pub(crate) fn new(version: u64) -> Self {
        Self {
            db_id: None,
            version,
        }
    }
}

impl Default for ModelVersion {
    fn default() -> Self {
        Self {
            db_id: None,
            version: CURRENT_MODEL_VERSION,
        }
    }
}
