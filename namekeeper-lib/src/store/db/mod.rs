use std::{
    fs::create_dir_all,
    panic::{self, AssertUnwindSafe},
    path::{Path, PathBuf},
    sync::Arc,
};

use agdb::{DbAny, QueryBuilder};
use derive_more::Deref;
use parking_lot::RwLock;
use tracing::{debug, error, info};

use crate::{
    Error, Result,
    store::db::models::{CURRENT_MODEL_VERSION, ModelVersion},
};

pub(crate) mod models;

/// Root node that the stored record hangs off.
pub(crate) const RECORDS: &str = "records";
/// Root node that the schema marker hangs off.
pub(crate) const MODEL_VERSION: &str = "model_version";

#[derive(Debug, Clone, Deref)]
pub(crate) struct Db {
    #[deref]
    db: Arc<RwLock<DbAny>>,
    path: Option<PathBuf>,
}

impl Db {
    /// Open the database file at `path`, creating it and its parent directories if needed.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            create_dir_all(parent)?;
        }

        let path_str = path
            .to_str()
            .ok_or_else(|| Error::NonUtf8Path(path.to_path_buf()))?;

        debug!("Opening database at {path_str}");

        let db = Self {
            db: Arc::new(RwLock::new(open_file(path, path_str)?)),
            path: Some(path.to_path_buf()),
        };

        db.init()?;

        Ok(db)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn init(&self) -> Result<()> {
        let alias_count = self
            .db
            .read()
            .exec(QueryBuilder::select().aliases().query())?
            .result;

        if alias_count == 0 {
            info!("Initializing a fresh database");

            self.db.write().exec_mut(
                QueryBuilder::insert()
                    .nodes()
                    .aliases([RECORDS, MODEL_VERSION])
                    .query(),
            )?;
        }

        // Fetch the current model version (if any)
        let result = self.db.read().exec(
            QueryBuilder::select()
                .elements::<ModelVersion>()
                .search()
                .from(MODEL_VERSION)
                .where_()
                .neighbor()
                .query(),
        )?;

        let model_version: Option<ModelVersion> = result.try_into().into_iter().next();

        if let Some(mv) = model_version {
            if mv.version() != CURRENT_MODEL_VERSION {
                return Err(Error::SchemaMismatch {
                    found: mv.version(),
                    expected: CURRENT_MODEL_VERSION,
                });
            }
        } else {
            // Insert default ModelVersion if missing
            self.db.write().transaction_mut(|t| -> Result<()> {
                let model_version_id = t
                    .exec_mut(
                        QueryBuilder::insert()
                            .element(ModelVersion::default())
                            .query(),
                    )?
                    .elements
                    .first()
                    .ok_or(Error::UnexpectedResult)?
                    .id;

                t.exec_mut(
                    QueryBuilder::insert()
                        .edges()
                        .from(MODEL_VERSION)
                        .to(model_version_id)
                        .query(),
                )?;

                Ok(())
            })?;
        }

        Ok(())
    }

    /// Create a memory backed database for use in tests
    #[cfg(test)]
    pub(crate) fn in_memory() -> Self {
        let db = Self {
            db: Arc::new(RwLock::new(DbAny::new_memory("test").unwrap())),
            path: None,
        };

        db.init().unwrap();

        db
    }
}

/// agdb panics instead of erroring when the file isn't one of its databases, so the open is run
/// behind `catch_unwind` with the panic hook silenced.
fn open_file(path: &Path, path_str: &str) -> Result<DbAny> {
    let hook = panic::take_hook();
    panic::set_hook(Box::new(|_| {}));
    let result = panic::catch_unwind(AssertUnwindSafe(|| DbAny::new_file(path_str)));
    panic::set_hook(hook);

    match result {
        Ok(db) => Ok(db?),
        Err(_) => {
            error!("Refusing to open corrupt database at {path_str}");
            Err(Error::Corrupt(path.to_path_buf()))
        }
    }
}

#[cfg(test)]
mod test {
    use std::fs;

    use agdb::QueryBuilder;
    use tempfile::TempDir;

    use super::{Db, MODEL_VERSION, models::ModelVersion};
    use crate::Error;

    fn overwrite_model_version(db: &Db, version: u64) {
        db.write()
            .transaction_mut(|t| -> Result<(), agdb::DbError> {
                t.exec_mut(
                    QueryBuilder::remove()
                        .search()
                        .from(MODEL_VERSION)
                        .where_()
                        .neighbor()
                        .query(),
                )?;
                let id = t
                    .exec_mut(
                        QueryBuilder::insert()
                            .element(ModelVersion::new(version))
                            .query(),
                    )?
                    .elements
                    .first()
                    .unwrap()
                    .id;
                t.exec_mut(
                    QueryBuilder::insert()
                        .edges()
                        .from(MODEL_VERSION)
                        .to(id)
                        .query(),
                )?;
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_init_is_repeatable() {
        let db = Db::in_memory();

        db.init().unwrap();

        let versions = db
            .read()
            .exec(
                QueryBuilder::select()
                    .elements::<ModelVersion>()
                    .search()
                    .from(MODEL_VERSION)
                    .where_()
                    .neighbor()
                    .query(),
            )
            .unwrap()
            .elements
            .len();

        assert_eq!(versions, 1);
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("names.db");

        let db = Db::open(&path).unwrap();

        assert!(path.exists());
        assert_eq!(db.path(), Some(path.as_path()));
    }

    #[test]
    fn test_schema_mismatch() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("names.db");

        {
            let db = Db::open(&path).unwrap();
            overwrite_model_version(&db, 2);
        }

        assert!(matches!(
            Db::open(&path),
            Err(Error::SchemaMismatch {
                found: 2,
                expected: 1
            })
        ));
    }

    #[test]
    fn test_open_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("names.db");
        fs::write(&path, b"this is definitely not an agdb database file, just some bytes").unwrap();

        match Db::open(&path) {
            Err(Error::Corrupt(p)) => assert_eq!(p, path),
            other => panic!("expected a corrupt database error, got {other:?}"),
        }
    }
}
