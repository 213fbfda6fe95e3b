use std::path::Path;

use tokio::task::spawn_blocking;
use tracing::debug;

use crate::{
    Result,
    store::{config::CoreConfig, db::Db},
};

mod db;
mod record;

pub mod config;

pub use record::Record;

/// Central access point for the saved name.
///
/// The [`Store`] owns a single record slot in an embedded database file. [`Store::save`] and
/// [`Store::load`] hand their work to a blocking worker thread, so they can be awaited from a UI
/// event loop without stalling it. Clones share the same database; concurrent saves are
/// serialized and the last one to run wins.
#[derive(Clone, Debug)]
pub struct Store {
    db: Db,
}

impl Store {
    /// Open (or create) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            db: Db::open(path.as_ref())?,
        })
    }

    /// Open the database at the location named by the user's [`CoreConfig`].
    pub fn open_default() -> Result<Self> {
        let cfg = CoreConfig::load()?;
        Self::open(cfg.database_path()?)
    }

    /// Persist `name`, replacing any previously saved name.
    pub async fn save(&self, name: impl Into<String>) -> Result<()> {
        let db = self.db.clone();
        let name = name.into();

        spawn_blocking(move || record::save(&db, &name)).await?
    }

    /// Fetch the saved record, or `None` if nothing has been saved yet.
    pub async fn load(&self) -> Result<Option<Record>> {
        let db = self.db.clone();

        spawn_blocking(move || record::load(&db)).await?
    }

    /// Location of the backing file. `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.db.path()
    }

    /// Release this handle. Equivalent to dropping it; the file is closed once every clone has
    /// been closed or dropped.
    pub fn close(self) {
        debug!("Closing store handle");
        drop(self.db);
    }

    #[cfg(test)]
    /// Return a mock version of a [`Store`] with an in-memory database.
    pub(crate) fn mock() -> Self {
        Self {
            db: Db::in_memory(),
        }
    }
}

#[cfg(test)]
mod test {
    use std::{collections::HashSet, fs};

    use tempfile::TempDir;

    use super::{Store, record::record_count};
    use crate::Error;

    #[tokio::test]
    async fn test_fresh_store_is_empty() {
        let store = Store::mock();

        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_scenario() {
        let store = Store::mock();

        assert_eq!(store.load().await.unwrap(), None);

        store.save("Alice").await.unwrap();
        assert_eq!(store.load().await.unwrap().unwrap().name(), "Alice");

        store.save("Bob").await.unwrap();
        assert_eq!(store.load().await.unwrap().unwrap().name(), "Bob");
    }

    #[tokio::test]
    async fn test_round_trip_various_names() {
        let store = Store::mock();
        let long = "x".repeat(10_000);

        for name in ["", " ", "Zoë", "名前", "a\nb", long.as_str()] {
            store.save(name).await.unwrap();
            assert_eq!(store.load().await.unwrap().unwrap().into_name(), name);
        }
    }

    #[tokio::test]
    async fn test_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("names.db");

        let store = Store::open(&path).unwrap();
        assert_eq!(store.path(), Some(path.as_path()));
        store.save("Alice").await.unwrap();
        store.close();

        let store = Store::open(&path).unwrap();
        assert_eq!(store.load().await.unwrap().unwrap().name(), "Alice");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_saves() {
        let store = Store::mock();
        let names: Vec<String> = (0..32).map(|i| format!("name-{i}")).collect();

        let handles: Vec<_> = names
            .iter()
            .cloned()
            .map(|name| {
                let store = store.clone();
                tokio::spawn(async move { store.save(name).await })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let saved = store.load().await.unwrap().unwrap().into_name();
        let names: HashSet<String> = names.into_iter().collect();
        assert!(names.contains(&saved));
        assert_eq!(record_count(&store.db), 1);
    }

    #[test]
    fn test_open_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("names.db");
        fs::write(&path, b"this is definitely not an agdb database file").unwrap();

        assert!(matches!(Store::open(&path), Err(Error::Corrupt(_))));
    }
}
