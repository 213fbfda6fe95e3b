use agdb::{DbId, QueryBuilder};
use tracing::debug;

use crate::{
    Error, Result,
    store::db::{Db, RECORDS, models::RecordModel},
};

/// The saved name, as read back from the database.
///
/// This is an owned snapshot. Editing it does not touch storage; call [`crate::Store::save`]
/// for that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    id: u64,
    name: String,
}

impl Record {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn into_name(self) -> String {
        self.name
    }
}

/// Write `name` into the record slot, replacing whatever was there.
pub(crate) fn save(db: &Db, name: &str) -> Result<()> {
    db.write().transaction_mut(|t| -> Result<()> {
        let existing = t
            .exec(
                QueryBuilder::search()
                    .from(RECORDS)
                    .where_()
                    .neighbor()
                    .query(),
            )?
            .elements
            .first()
            .map(|e| e.id);

        match existing {
            Some(record_id) => {
                t.exec_mut(
                    QueryBuilder::insert()
                        .values([[("name", name).into()]])
                        .ids(record_id)
                        .query(),
                )?;
            }
            None => {
                let record_id = t
                    .exec_mut(QueryBuilder::insert().element(RecordModel::new(name)).query())?
                    .elements
                    .first()
                    .ok_or(Error::UnexpectedResult)?
                    .id;

                // Link the record to the root "records" node
                t.exec_mut(
                    QueryBuilder::insert()
                        .edges()
                        .from(RECORDS)
                        .to(record_id)
                        .query(),
                )?;
            }
        }

        Ok(())
    })?;

    debug!("Saved record ({} bytes)", name.len());

    Ok(())
}

/// Read the record slot. An empty slot is `Ok(None)`.
pub(crate) fn load(db: &Db) -> Result<Option<Record>> {
    let db = db.read();

    let Some(record_id) = db
        .exec(
            QueryBuilder::search()
                .from(RECORDS)
                .where_()
                .neighbor()
                .query(),
        )?
        .elements
        .first()
        .map(|e| e.id)
    else {
        debug!("No record saved yet");
        return Ok(None);
    };

    let id = field(&db, record_id, "uid")?.to_u64()?;
    let name = String::try_from(field(&db, record_id, "name")?)
        .map_err(|_| Error::UnexpectedResult)?;

    Ok(Some(Record { id, name }))
}

fn field(db: &agdb::DbAny, db_id: DbId, key: &str) -> Result<agdb::DbValue> {
    Ok(db
        .exec(QueryBuilder::select().values(key).ids(db_id).query())?
        .elements
        .pop()
        .ok_or(Error::UnexpectedResult)?
        .values
        .pop()
        .ok_or(Error::UnexpectedResult)?
        .value)
}

/// Number of record nodes hanging off the `records` root. Never more than one.
#[cfg(test)]
pub(crate) fn record_count(db: &Db) -> usize {
    db.read()
        .exec(
            QueryBuilder::search()
                .from(RECORDS)
                .where_()
                .neighbor()
                .query(),
        )
        .unwrap()
        .elements
        .len()
}
