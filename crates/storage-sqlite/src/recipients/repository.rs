use giftlist_core::recipients::{RecipientRecord, RecipientRepositoryTrait};
use giftlist_core::Result;

use super::model::{NewRecipientDB, RecipientDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::recipients;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;

use std::sync::Arc;

pub struct RecipientRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl RecipientRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        RecipientRepository { pool, writer }
    }
}

#[async_trait]
impl RecipientRepositoryTrait for RecipientRepository {
    fn find_recipient_by_name(&self, name: &str) -> Result<Option<RecipientRecord>> {
        let mut conn = get_connection(&self.pool)?;
        let recipient_db = recipients::table
            .filter(recipients::name.eq(name))
            .select(RecipientDB::as_select())
            .first::<RecipientDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(recipient_db.map(RecipientRecord::from))
    }

    fn load_recipients(&self) -> Result<Vec<RecipientRecord>> {
        let mut conn = get_connection(&self.pool)?;
        let recipients_db = recipients::table
            .order(recipients::id.asc())
            .select(RecipientDB::as_select())
            .load::<RecipientDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(recipients_db
            .into_iter()
            .map(RecipientRecord::from)
            .collect())
    }

    async fn insert_recipient(&self, name: String) -> Result<RecipientRecord> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<RecipientRecord> {
                let result_db = diesel::insert_into(recipients::table)
                    .values(&NewRecipientDB::unfinished(name))
                    .returning(RecipientDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(RecipientRecord::from(result_db))
            })
            .await
    }

    async fn delete_recipient(&self, recipient_id: i32) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(recipients::table.find(recipient_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
