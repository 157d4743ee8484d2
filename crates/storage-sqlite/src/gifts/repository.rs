use giftlist_core::recipients::{toggle, Gift, GiftRepositoryTrait, NewGift};
use giftlist_core::Result;

use super::model::{GiftDB, NewGiftDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::gifts;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;

use std::sync::Arc;

pub struct GiftRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl GiftRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        GiftRepository { pool, writer }
    }
}

#[async_trait]
impl GiftRepositoryTrait for GiftRepository {
    fn load_gifts_for_recipient(&self, recipient_id: i32) -> Result<Vec<Gift>> {
        let mut conn = get_connection(&self.pool)?;
        let gifts_db = gifts::table
            .filter(gifts::userid.eq(recipient_id))
            .order(gifts::id.asc())
            .select(GiftDB::as_select())
            .load::<GiftDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(gifts_db.into_iter().map(Gift::from).collect())
    }

    async fn insert_gift(&self, recipient_id: i32, new_gift: NewGift) -> Result<Gift> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Gift> {
                let result_db = diesel::insert_into(gifts::table)
                    .values(&NewGiftDB::for_recipient(recipient_id, new_gift))
                    .returning(GiftDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Gift::from(result_db))
            })
            .await
    }

    // Read and write run in the same writer job, so concurrent toggles of one
    // gift cannot interleave.
    async fn toggle_purchased(&self, gift_id: i32) -> Result<Option<bool>> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Option<bool>> {
                let current = gifts::table
                    .find(gift_id)
                    .select(gifts::purchased)
                    .first::<i32>(conn)
                    .optional()
                    .map_err(StorageError::from)?;
                let Some(current) = current else {
                    return Ok(None);
                };

                let purchased = toggle(current == 1);
                diesel::update(gifts::table.find(gift_id))
                    .set(gifts::purchased.eq(i32::from(purchased)))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(Some(purchased))
            })
            .await
    }

    async fn delete_gift(&self, gift_id: i32) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(gifts::table.find(gift_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
