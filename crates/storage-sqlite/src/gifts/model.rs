//! Database models for gifts.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::recipients::RecipientDB;

/// Database model for gifts
#[derive(
    Queryable,
    Identifiable,
    Associations,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(belongs_to(RecipientDB, foreign_key = userid))]
#[diesel(table_name = crate::schema::gifts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct GiftDB {
    pub id: i32,
    pub name: String,
    pub price: i64,
    pub url: Option<String>,
    pub purchased: i32,
    pub userid: i32,
}

/// Database model for creating a new gift
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::gifts)]
#[serde(rename_all = "camelCase")]
pub struct NewGiftDB {
    pub name: String,
    pub price: i64,
    pub url: Option<String>,
    pub purchased: i32,
    pub userid: i32,
}

impl NewGiftDB {
    pub fn for_recipient(recipient_id: i32, gift: giftlist_core::recipients::NewGift) -> Self {
        NewGiftDB {
            name: gift.name,
            price: gift.price,
            url: gift.url,
            purchased: 0,
            userid: recipient_id,
        }
    }
}

// Conversion to domain models
impl From<GiftDB> for giftlist_core::recipients::Gift {
    fn from(db: GiftDB) -> Self {
        Self {
            id: db.id,
            recipient_id: db.userid,
            name: db.name,
            price: db.price,
            url: db.url,
            purchased: db.purchased == 1,
        }
    }
}
