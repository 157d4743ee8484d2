//! Database models for recipients.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Database model for recipients
#[derive(Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::recipients)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct RecipientDB {
    pub id: i32,
    pub name: String,
    pub finished: Option<i32>,
}

/// Database model for creating a new recipient
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::recipients)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipientDB {
    pub name: String,
    pub finished: Option<i32>,
}

impl NewRecipientDB {
    pub fn unfinished(name: String) -> Self {
        NewRecipientDB {
            name,
            finished: Some(0),
        }
    }
}

// Conversion to domain models
impl From<RecipientDB> for giftlist_core::recipients::RecipientRecord {
    fn from(db: RecipientDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            finished: db.finished == Some(1),
        }
    }
}
