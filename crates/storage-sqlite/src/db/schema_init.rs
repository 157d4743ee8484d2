//! One-shot table bootstrap. Not a migration system: tables are created
//! when missing and otherwise left alone.

use diesel::connection::SimpleConnection;
use diesel::sqlite::SqliteConnection;
use giftlist_core::constants::{GIFT_TABLE, RECIPIENT_TABLE};
use log::{error, info};

fn recipient_table_ddl() -> String {
    format!(
        r#"CREATE TABLE IF NOT EXISTS {RECIPIENT_TABLE} (
            "id" integer NOT NULL PRIMARY KEY AUTOINCREMENT,
            "name" TEXT NOT NULL UNIQUE,
            "finished" integer
        );"#
    )
}

fn gift_table_ddl() -> String {
    format!(
        r#"CREATE TABLE IF NOT EXISTS {GIFT_TABLE} (
            "id" integer NOT NULL PRIMARY KEY AUTOINCREMENT,
            "name" TEXT NOT NULL,
            "price" integer NOT NULL DEFAULT 0,
            "url" TEXT,
            "purchased" integer NOT NULL DEFAULT 0,
            "userid" integer NOT NULL,
            FOREIGN KEY(userid) REFERENCES {RECIPIENT_TABLE}(id)
        );"#
    )
}

fn create_table(conn: &mut SqliteConnection, table: &str, ddl: &str) -> bool {
    info!("creating {}", table);
    match conn.batch_execute(ddl) {
        Ok(()) => {
            info!("{} ready", table);
            true
        }
        Err(e) => {
            error!("could not create {}: {}", table, e);
            false
        }
    }
}

/// Ensures the recipient and gift tables exist.
///
/// Failures are logged and do not stop startup; the number of tables that
/// are confirmed present is returned.
pub fn initialize_schema(conn: &mut SqliteConnection) -> usize {
    let mut ready = 0;
    // Recipients first: the gift table references it.
    for (table, ddl) in [
        (RECIPIENT_TABLE, recipient_table_ddl()),
        (GIFT_TABLE, gift_table_ddl()),
    ] {
        if create_table(conn, table, &ddl) {
            ready += 1;
        }
    }
    ready
}
