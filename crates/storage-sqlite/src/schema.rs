// Mirrors the DDL in `db::schema_init`. The SQL table names match existing
// christmasList.db files.

diesel::table! {
    #[sql_name = "tRecipients"]
    recipients (id) {
        id -> Integer,
        name -> Text,
        finished -> Nullable<Integer>,
    }
}

diesel::table! {
    #[sql_name = "tGifts"]
    gifts (id) {
        id -> Integer,
        name -> Text,
        price -> BigInt,
        url -> Nullable<Text>,
        purchased -> Integer,
        userid -> Integer,
    }
}

diesel::joinable!(gifts -> recipients (userid));

diesel::allow_tables_to_appear_in_same_query!(recipients, gifts);
