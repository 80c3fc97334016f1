use diesel::prelude::*;

/// One settings row: a key and a JSON-encoded value.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = crate::infrastructure::storage::db::schema::settings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DbSetting {
    pub key: String,
    pub value: String,
}
