use deadpool_postgres::Pool;

use crate::db::db_query;
use crate::store::StoreError;
use crate::types::{DBIdn, DBNote};

pub async fn db_notes_select(pool: &Pool, idu: i64) -> Result<Vec<DBNote>, StoreError> {
    db_query(pool, DBNote::from, include_str!("../sql/select_notes.sql"), &[&idu]).await
}

pub async fn db_notes_insert(pool: &Pool, idu: i64, text: &str) -> Result<DBNote, StoreError> {
    let rows = db_query(pool, DBNote::from, include_str!("../sql/insert_note.sql"), &[&idu, &text]).await?;
    rows.into_iter().next().ok_or(StoreError::Missing("inserted note"))
}

pub async fn db_notes_remove(pool: &Pool, idu: i64, idn: i64) -> Result<bool, StoreError> {
    let rows = db_query(pool, DBIdn::from, include_str!("../sql/delete_note.sql"), &[&idn, &idu]).await?;
    Ok(rows.len() == 1)
}
