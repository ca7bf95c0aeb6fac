use deadpool_postgres::Pool;

use crate::db::db_query;
use crate::store::StoreError;
use crate::types::DBUser;

/// `None` when the email is already taken.
pub async fn db_user_insert(pool: &Pool, email: &str, password_hash: &str, salt: &str) -> Result<Option<DBUser>, StoreError> {
    let rows = db_query(pool, DBUser::from, include_str!("../sql/insert_user.sql"), &[&email, &password_hash, &salt]).await?;
    Ok(rows.into_iter().next())
}

pub async fn db_user_login(pool: &Pool, email: &str) -> Result<Option<DBUser>, StoreError> {
    let rows = db_query(pool, DBUser::from, include_str!("../sql/select_user_login.sql"), &[&email]).await?;
    Ok(rows.into_iter().next())
}
