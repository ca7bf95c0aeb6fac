use deadpool_postgres::{Config, ManagerConfig, Pool, RecyclingMethod, Runtime};
use postgres_types::ToSql;
use tokio_postgres::{NoTls, Row};

use crate::config::DBParams;
use crate::store::StoreError;

pub fn db_pool(p: &DBParams) -> Result<Pool, StoreError> {
    let mut cfg = Config::new();
    cfg.dbname = Some(p.db.clone());
    cfg.user = Some(p.user.clone());
    cfg.password = Some(p.password.clone());
    cfg.host = Some(p.host.clone());
    cfg.port = Some(p.port);

    cfg.manager = Some(ManagerConfig {
        recycling_method: RecyclingMethod::Fast,
    });
    cfg.create_pool(Some(Runtime::Tokio1), NoTls)
        .map_err(|err| StoreError::Config(err.to_string()))
}

pub async fn db_init(pool: &Pool) -> Result<(), StoreError> {
    let db = pool.get().await?;
    db.batch_execute(include_str!("../sql/schema.sql")).await?;
    Ok(())
}

pub async fn db_query<R>(pool: &Pool, data_from: fn(Row) -> R, statement: &str, params: &[&(dyn ToSql + Sync)]) -> Result<Vec<R>, StoreError>
{
    let db = pool.get().await?;
    match db.query(statement, params).await {
        Ok(result) => {
            Ok(result.into_iter().map(data_from).collect::<Vec<_>>())
        }
        Err(err) => {
            tracing::error!("db_query [statement]: {:?}", statement);
            tracing::error!("db_query [error]: {:?}", err);
            Err(err.into())
        }
    }
}
