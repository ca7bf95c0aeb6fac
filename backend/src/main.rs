use std::process;
use std::sync::Arc;

use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;
use warp::Filter;

use crate::config::ServerConfig;
use crate::error::handle_rejection;
use crate::routes::api_routes;
use crate::state::AppState;
use crate::store::{MemoryStore, PgStore, Store};
use crate::tasks::run_tasks;

mod config;
mod db;
mod db_notes;
mod db_user;
mod error;
mod filters;
mod routes;
mod state;
mod store;
mod tasks;
mod types;
mod utils;

#[tokio::main(worker_threads = 2)]
async fn main() {
    let with_ansi = cfg!(target_os = "macos");

    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_ansi(with_ansi)
        .with_max_level(Level::INFO)
        .with_thread_ids(true)
        .with_target(false)
        .with_span_events(FmtSpan::CLOSE)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("tracing: {err}");
    }

    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("{err}");
            process::exit(1);
        }
    };
    let addr = match config.socket_addr() {
        Ok(addr) => addr,
        Err(err) => {
            tracing::error!("{err}");
            process::exit(1);
        }
    };

    let store: Arc<dyn Store> = match &config.db {
        Some(params) => match PgStore::connect(params).await {
            Ok(store) => Arc::new(store),
            Err(err) => {
                tracing::error!("database: {err}");
                process::exit(1);
            }
        },
        None => {
            tracing::warn!("no database configured, notes live in memory");
            Arc::new(MemoryStore::default())
        }
    };
    let state = Arc::new(AppState::new(store, config.token_ttl_hours));

    tokio::task::spawn(run_tasks(state.clone()));

    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["authorization", "content-type"])
        .allow_methods(vec!["GET", "POST", "DELETE"]);

    let routes_dir = warp::get().and(warp::fs::dir(config.static_dir.clone()));

    let routes = api_routes(state).or(routes_dir);

    tracing::info!("listening on {addr}");
    warp::serve(
        routes
            .recover(handle_rejection)
            .with(warp::trace::request()).with(cors),
    )
        .run(addr)
        .await;
}
