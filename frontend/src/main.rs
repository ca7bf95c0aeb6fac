use wasm_bindgen_futures::spawn_local;

use crate::config::ClientConfig;
use crate::elements::app_root::app_root;
use crate::state::AppState;

mod account;
mod config;
mod connect_fetch;
mod constants;
mod elements;
mod error;
mod notes;
mod notice;
mod session;
mod state;
mod storage;
mod types;
mod utils;
#[cfg(test)]
mod test_utils;

pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());

    let config = ClientConfig::default();
    log::info!("api base: {}", config.api_base);
    let state = AppState::browser(&config);

    if state.session.is_authenticated() {
        let notes = state.notes.clone();
        spawn_local(async move {
            notes.list_notes().await;
        });
    }

    dominator::append_dom(&dominator::body(), app_root(state));
}
