use dominator::{Dom, html};
use futures_signals::signal::SignalExt;

use crate::constants::TAG_DIV;
use crate::elements::app_header::app_header;
use crate::elements::app_login::app_login;
use crate::elements::app_notice::app_notice;
use crate::notes::app_notes::app_notes;
use crate::state::AppState;

pub fn app_root(state: AppState) -> Dom {
    let notices = state.notices.clone();
    html!(TAG_DIV, {
        .class("app-root")
        .child_signal(state.session.authenticated_signal().dedupe().map(move |authenticated| {
            if authenticated {
                Some(app_main(&state))
            } else {
                Some(app_login(state.account.clone()))
            }
        }))
        .child(app_notice(notices))
    })
}

fn app_main(state: &AppState) -> Dom {
    html!(TAG_DIV, {
        .class("app-main")
        .children([
            app_header(state.account.clone(), state.notes.clone()),
            app_notes(state.notes.clone()),
        ])
    })
}
