use dominator::{Dom, events, html};
use futures_signals::signal::SignalExt;
use futures_signals::signal_vec::SignalVecExt;

use crate::account::Account;
use crate::constants::{TAG_BUTTON, TAG_DIV, TAG_SPAN};
use crate::notes::notes_client::NotesClient;
use crate::utils::{count_label, set_title};

fn css_class(label: &str) -> String {
    format!("app-header__{label}")
}

pub fn app_header(account: Account, notes: NotesClient) -> Dom {
    set_title("My Notes");
    html!(TAG_DIV, {
        .class(css_class("container"))
        .children([
            html!(TAG_DIV, {
                .class(css_class("title"))
                .children([
                    html!("h1", {
                        .text("My Notes")
                    }),
                    html!(TAG_SPAN, {
                        .class(css_class("count"))
                        .text_signal(notes.notes().signal_vec_cloned().len().map(count_label))
                    }),
                ])
            }),
            html!(TAG_BUTTON, {
                .class(css_class("button"))
                .text("Sign Out")
                .event(move |_: events::Click| account.logout())
            }),
        ])
    })
}
