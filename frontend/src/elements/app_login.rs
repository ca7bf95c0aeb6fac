use dominator::{Dom, events, html};
use futures_signals::signal::SignalExt;
use wasm_bindgen_futures::spawn_local;

use crate::account::Account;
use crate::constants::{KEY_ENTER, PROP_AUTOCOMPLETE, PROP_DISABLED, PROP_NAME, PROP_PLACEHOLDER, PROP_TITLE, PROP_TYPE, TAG_BUTTON, TAG_DIV, TAG_INPUT};
use crate::utils::{focus_input, get_input_value, set_title};

const FIELD_EMAIL: &str = "email";
const FIELD_PASS: &str = "password";

#[derive(Clone, Copy)]
enum AuthAction {
    Login,
    Register,
}

fn css_class(label: &str) -> String {
    format!("app-login__{label}")
}

pub fn app_login(account: Account) -> Dom {
    set_title("Notes: sign in");
    html!(TAG_DIV, {
        .class(css_class("container"))
        .child(html!(TAG_DIV, {
            .class(css_class("form"))
            .children([
                html!("h1", {
                    .class(css_class("title"))
                    .text("Welcome to Notes")
                }),
                html!("p", {
                    .class(css_class("subtitle"))
                    .text("Your personal note-taking companion")
                }),
                html!(TAG_INPUT, {
                    .class(css_class("input"))
                    .attr(PROP_TITLE, "Email")
                    .attr(PROP_PLACEHOLDER, "Email address")
                    .attr(PROP_TYPE, "email")
                    .attr(PROP_AUTOCOMPLETE, "username")
                    .attr(PROP_NAME, FIELD_EMAIL)
                    .event(handle_key_email)
                }),
                html!(TAG_INPUT, {
                    .class(css_class("input"))
                    .attr(PROP_TITLE, "Password")
                    .attr(PROP_PLACEHOLDER, "Password")
                    .attr(PROP_TYPE, "password")
                    .attr(PROP_AUTOCOMPLETE, "current-password")
                    .attr(PROP_NAME, FIELD_PASS)
                    .event({
                        let account = account.clone();
                        move |ev: events::KeyDown| {
                            if ev.key() == KEY_ENTER {
                                submit(&account, AuthAction::Login);
                            }
                        }
                    })
                }),
                button("Sign In", "primary", &account, AuthAction::Login),
                button("Create Account", "secondary", &account, AuthAction::Register),
            ])
        }))
    })
}

fn button(label: &str, kind: &str, account: &Account, action: AuthAction) -> Dom {
    let account = account.clone();
    html!(TAG_BUTTON, {
        .class(css_class("button"))
        .class(css_class(kind))
        .text(label)
        .prop_signal(PROP_DISABLED, account.auth_loading.signal())
        .class_signal("loading", account.auth_loading.signal().dedupe())
        .event(move |_: events::Click| submit(&account, action))
    })
}

fn handle_key_email(ev: events::KeyDown) {
    if ev.key() == KEY_ENTER {
        focus_input(FIELD_PASS);
    }
}

fn submit(account: &Account, action: AuthAction) {
    let account = account.clone();
    let email = get_input_value(FIELD_EMAIL);
    let password = get_input_value(FIELD_PASS);
    spawn_local(async move {
        match action {
            AuthAction::Login => account.login(&email, &password).await,
            AuthAction::Register => account.register(&email, &password).await,
        }
    });
}
