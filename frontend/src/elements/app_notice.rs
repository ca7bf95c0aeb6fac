use dominator::{Dom, events, html};
use futures_signals::signal_vec::SignalVecExt;
use gloo_timers::future::TimeoutFuture;

use crate::constants::{NOTICE_TIMEOUT_MS, TAG_DIV};
use crate::notice::{Notice, Notices};

fn css_class(label: &str) -> String {
    format!("app-notice__{label}")
}

pub fn app_notice(notices: Notices) -> Dom {
    let list = notices.signal_vec();
    html!(TAG_DIV, {
        .class(css_class("container"))
        .children_signal_vec(list.map(move |notice| notice_view(notices.clone(), notice)))
    })
}

fn notice_view(notices: Notices, notice: Notice) -> Dom {
    let id = notice.id;
    let timer = notices.clone();
    html!(TAG_DIV, {
        .class(css_class("item"))
        .class(css_class(notice.level.label()))
        .text(&notice.text)
        .future(async move {
            TimeoutFuture::new(NOTICE_TIMEOUT_MS).await;
            timer.dismiss(id);
        })
        .event(move |_: events::Click| notices.dismiss(id))
    })
}
