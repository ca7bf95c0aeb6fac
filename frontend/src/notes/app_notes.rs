use dominator::{Dom, events, html};
use futures_signals::map_ref;
use futures_signals::signal::SignalExt;
use futures_signals::signal_vec::SignalVecExt;
use wasm_bindgen_futures::spawn_local;

use crate::constants::{KEY_ENTER, PROP_NAME, PROP_PLACEHOLDER, PROP_TITLE, PROP_VALUE, TAG_BUTTON, TAG_DIV, TAG_INPUT, TAG_SPAN};
use crate::notes::notes_client::NotesClient;
use crate::types::Note;
use crate::utils::get_input_value;

const FIELD_NOTE: &str = "note";

fn css_class(label: &str) -> String {
    format!("app-notes__{label}")
}

pub fn app_notes(notes: NotesClient) -> Dom {
    html!(TAG_DIV, {
        .class(css_class("container"))
        .children([
            add_form(&notes),
            notes_list(&notes),
        ])
    })
}

fn add_form(notes: &NotesClient) -> Dom {
    let draft = notes.draft.clone();
    html!(TAG_DIV, {
        .class(css_class("form"))
        .children([
            html!("h2", {
                .text("Add New Note")
            }),
            html!(TAG_INPUT, {
                .class(css_class("input"))
                .attr(PROP_NAME, FIELD_NOTE)
                .attr(PROP_PLACEHOLDER, "What's on your mind?")
                .prop_signal(PROP_VALUE, notes.draft.signal_cloned())
                .event(move |_: events::Input| draft.set_neq(get_input_value(FIELD_NOTE)))
                .event({
                    let notes = notes.clone();
                    move |ev: events::KeyDown| {
                        if ev.key() == KEY_ENTER {
                            add_note(&notes);
                        }
                    }
                })
            }),
            html!(TAG_BUTTON, {
                .class(css_class("button"))
                .text("Add")
                .event({
                    let notes = notes.clone();
                    move |_: events::Click| add_note(&notes)
                })
            }),
        ])
    })
}

fn add_note(notes: &NotesClient) {
    let notes = notes.clone();
    let text = notes.draft.get_cloned();
    spawn_local(async move {
        notes.create_note(&text).await;
    });
}

fn notes_list(notes: &NotesClient) -> Dom {
    let show_empty = map_ref! {
        let loading = notes.loading.signal(),
        let empty = notes.notes().signal_vec_cloned().is_empty() =>
        !*loading && *empty
    };
    let rows = {
        let notes = notes.clone();
        notes.notes().signal_vec_cloned().map(move |note| note_row(&notes, note))
    };
    html!(TAG_DIV, {
        .class(css_class("list"))
        .children([
            html!("h2", {
                .text("Your Notes")
            }),
        ])
        .child_signal(notes.loading.signal().dedupe().map(|loading| {
            loading.then(|| html!(TAG_DIV, {
                .class(css_class("loading"))
                .text("Loading your notes...")
            }))
        }))
        .child_signal(show_empty.dedupe().map(|show| show.then(empty_view)))
        .child(html!(TAG_DIV, {
            .class(css_class("items"))
            .visible_signal(notes.loading.signal().map(|loading| !loading))
            .children_signal_vec(rows)
        }))
    })
}

fn empty_view() -> Dom {
    html!(TAG_DIV, {
        .class(css_class("empty"))
        .children([
            html!("p", {
                .text("No notes yet")
            }),
            html!("small", {
                .text("Start by adding your first note above")
            }),
        ])
    })
}

fn note_row(notes: &NotesClient, note: Note) -> Dom {
    let notes = notes.clone();
    let id = note.id;
    html!(TAG_DIV, {
        .class(css_class("item"))
        .children([
            html!(TAG_SPAN, {
                .class(css_class("text"))
                .text(&note.text)
            }),
            html!("small", {
                .class(css_class("date"))
                .text(&note.created_label().unwrap_or_default())
            }),
            html!(TAG_BUTTON, {
                .class(css_class("delete"))
                .attr(PROP_TITLE, "Delete note")
                .text("✕")
                .event(move |_: events::Click| {
                    let notes = notes.clone();
                    spawn_local(async move {
                        notes.delete_note(id).await;
                    });
                })
            }),
        ])
    })
}
