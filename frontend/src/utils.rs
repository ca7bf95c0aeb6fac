use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, Window};

fn get_window() -> Option<Window> {
    web_sys::window()
}

fn get_document() -> Option<Document> {
    get_window().and_then(|w| w.document())
}

fn get_value_from_input(element: JsValue) -> String {
    if let Some(element) = element.dyn_ref::<HtmlInputElement>() {
        element.value()
    } else {
        "".to_string()
    }
}

pub fn set_title(text: &str) {
    if let Some(d) = get_document() {
        d.set_title(text);
    }
}

pub fn get_input_value(name: &str) -> String {
    query_selector(&format!("[name={name}]"))
        .map(|element| get_value_from_input(JsValue::from(element)))
        .unwrap_or_default()
}

pub fn query_selector(selectors: &str) -> Option<Element> {
    get_document().and_then(|d| d.query_selector(selectors).ok()).and_then(|e| e)
}

pub fn get_html_element(el: Option<Element>) -> Option<HtmlElement> {
    el.and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

pub fn focus_input(name: &str) {
    if let Some(elem) = get_html_element(query_selector(&format!("[name={name}]"))) {
        if let Err(err) = elem.focus() {
            log::warn!("focus {name}: {:?}", err);
        }
    }
}

pub fn count_label(len: usize) -> String {
    match len {
        1 => "1 note".to_string(),
        n => format!("{n} notes"),
    }
}
