//! DOM helpers.
//!
//! Thin wrappers over `web_sys` used by every screen. Screens rebuild
//! the `#app` container from scratch, so elements are looked up on
//! demand rather than bound once at startup.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, EventTarget};

fn doc() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

pub fn document() -> Document {
    doc()
}

pub fn window() -> web_sys::Window {
    web_sys::window().unwrap()
}

pub fn body() -> web_sys::HtmlElement {
    doc().body().unwrap()
}

/// The root container every screen renders into.
pub fn app_root() -> Element {
    by_id("app").expect("missing #app root container")
}

pub fn by_id(id: &str) -> Option<Element> {
    doc().get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn query(selector: &str) -> Option<Element> {
    doc().query_selector(selector).ok()?
}

pub fn query_all(selector: &str) -> Vec<Element> {
    let nl = doc().query_selector_all(selector).unwrap();
    let mut v = Vec::new();
    for i in 0..nl.length() {
        if let Some(e) = nl.item(i) {
            if let Ok(el) = e.dyn_into::<Element>() {
                v.push(el);
            }
        }
    }
    v
}

pub fn query_within(parent: &Element, selector: &str) -> Option<Element> {
    parent.query_selector(selector).ok()?
}

pub fn query_all_within(parent: &Element, selector: &str) -> Vec<Element> {
    let nl = parent.query_selector_all(selector).unwrap();
    let mut v = Vec::new();
    for i in 0..nl.length() {
        if let Some(e) = nl.item(i) {
            if let Ok(el) = e.dyn_into::<Element>() {
                v.push(el);
            }
        }
    }
    v
}

pub fn create_element(tag: &str) -> Element {
    doc().create_element(tag).unwrap()
}

pub fn add_class(el: &Element, cls: &str) {
    let _ = el.class_list().add_1(cls);
}

pub fn remove_class(el: &Element, cls: &str) {
    let _ = el.class_list().remove_1(cls);
}

pub fn has_class(el: &Element, cls: &str) -> bool {
    el.class_list().contains(cls)
}

/// Inline style declaration of any element.
pub fn style(el: &Element) -> web_sys::CssStyleDeclaration {
    el.unchecked_ref::<web_sys::HtmlElement>().style()
}

pub fn set_style(el: &Element, property: &str, value: &str) {
    let _ = style(el).set_property(property, value);
}

/// Trimmed value of an `<input>` by id; empty when the element is gone.
pub fn input_value(id: &str) -> String {
    by_id_typed::<web_sys::HtmlInputElement>(id)
        .map(|el| el.value().trim().to_string())
        .unwrap_or_default()
}

pub fn textarea_value(id: &str) -> String {
    by_id_typed::<web_sys::HtmlTextAreaElement>(id)
        .map(|el| el.value().trim().to_string())
        .unwrap_or_default()
}

/// Attach a persistent event listener. The closure is leaked, which is
/// fine for listeners that live as long as their DOM node.
pub fn listen<F>(target: &EventTarget, event: &str, f: F)
where
    F: FnMut(web_sys::Event) + 'static,
{
    let cb = Closure::wrap(Box::new(f) as Box<dyn FnMut(web_sys::Event)>);
    target
        .add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())
        .unwrap();
    cb.forget();
}

/// Attach a listener that fires at most once.
pub fn listen_once<F>(target: &EventTarget, event: &str, f: F)
where
    F: FnOnce(web_sys::Event) + 'static,
{
    let cb = Closure::once(f);
    let opts = web_sys::AddEventListenerOptions::new();
    opts.set_once(true);
    target
        .add_event_listener_with_callback_and_add_event_listener_options(
            event,
            cb.as_ref().unchecked_ref(),
            &opts,
        )
        .unwrap();
    cb.forget();
}
