//! Utility functions for the collection editor component.
//!
//! - **Form reading**: turning the dialog's `<form>` into the flat
//!   [`FormData`] the shared editor coerces and validates.
//! - **User feedback**: temporary toast notifications.

use admin_common::editor::{Entity, SortDirection};
use admin_common::form::{FormData, InputKind};
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, HtmlFormElement};
use yew::NodeRef;

/// Collects the named inputs of `T`'s form.
///
/// Unchecked checkboxes are left out, as a browser submission would. Color
/// pickers report lowercase hex, which is normalised to the `#RRGGBB` form the
/// validation rules expect.
pub fn read_form<T: Entity>(form_ref: &NodeRef) -> Option<FormData> {
    let element = form_ref.cast::<HtmlFormElement>()?;
    let submitted = web_sys::FormData::new_with_form(&element).ok()?;

    let mut form = FormData::new();
    for field in T::form_fields() {
        let value = submitted.get(field.name).as_string();
        match field.input {
            InputKind::Checkbox => form.set_flag(field.name, value.is_some()),
            InputKind::Color => {
                if let Some(value) = value {
                    form.insert(field.name, value.to_uppercase());
                }
            }
            _ => {
                if let Some(value) = value {
                    form.insert(field.name, value);
                }
            }
        }
    }
    Some(form)
}

pub fn sort_indicator(direction: Option<SortDirection>) -> &'static str {
    match direction {
        Some(SortDirection::Ascending) => "▲",
        Some(SortDirection::Descending) => "▼",
        None => "↕",
    }
}

/// Displays a temporary notification message at the bottom of the screen.
///
/// Injects a fixed `div` into the body and removes it again after three seconds.
/// Used for every user-facing confirmation and failure of the editors.
pub fn show_toast(message: &str) {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) else {
        return;
    };

    toast.set_text_content(Some(message));
    toast.set_class_name("toast");
    let html_toast: HtmlElement = toast.unchecked_into();
    let style = html_toast.style();
    style.set_property("position", "fixed").ok();
    style.set_property("bottom", "20px").ok();
    style.set_property("left", "50%").ok();
    style.set_property("transform", "translateX(-50%)").ok();
    style.set_property("background", "rgba(0, 0, 0, 0.8)").ok();
    style.set_property("color", "#fff").ok();
    style.set_property("padding", "10px 20px").ok();
    style.set_property("border-radius", "4px").ok();
    style.set_property("z-index", "10000").ok();

    if body.append_child(&html_toast).is_ok() {
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(3000).await;
            if let Some(parent) = html_toast.parent_node() {
                parent.remove_child(&html_toast).ok();
            }
        });
    }
}
