//! AJAX Forms
//!
//! `form[data-ajax]` is submitted in the background; the server's
//! `{feedback, category}` reply is shown as a toast.

use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use web_sys::{FormData, HtmlFormElement, SubmitEvent};

use super::listen;
use crate::commands;
use crate::context::{AppContext, REQUEST_FAILED};
use crate::dom;
use crate::error::js_message;
use crate::models::ToastCategory;

/// Who handles a submit event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRoute {
    /// Sent in the background
    Ajax,
    /// Left to the browser
    Native,
}

/// Only forms that are valid and have something filled in go over AJAX.
pub fn submit_route(valid: bool, empty: bool) -> SubmitRoute {
    if valid && !empty {
        SubmitRoute::Ajax
    } else {
        SubmitRoute::Native
    }
}

pub fn attach_ajax_forms(ctx: AppContext) {
    for el in dom::query_all("form[data-ajax]") {
        let Ok(form) = el.dyn_into::<HtmlFormElement>() else {
            continue;
        };
        let target = form.clone();
        listen(&form, "submit", move |ev: SubmitEvent| send_form(ctx, &target, &ev));
    }
}

/// Submit `form` over AJAX when it is valid and not empty.
///
/// Anything else keeps the browser's default handling: invalid fields get
/// the validation bubbles, an empty form is posted normally.
pub fn send_form(ctx: AppContext, form: &HtmlFormElement, ev: &SubmitEvent) {
    let valid = form.check_validity();
    let form_data = if valid {
        match FormData::new_with_form(form) {
            Ok(data) => Some(data),
            Err(err) => {
                log::error!("reading form {} failed: {}", form.id(), js_message(&err));
                return;
            }
        }
    } else {
        None
    };
    let empty = form_data
        .as_ref()
        .map_or(true, |data| commands::is_form_data_empty(form_data_entries(data)));

    let (SubmitRoute::Ajax, Some(form_data)) = (submit_route(valid, empty), form_data) else {
        if !valid {
            form.report_validity();
        }
        log::debug!("form {} left to the browser (valid: {}, empty: {})", form.id(), valid, empty);
        return;
    };
    ev.prevent_default();

    let url = form.action();
    let method = form.method();
    spawn_local(async move {
        match commands::submit_form(&url, &method, form_data).await {
            Ok(feedback) => ctx.feedback(feedback),
            Err(err) => {
                log::error!("Virhe. Tarkista tiedot alta. {} {}: {}", method, url, err);
                ctx.toast(REQUEST_FAILED, ToastCategory::Danger);
            }
        }
    });
}

/// `(key, value)` pairs of a FormData; files count by their file name.
fn form_data_entries(data: &FormData) -> Vec<(String, String)> {
    let Ok(Some(iter)) = js_sys::try_iter(data) else {
        return Vec::new();
    };
    iter.filter_map(Result::ok)
        .filter_map(|entry| {
            let pair = js_sys::Array::from(&entry);
            let key = pair.get(0).as_string()?;
            let value = pair.get(1);
            let value = value.as_string().unwrap_or_else(|| {
                value
                    .dyn_into::<web_sys::File>()
                    .map(|f| f.name())
                    .unwrap_or_default()
            });
            Some((key, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_valid_filled_forms_go_over_ajax() {
        assert_eq!(submit_route(true, false), SubmitRoute::Ajax);
        assert_eq!(submit_route(true, true), SubmitRoute::Native);
        assert_eq!(submit_route(false, false), SubmitRoute::Native);
        assert_eq!(submit_route(false, true), SubmitRoute::Native);
    }
}
