//! DOM Helpers
//!
//! Thin wrappers over `web_sys` lookups used by the page bootstrap.

use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, HtmlInputElement, HtmlOptionElement, HtmlSelectElement,
    HtmlTextAreaElement,
};

use crate::error::BootError;

pub fn document() -> Option<Document> {
    web_sys::window().and_then(|w| w.document())
}

/// All elements matching `selector`, in document order.
pub fn query_all(selector: &str) -> Vec<Element> {
    document()
        .and_then(|doc| doc.query_selector_all(selector).ok())
        .map(|list| collect_nodes(&list))
        .unwrap_or_default()
}

/// All descendants of `root` matching `selector`.
pub fn query_all_in(root: &Element, selector: &str) -> Vec<Element> {
    root.query_selector_all(selector)
        .map(|list| collect_nodes(&list))
        .unwrap_or_default()
}

fn collect_nodes(list: &web_sys::NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn query_one(selector: &str) -> Option<Element> {
    document().and_then(|doc| doc.query_selector(selector).ok().flatten())
}

pub fn by_id(id: &str) -> Option<Element> {
    document().and_then(|doc| doc.get_element_by_id(id))
}

/// `content` of `<meta name="..">`.
pub fn meta_content(name: &str) -> Option<String> {
    query_one(&format!("meta[name='{}']", name)).and_then(|m| m.get_attribute("content"))
}

/// `data-<name>` of `<body>`.
pub fn body_data(name: &str) -> Option<String> {
    document()
        .and_then(|doc| doc.body())
        .and_then(|body| body.get_attribute(&format!("data-{}", name)))
}

/// Non-empty `data-<name>` attribute.
pub fn data(el: &Element, name: &str) -> Option<String> {
    el.get_attribute(&format!("data-{}", name))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Truthy `data-<name>`: present and not `false`/`0`.
pub fn data_flag(el: &Element, name: &str) -> bool {
    data(el, name).is_some_and(|v| is_truthy(&v))
}

pub fn is_truthy(raw: &str) -> bool {
    !matches!(raw.trim().to_ascii_lowercase().as_str(), "" | "false" | "0" | "no")
}

/// Text of the `<label for=id>` pointing at `id`.
pub fn label_for(id: &str) -> Option<String> {
    query_one(&format!("label[for='{}']", id))
        .and_then(|l| l.text_content())
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Create a `<div>` to mount a widget into.
pub fn create_host(class: &str) -> Result<HtmlElement, BootError> {
    let doc = document().ok_or_else(|| BootError::MissingElement("document".into()))?;
    let host = doc.create_element("div").map_err(BootError::dom)?;
    host.set_class_name(class);
    host.dyn_into::<HtmlElement>()
        .map_err(|_| BootError::Dom("created element is not an HtmlElement".into()))
}

/// Set `display` of an element.
pub fn set_display(el: &Element, value: &str) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let _ = html.style().set_property("display", value);
    }
}

/// Current value of an input, select or textarea.
pub fn element_value(el: &Element) -> Option<String> {
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        Some(input.value())
    } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
        Some(select.value())
    } else {
        el.dyn_ref::<HtmlTextAreaElement>().map(|t| t.value())
    }
}

/// `(value, text)` of every option of a select.
pub fn select_options(el: &Element) -> Vec<(String, String)> {
    query_all_in(el, "option")
        .into_iter()
        .filter_map(|o| o.dyn_into::<HtmlOptionElement>().ok())
        .map(|o| (o.value(), o.text()))
        .collect()
}

/// `(value, text)` of the selected, non-empty options of a select.
pub fn selected_options(select: &HtmlSelectElement) -> Vec<(String, String)> {
    let list = select.selected_options();
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|o| o.dyn_into::<HtmlOptionElement>().ok())
        .map(|o| (o.value(), o.text()))
        .filter(|(value, _)| !value.is_empty())
        .collect()
}

/// Replace all options of a select.
pub fn replace_options(select: &HtmlSelectElement, options: &[(String, String)]) {
    select.set_inner_html("");
    for (value, text) in options {
        match HtmlOptionElement::new_with_text_and_value(text, value) {
            Ok(option) => {
                if let Err(err) = select.add_with_html_option_element(&option) {
                    log::warn!("adding option {}: {}", value, crate::error::js_message(&err));
                }
            }
            Err(err) => log::warn!("creating option {}: {}", value, crate::error::js_message(&err)),
        }
    }
}

/// Reload the current page.
pub fn reload() {
    if let Some(window) = web_sys::window() {
        if let Err(err) = window.location().reload() {
            log::error!("reload failed: {}", crate::error::js_message(&err));
        }
    }
}

/// Human-readable name of an element for log lines.
pub fn describe(el: &Element) -> String {
    let id = el.id();
    if id.is_empty() {
        el.tag_name().to_ascii_lowercase()
    } else {
        format!("{}#{}", el.tag_name().to_ascii_lowercase(), id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_truthy() {
        assert!(is_truthy("true"));
        assert!(is_truthy("1"));
        assert!(is_truthy("tags"));
        assert!(!is_truthy("False"));
        assert!(!is_truthy("0"));
        assert!(!is_truthy(" "));
    }
}
