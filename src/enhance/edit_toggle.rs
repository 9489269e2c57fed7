//! Edit / View Toggle
//!
//! Admins switch a page between its read-only `.view-field` elements and the
//! `.edit-field` form controls with the `#edit_form` checkbox.

use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlInputElement};

use super::listen;
use crate::dom;

/// Which set of fields is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMode {
    View,
    Edit,
}

impl PageMode {
    /// `display` values for (view fields, edit fields)
    pub fn displays(self) -> (&'static str, &'static str) {
        match self {
            Self::View => ("block", "none"),
            Self::Edit => ("none", "block"),
        }
    }
}

pub fn attach_edit_toggle() {
    for el in dom::query_all(".edit-field") {
        dom::set_display(&el, "none");
    }

    let Some(toggle) = dom::by_id("edit_form").and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    else {
        return;
    };
    toggle.set_checked(false);
    let _ = toggle.remove_attribute("checked");

    let source = toggle.clone();
    listen(&toggle, "change", move |_ev: Event| {
        if source.checked() {
            apply_mode(PageMode::Edit);
        } else {
            // Leaving edit mode drops unsaved edits by reloading.
            dom::reload();
        }
    });
}

fn apply_mode(mode: PageMode) {
    let (view, edit) = mode.displays();
    for el in dom::query_all(".view-field") {
        dom::set_display(&el, view);
    }
    for el in dom::query_all(".edit-field") {
        dom::set_display(&el, edit);
    }
    log::debug!("page mode {:?}", mode);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_displays() {
        assert_eq!(PageMode::Edit.displays(), ("none", "block"));
        assert_eq!(PageMode::View.displays(), ("block", "none"));
    }
}
