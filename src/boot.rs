//! Page Bootstrap
//!
//! Finds the mount points in server-rendered markup and attaches widgets.
//! A mount point that fails to attach is logged and reported with a toast;
//! its markup is left as the server rendered it.

use leptos::mount::mount_to;
use leptos::prelude::*;
use leptos_fieldset::{
    DynamicFieldSet, FieldSet, FieldSetError, FieldTemplate, FieldValue, InputKind, RawInput,
    RemovePolicy,
};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement, HtmlSelectElement};

use crate::commands::{DEFAULT_REMOVE_URL, DEFAULT_SAVE_URL};
use crate::components::{ImageUpload, RemoteSelect, SelectConfig, ToastHost};
use crate::config::parse_item_id;
use crate::context::AppContext;
use crate::dom;
use crate::enhance;
use crate::error::BootError;
use crate::models::{SelectOption, ToastCategory};

/// Attach every widget the page asks for.
pub fn attach_all(ctx: AppContext) {
    mount_to_body(move || {
        provide_context(ctx);
        view! { <ToastHost /> }
    });

    // Field sets first: they re-render their inputs.
    attach_each(ctx, "div[data-toggle=fieldset]", "Kenttäryhmää", attach_fieldset);
    attach_each(ctx, "select[data-search]", "Valintakenttää", attach_select);
    attach_each(ctx, "[data-image-upload]", "Kuvan latausta", attach_image_upload);

    enhance::attach_ajax_forms(ctx);
    enhance::attach_pubseries(ctx);
    enhance::attach_person_lists();
    enhance::attach_person_names();
    enhance::attach_edit_toggle();
}

fn attach_each(
    ctx: AppContext,
    selector: &str,
    what: &str,
    attach: fn(AppContext, &Element) -> Result<(), BootError>,
) {
    let found = dom::query_all(selector);
    log::debug!("{}: {} mount point(s)", selector, found.len());
    for el in found {
        if let Err(err) = attach(ctx, &el) {
            log::error!("attaching {} failed: {}", dom::describe(&el), err);
            ctx.toast(
                format!("{} ei voitu alustaa: {}", what, err),
                ToastCategory::Danger,
            );
        }
    }
}

// ========================
// Field sets
// ========================

fn attach_fieldset(ctx: AppContext, container: &Element) -> Result<(), BootError> {
    let add_button = dom::query_all_in(container, "[data-toggle=fieldset-add-row]")
        .into_iter()
        .next();

    let target = match &add_button {
        Some(button) => {
            let selector = dom::data(button, "target").ok_or_else(|| BootError::MissingAttribute {
                element: dom::describe(button),
                attribute: "data-target".into(),
            })?;
            dom::query_one(&selector).ok_or(FieldSetError::MissingTarget(selector))?
        }
        None => container.clone(),
    };

    let rows = dom::query_all_in(&target, "[data-toggle=fieldset-entry]");
    let raw: Vec<Vec<RawInput>> = rows
        .iter()
        .map(|row| {
            dom::query_all_in(row, "input, select, textarea")
                .iter()
                .filter_map(scan_input)
                .collect()
        })
        .collect();

    let policy = if dom::data_flag(container, "renumber") {
        RemovePolicy::Renumber
    } else {
        RemovePolicy::KeepGaps
    };
    let set = FieldSet::from_raw(&dom::describe(&target), raw, policy)?;

    let add_label = add_button
        .as_ref()
        .and_then(button_text)
        .unwrap_or_else(|| "Lisää".to_string());
    let remove_label = dom::query_all_in(&target, "[data-toggle=fieldset-remove-row]")
        .first()
        .and_then(button_text)
        .unwrap_or_else(|| "Poista".to_string());

    let host = dom::create_host("fieldset-host")?;
    swap_in(
        || target.append_child(&host).map(drop).map_err(BootError::dom),
        || {
            for row in &rows {
                row.remove();
            }
            if let Some(button) = &add_button {
                button.remove();
            }
        },
    )?;

    log::info!(
        "field set {} attached with {} entries ({:?})",
        set.prefix(),
        set.len(),
        policy
    );
    let on_error = Callback::new(move |err: FieldSetError| {
        ctx.toast(err.to_string(), ToastCategory::Danger);
    });
    mount_to(host, move || {
        provide_context(ctx);
        view! {
            <DynamicFieldSet
                set=set
                add_label=add_label
                remove_label=remove_label
                on_error=on_error
            />
        }
    })
    .forget();
    Ok(())
}

/// Run `insert`, and only once it succeeded `remove_old`, so a failed
/// insert leaves the server markup in place.
fn swap_in<E>(
    insert: impl FnOnce() -> Result<(), E>,
    remove_old: impl FnOnce(),
) -> Result<(), E> {
    insert()?;
    remove_old();
    Ok(())
}

fn button_text(button: &Element) -> Option<String> {
    button
        .text_content()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Describe one control of a server-rendered entry.
fn scan_input(el: &Element) -> Option<RawInput> {
    let kind = InputKind::classify(&el.tag_name(), el.get_attribute("type").as_deref())?;
    let id = el
        .get_attribute("id")
        .filter(|id| !id.is_empty())
        .or_else(|| el.get_attribute("name"))?;

    let value = if kind.is_checkable() {
        FieldValue::Checked(el.dyn_ref::<HtmlInputElement>().is_some_and(|i| i.checked()))
    } else {
        FieldValue::Text(dom::element_value(el).unwrap_or_default())
    };

    let mut template = FieldTemplate::new(String::new(), kind.clone());
    template.label = dom::label_for(&id);
    template.class = el.get_attribute("class");
    template.placeholder = el.get_attribute("placeholder");
    template.required = el.has_attribute("required");
    if kind.is_checkable() {
        template.check_value = el.get_attribute("value");
    }
    if kind == InputKind::Select {
        template.options = dom::select_options(el);
    }

    Some(RawInput { id, template, value })
}

// ========================
// Remote selects
// ========================

fn attach_select(ctx: AppContext, el: &Element) -> Result<(), BootError> {
    let native: HtmlSelectElement = el
        .clone()
        .dyn_into()
        .map_err(|_| BootError::Dom(format!("{} is not a select", dom::describe(el))))?;

    let native_id = if native.id().is_empty() {
        let generated = format!(
            "remote-select-{}",
            dom::query_all("[id^=remote-select-]").len()
        );
        native.set_id(&generated);
        generated
    } else {
        native.id()
    };

    let config = SelectConfig::from_element(el, native_id);
    let initial: Vec<SelectOption> = dom::selected_options(&native)
        .into_iter()
        .map(|(value, text)| SelectOption::new(value, text))
        .collect();

    let host = dom::create_host("remote-select-host")?;
    el.after_with_node_1(&host).map_err(BootError::dom)?;
    dom::set_display(el, "none");

    log::info!("remote select {} attached", config.name);
    mount_to(host, move || {
        provide_context(ctx);
        view! { <RemoteSelect config=config initial=initial /> }
    })
    .forget();
    Ok(())
}

// ========================
// Image upload
// ========================

fn attach_image_upload(ctx: AppContext, el: &Element) -> Result<(), BootError> {
    let person_id = dom::data(el, "person-id")
        .and_then(|raw| parse_item_id(&raw))
        .or_else(|| ctx.item_id())
        .ok_or_else(|| BootError::MissingAttribute {
            element: dom::describe(el),
            attribute: "data-person-id".into(),
        })?;
    let save_url = dom::data(el, "save").unwrap_or_else(|| DEFAULT_SAVE_URL.to_string());
    let remove_url = dom::data(el, "remove").unwrap_or_else(|| DEFAULT_REMOVE_URL.to_string());
    let has_image = dom::data_flag(el, "has-image");

    let host = dom::create_host("image-upload-host")?;
    el.append_child(&host).map_err(BootError::dom)?;

    mount_to(host, move || {
        provide_context(ctx);
        view! {
            <ImageUpload
                person_id=person_id
                save_url=save_url
                remove_url=remove_url
                has_image=has_image
            />
        }
    })
    .forget();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_in_keeps_old_markup_on_failure() {
        let mut removed = false;
        let result = swap_in(|| Err(BootError::Dom("append".into())), || removed = true);
        assert!(result.is_err());
        assert!(!removed);

        let result = swap_in(|| Ok::<(), BootError>(()), || removed = true);
        assert!(result.is_ok());
        assert!(removed);
    }
}
