//! DynamicFieldSet Component

use leptos::prelude::*;

use crate::{FieldId, FieldSet, FieldSetError, FieldTemplate, FieldValue, InputKind, Removal};

/// Renders a [`FieldSet`] with one remove button per entry and an add button
/// below the entries.
///
/// The markup keeps the `data-toggle` roles of the server templates so
/// existing stylesheets still apply.
#[component]
pub fn DynamicFieldSet(
    set: FieldSet,
    #[prop(into, default = "Lisää".to_string())] add_label: String,
    #[prop(into, default = "Poista".to_string())] remove_label: String,
    #[prop(optional)] on_error: Option<Callback<FieldSetError>>,
) -> impl IntoView {
    let set = RwSignal::new(set);
    let report = move |err: FieldSetError| {
        log::warn!("field set: {}", err);
        if let Some(cb) = on_error {
            cb.run(err);
        }
    };

    let on_add = move |_ev: web_sys::MouseEvent| {
        let mut outcome = None;
        set.update(|s| outcome = Some(s.add_entry()));
        if let Some(Err(err)) = outcome {
            report(err);
        }
    };

    view! {
        <div class="fieldset-entries">
            <For
                each=move || set.with(|s| s.indices())
                key=|index| *index
                children=move |index| {
                    let remove_label = remove_label.clone();
                    let on_remove = move |_ev: web_sys::MouseEvent| {
                        let mut outcome = None;
                        set.update(|s| outcome = Some(s.remove_entry(index)));
                        match outcome {
                            Some(Ok(Removal::Cleared)) => {
                                log::info!("field set: last entry cleared instead of removed");
                            }
                            Some(Err(err)) => report(err),
                            _ => {}
                        }
                    };
                    let (prefix, templates) =
                        set.with_untracked(|s| (s.prefix().to_string(), s.templates().to_vec()));
                    view! {
                        <div class="fieldset-entry" data-toggle="fieldset-entry" data-id=index.to_string()>
                            {templates
                                .into_iter()
                                .enumerate()
                                .map(|(pos, template)| {
                                    let id = FieldId::new(prefix.clone(), index, template.name.clone());
                                    field_view(set, index, pos, id.to_string(), template)
                                })
                                .collect_view()}
                            <button
                                type="button"
                                class="btn fieldset-remove"
                                data-toggle="fieldset-remove-row"
                                on:click=on_remove
                            >
                                {remove_label}
                            </button>
                        </div>
                    }
                }
            />
            <button
                type="button"
                class="btn fieldset-add"
                data-toggle="fieldset-add-row"
                on:click=on_add
            >
                {add_label}
            </button>
        </div>
    }
}

fn field_view(
    set: RwSignal<FieldSet>,
    index: usize,
    pos: usize,
    id: String,
    template: FieldTemplate,
) -> AnyView {
    let text = move || {
        set.with(|s| s.value(index, pos).map(|v| v.as_text().to_string()))
            .unwrap_or_default()
    };
    let checked = move || set.with(|s| s.value(index, pos).is_some_and(FieldValue::is_checked));
    let write = move |value: FieldValue| {
        set.update(|s| {
            // The entry may have been removed between render and event.
            let _ = s.set_value(index, pos, value);
        });
    };

    let label = template.label.clone().map(|text| {
        let for_id = id.clone();
        view! { <label for=for_id>{text}</label> }
    });
    let FieldTemplate {
        kind,
        class,
        placeholder,
        required,
        check_value,
        options,
        ..
    } = template;

    let check_type = if kind == InputKind::Radio { "radio" } else { "checkbox" };
    let control = match kind {
        InputKind::Text(ty) => view! {
            <input
                type=ty
                id=id.clone()
                name=id
                class=class
                placeholder=placeholder
                required=required
                prop:value=text
                on:input=move |ev| write(FieldValue::Text(event_target_value(&ev)))
            />
        }
        .into_any(),
        InputKind::Hidden => view! {
            <input type="hidden" id=id.clone() name=id prop:value=text />
        }
        .into_any(),
        InputKind::Checkbox | InputKind::Radio => {
            view! {
                <input
                    type=check_type
                    id=id.clone()
                    name=id
                    class=class
                    value=check_value
                    prop:checked=checked
                    on:change=move |ev| write(FieldValue::Checked(event_target_checked(&ev)))
                />
            }
            .into_any()
        }
        InputKind::TextArea => view! {
            <textarea
                id=id.clone()
                name=id
                class=class
                placeholder=placeholder
                required=required
                prop:value=text
                on:input=move |ev| write(FieldValue::Text(event_target_value(&ev)))
            ></textarea>
        }
        .into_any(),
        InputKind::Select => view! {
            <select
                id=id.clone()
                name=id
                class=class
                required=required
                on:change=move |ev| write(FieldValue::Text(event_target_value(&ev)))
            >
                {options
                    .into_iter()
                    .map(|(value, label)| {
                        let current = value.clone();
                        view! {
                            <option value=value prop:selected=move || text() == current>
                                {label}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        }
        .into_any(),
    };

    view! {
        <div class="fieldset-field">
            {label}
            {control}
        </div>
    }
    .into_any()
}
