//! Remote Select Component
//!
//! Replaces a `<select data-search=..>` with a search box backed by the
//! server. Initial values are fetched for the edited item, and every change
//! made after that is saved right away. The native select stays in the form
//! (hidden) and mirrors the selection.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlOptionElement, HtmlSelectElement};

use crate::commands;
use crate::context::{use_app_context, REQUEST_FAILED};
use crate::dom;
use crate::models::{SelectOption, ToastCategory};
use crate::select::{
    create_tag, should_search, split_tokens, suggestions, Selection, WidgetState,
    MIN_INPUT_LENGTH, SEARCH_DELAY_MS,
};

/// Settings read from the `data-*` attributes of the native select
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectConfig {
    /// `data-name`, used in log lines
    pub name: String,
    pub search_url: Option<String>,
    pub init_url: Option<String>,
    pub save_url: Option<String>,
    pub placeholder: String,
    /// Free text may be added as new options
    pub tags: bool,
    /// CSS width of the widget
    pub width: String,
    pub multiple: bool,
    /// `id` of the native select kept in sync
    pub native_id: String,
}

impl SelectConfig {
    pub fn from_element(el: &Element, native_id: String) -> Self {
        Self {
            name: dom::data(el, "name")
                .or_else(|| el.get_attribute("name"))
                .unwrap_or_else(|| native_id.clone()),
            search_url: dom::data(el, "search"),
            init_url: dom::data(el, "init"),
            save_url: dom::data(el, "save"),
            placeholder: dom::data(el, "placeholder").unwrap_or_default(),
            tags: dom::data_flag(el, "tags"),
            width: resolve_width(dom::data(el, "width").as_deref()),
            multiple: el.has_attribute("multiple"),
            native_id,
        }
    }
}

/// `resolve` (the default) fills the container; anything else is used as is.
pub fn resolve_width(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        None | Some("") | Some("resolve") => "100%".to_string(),
        Some(width) => width.to_string(),
    }
}

/// Search-as-you-type select bound to the catalog server
#[component]
pub fn RemoteSelect(config: SelectConfig, initial: Vec<SelectOption>) -> impl IntoView {
    let ctx = use_app_context();

    let state = RwSignal::new(WidgetState::Loading);
    let selection = RwSignal::new({
        let mut sel = Selection::new(config.multiple);
        sel.merge(initial);
        sel
    });
    let query = RwSignal::new(String::new());
    let results = RwSignal::new(Vec::<SelectOption>::new());
    let highlighted = RwSignal::new(0usize);
    let searching = RwSignal::new(false);
    let generation = StoredValue::new(0u32);
    let width = format!("width: {}", config.width);
    let config = StoredValue::new(config);

    // Mirror the selection into the hidden native select
    let sync_native = move || {
        let id = config.with_value(|c| c.native_id.clone());
        selection.with_untracked(|s| sync_native_select(&id, s.items()));
    };

    // Save the current selection; ignored until initial values are in
    let save = move || {
        let name = config.with_value(|c| c.name.clone());
        if !state.get_untracked().accepts_saves() {
            log::debug!("[{}] change while loading, not saved", name);
            return;
        }
        let Some(url) = config.with_value(|c| c.save_url.clone()) else {
            return;
        };
        let Some(item_id) = ctx.item_id() else {
            log::warn!("[{}] no item id on page, selection not saved", name);
            return;
        };
        let items = selection.with_untracked(|s| s.items().to_vec());
        spawn_local(async move {
            match commands::save_selection(&url, item_id, &items).await {
                Ok(feedback) => ctx.feedback(feedback),
                Err(err) => {
                    log::error!("[{}] saving to {} failed: {}", name, url, err);
                    ctx.toast(REQUEST_FAILED, ToastCategory::Danger);
                }
            }
        });
    };

    let choose = move |option: SelectOption| {
        log::debug!("select: {} ({})", option.text, option.id);
        let changed = selection.try_update(|s| s.select(option)).unwrap_or(false);
        query.set(String::new());
        results.set(Vec::new());
        highlighted.set(0);
        if changed {
            sync_native();
            save();
        }
    };

    let unchoose = move |pos: usize| {
        if let Some(Some(option)) = selection.try_update(|s| s.unselect(pos)) {
            log::debug!("unselect: {} ({})", option.text, option.id);
            sync_native();
            save();
        }
    };

    // Initial population; the widget becomes Ready even if it fails
    match (config.with_value(|c| c.init_url.clone()), ctx.item_id()) {
        (Some(url), Some(item_id)) => spawn_local(async move {
            match commands::load_initial_options(&url, item_id).await {
                Ok(items) => {
                    selection.update(|s| s.merge(items));
                    sync_native();
                }
                Err(err) => log::error!("loading {} failed: {}", url, err),
            }
            state.set(WidgetState::Ready);
        }),
        _ => state.set(WidgetState::Ready),
    }

    // Debounced search; only the latest term's answer is shown
    let run_search = move |term: String| {
        generation.update_value(|g| *g = g.wrapping_add(1));
        let current = generation.get_value();
        let url = config.with_value(|c| c.search_url.clone());
        let Some(url) = url.filter(|_| should_search(&term)) else {
            results.set(Vec::new());
            searching.set(false);
            return;
        };
        searching.set(true);
        spawn_local(async move {
            TimeoutFuture::new(SEARCH_DELAY_MS).await;
            if generation.get_value() != current {
                return;
            }
            let found = commands::search_options(&url, term.trim()).await;
            if generation.get_value() != current {
                return;
            }
            searching.set(false);
            match found {
                Ok(list) => results.set(list),
                Err(err) => {
                    log::warn!("search {} failed: {}", url, err);
                    results.set(Vec::new());
                }
            }
            highlighted.set(0);
        });
    };

    let on_input = move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        let value = if config.with_value(|c| c.tags) {
            let (tokens, rest) = split_tokens(&value);
            for token in tokens {
                if let Some(tag) = create_tag(&token) {
                    choose(tag);
                }
            }
            rest
        } else {
            value
        };
        query.set(value.clone());
        run_search(value);
    };

    let offered = move || {
        let tags = config.with_value(|c| c.tags);
        results.with(|r| suggestions(r, &query.get(), tags))
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        let key = ev.key();
        match key.as_str() {
            "ArrowDown" => {
                ev.prevent_default();
                let len = offered().len();
                highlighted.update(|h| {
                    if *h + 1 < len {
                        *h += 1;
                    }
                });
            }
            "ArrowUp" => {
                ev.prevent_default();
                highlighted.update(|h| *h = h.saturating_sub(1));
            }
            "Enter" => {
                ev.prevent_default();
                let list = offered();
                if let Some(option) = list.get(highlighted.get_untracked()).cloned() {
                    choose(option);
                }
            }
            "Escape" => {
                query.set(String::new());
                results.set(Vec::new());
            }
            "Backspace" if query.with_untracked(String::is_empty) => {
                let len = selection.with_untracked(|s| s.items().len());
                if len > 0 {
                    unchoose(len - 1);
                }
            }
            _ => {}
        }
    };

    let hint = move || {
        let q = query.get();
        if searching.get() {
            Some("Haetaan…".to_string())
        } else if !q.trim().is_empty() && !should_search(&q) && !config.with_value(|c| c.tags) {
            Some(format!("Kirjoita vähintään {} merkkiä", MIN_INPUT_LENGTH))
        } else {
            None
        }
    };

    view! {
        <div class="remote-select" style=width>
            <div class="remote-select-selection">
                {move || {
                    selection.with(|s| {
                        s.items()
                            .iter()
                            .cloned()
                            .enumerate()
                            .map(|(pos, option)| {
                                view! {
                                    <span class=if option.new_tag { "remote-select-choice new" } else { "remote-select-choice" }>
                                        {option.text}
                                        <button
                                            type="button"
                                            class="remote-select-remove"
                                            on:click=move |ev| {
                                                ev.prevent_default();
                                                unchoose(pos);
                                            }
                                        >
                                            "×"
                                        </button>
                                    </span>
                                }
                            })
                            .collect_view()
                    })
                }}
                <input
                    type="search"
                    class="remote-select-search"
                    autocomplete="off"
                    placeholder=move || {
                        let empty = selection.with(|s| s.items().is_empty() || !s.is_multiple());
                        if empty { config.with_value(|c| c.placeholder.clone()) } else { String::new() }
                    }
                    prop:value=move || query.get()
                    on:input=on_input
                    on:keydown=on_keydown
                />
            </div>
            {move || hint().map(|text| view! { <div class="remote-select-hint">{text}</div> })}
            {move || {
                let list = offered();
                if list.is_empty() {
                    view! { <div></div> }.into_any()
                } else {
                    let selected = highlighted.get();
                    view! {
                        <div class="autocomplete-list">
                            {list.into_iter().enumerate().map(|(i, option)| {
                                let label = if option.new_tag {
                                    format!("{} (uusi)", option.text)
                                } else {
                                    option.text.clone()
                                };
                                view! {
                                    <button
                                        type="button"
                                        class=if i == selected { "autocomplete-item selected" } else { "autocomplete-item" }
                                        on:click=move |ev| {
                                            ev.prevent_default();
                                            choose(option.clone());
                                        }
                                    >
                                        {label}
                                    </button>
                                }
                            }).collect_view()}
                        </div>
                    }.into_any()
                }
            }}
        </div>
    }
}

/// Rebuild the options of the native select so form posts carry the choice.
fn sync_native_select(native_id: &str, items: &[SelectOption]) {
    let Some(select) = dom::by_id(native_id).and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
    else {
        return;
    };
    select.set_inner_html("");
    for item in items {
        match HtmlOptionElement::new_with_text_and_value_and_default_selected_and_selected(
            &item.text, &item.id, true, true,
        ) {
            Ok(option) => {
                if let Err(err) = select.add_with_html_option_element(&option) {
                    log::warn!("{}: {}", native_id, crate::error::js_message(&err));
                }
            }
            Err(err) => log::warn!("{}: {}", native_id, crate::error::js_message(&err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_width() {
        assert_eq!(resolve_width(None), "100%");
        assert_eq!(resolve_width(Some("resolve")), "100%");
        assert_eq!(resolve_width(Some(" 20em ")), "20em");
    }
}
