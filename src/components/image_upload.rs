//! Person Image Upload Component
//!
//! File picker with upload and remove buttons for a person's portrait.
//! The page is reloaded after a successful change so the new image shows.

use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::context::{use_app_context, REQUEST_FAILED};
use crate::dom;
use crate::models::ToastCategory;

#[component]
pub fn ImageUpload(
    person_id: i64,
    #[prop(into)] save_url: String,
    #[prop(into)] remove_url: String,
    has_image: bool,
) -> impl IntoView {
    let ctx = use_app_context();
    let file_input = NodeRef::<html::Input>::new();
    let busy = RwSignal::new(false);
    let urls = StoredValue::new((save_url, remove_url));

    let on_upload = move |_ev: web_sys::MouseEvent| {
        let Some(input) = file_input.get() else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            ctx.toast("Valitse ensin kuva.", ToastCategory::Warning);
            return;
        };
        if !commands::allowed_image(&file.name()) {
            ctx.toast("Vain jpg- ja png-kuvat ovat sallittuja.", ToastCategory::Warning);
            return;
        }
        let url = urls.with_value(|(save, _)| save.clone());
        busy.set(true);
        spawn_local(async move {
            match commands::upload_person_image(&url, person_id, &file).await {
                Ok(()) => dom::reload(),
                Err(err) => {
                    log::error!("image upload for person {} failed: {}", person_id, err);
                    ctx.toast(REQUEST_FAILED, ToastCategory::Danger);
                    busy.set(false);
                }
            }
        });
    };

    let on_remove = move |_ev: web_sys::MouseEvent| {
        let url = urls.with_value(|(_, remove)| remove.clone());
        busy.set(true);
        spawn_local(async move {
            match commands::remove_person_image(&url, person_id).await {
                Ok(()) => dom::reload(),
                Err(err) => {
                    log::error!("image removal for person {} failed: {}", person_id, err);
                    ctx.toast(REQUEST_FAILED, ToastCategory::Danger);
                    busy.set(false);
                }
            }
        });
    };

    view! {
        <div class="image-upload">
            <input type="file" accept=commands::image_accept() node_ref=file_input />
            <button type="button" class="btn" disabled=move || busy.get() on:click=on_upload>
                "Lataa kuva"
            </button>
            <Show when=move || has_image>
                <button type="button" class="btn btn-danger" disabled=move || busy.get() on:click=on_remove>
                    "Poista kuva"
                </button>
            </Show>
        </div>
    }
}
