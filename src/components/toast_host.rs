//! Toast Host Component
//!
//! Fixed-position stack of toasts pushed through [`AppContext::toast`].
//!
//! [`AppContext::toast`]: crate::context::AppContext::toast

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::store::UiStateStoreFields;

#[component]
pub fn ToastHost() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="toast-container" aria-live="polite">
            <For
                each=move || ctx.store.toasts().get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div
                            class=toast.category.css_class()
                            role="alert"
                            title="Sulje"
                            on:click=move |_| ctx.dismiss(id)
                        >
                            {toast.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
