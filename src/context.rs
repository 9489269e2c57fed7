//! Application Context
//!
//! Shared state provided via Leptos Context API to every mounted widget.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::config::PageConfig;
use crate::models::{Feedback, ToastCategory};
use crate::store::{store_dismiss_toast, store_push_toast, UiStore};

/// Toasts disappear after this many milliseconds
pub const TOAST_LIFETIME_MS: u32 = 4_000;

/// Message shown when the server answers with empty feedback
pub const EMPTY_FEEDBACK: &str = "Tyhjä paluuarvo.";

/// Generic error message for failed requests
pub const REQUEST_FAILED: &str = "Virhe";

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    config: StoredValue<PageConfig>,
    /// Toasts and other shared UI state
    pub store: UiStore,
}

impl AppContext {
    pub fn new(config: PageConfig, store: UiStore) -> Self {
        Self {
            config: StoredValue::new(config),
            store,
        }
    }

    /// Id of the entity being edited on this page
    pub fn item_id(&self) -> Option<i64> {
        self.config.with_value(|c| c.item_id)
    }

    /// Show a toast; it is removed after [`TOAST_LIFETIME_MS`]
    pub fn toast(&self, message: impl Into<String>, category: ToastCategory) {
        let store = self.store;
        let id = store_push_toast(&store, message.into(), category);
        spawn_local(async move {
            TimeoutFuture::new(TOAST_LIFETIME_MS).await;
            store_dismiss_toast(&store, id);
        });
    }

    /// Toast a save/submit reply
    pub fn feedback(&self, feedback: Feedback) {
        let (message, category) = feedback_toast(&feedback);
        self.toast(message, category);
    }

    pub fn dismiss(&self, toast_id: u32) {
        store_dismiss_toast(&self.store, toast_id);
    }
}

/// Blank feedback becomes a "danger" toast about the empty reply.
pub fn feedback_toast(feedback: &Feedback) -> (String, ToastCategory) {
    if feedback.feedback.trim().is_empty() {
        (EMPTY_FEEDBACK.to_string(), ToastCategory::Danger)
    } else {
        (
            feedback.feedback.clone(),
            ToastCategory::parse(&feedback.category),
        )
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
