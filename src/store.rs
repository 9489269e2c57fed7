//! UI State Store
//!
//! Uses Leptos reactive_stores for the state shared by all widgets.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{Toast, ToastCategory};

/// State shared across every widget mounted on the page
#[derive(Clone, Debug, Default, Store)]
pub struct UiState {
    /// Toasts currently on screen, oldest first
    pub toasts: Vec<Toast>,
    /// Id handed to the next toast
    pub next_toast_id: u32,
}

/// Type alias for the store
pub type UiStore = Store<UiState>;

// ========================
// Store Helper Functions
// ========================

/// Add a toast and return its id
pub fn store_push_toast(store: &UiStore, message: String, category: ToastCategory) -> u32 {
    let id = store.next_toast_id().get_untracked();
    store.next_toast_id().set(id.wrapping_add(1));
    store.toasts().write().push(Toast { id, message, category });
    id
}

/// Remove a toast by ID
pub fn store_dismiss_toast(store: &UiStore, toast_id: u32) {
    store.toasts().write().retain(|toast| toast.id != toast_id);
}
