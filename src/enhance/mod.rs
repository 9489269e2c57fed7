//! Markup Enhancements
//!
//! Event listeners and text rewrites applied to server-rendered elements
//! that are not replaced by a component.

mod edit_toggle;
mod forms;
mod person_links;
mod pubseries;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::JsCast;
use web_sys::EventTarget;

pub use edit_toggle::attach_edit_toggle;
pub use forms::attach_ajax_forms;
pub use person_links::{attach_person_lists, attach_person_names};
pub use pubseries::attach_pubseries;

/// Attach a listener for the lifetime of the page
fn listen<E, F>(target: &EventTarget, event: &str, handler: F)
where
    E: FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    if let Err(err) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
        log::warn!("binding {} failed: {}", event, crate::error::js_message(&err));
    }
    closure.forget();
}
