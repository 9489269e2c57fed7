//! Publication Series Refresh
//!
//! Changing `#publisher` reloads the choices of `#pubseries`.

use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlSelectElement};

use super::listen;
use crate::commands;
use crate::context::{AppContext, REQUEST_FAILED};
use crate::dom;
use crate::models::ToastCategory;

pub fn attach_pubseries(ctx: AppContext) {
    let (Some(publisher), Some(_)) = (dom::by_id("publisher"), dom::by_id("pubseries")) else {
        return;
    };
    listen(&publisher, "change", move |_ev: Event| update_pubseries(ctx));
}

pub fn update_pubseries(ctx: AppContext) {
    let Some(name) = dom::by_id("publisher").and_then(|el| dom::element_value(&el)) else {
        return;
    };
    spawn_local(async move {
        let rows = match commands::list_pubseries(&name).await {
            Ok(rows) => rows,
            Err(err) => {
                log::error!("listing series of {} failed: {}", name, err);
                ctx.toast(REQUEST_FAILED, ToastCategory::Danger);
                return;
            }
        };
        let Some(select) = dom::by_id("pubseries").and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        else {
            return;
        };
        log::debug!("{} series for {}", rows.len(), name);
        dom::replace_options(&select, &commands::pubseries_options(rows));
    });
}
