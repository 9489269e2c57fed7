//! Server Command Wrappers
//!
//! Frontend bindings to the catalog server endpoints, organized by domain.

mod forms;
mod image;
mod pubseries;
mod select;

use std::sync::OnceLock;

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Request, RequestInit, RequestMode, Response, UrlSearchParams};

use crate::error::ApiError;

// Re-export all public items
pub use forms::*;
pub use image::*;
pub use pubseries::*;
pub use select::*;

static CSRF_TOKEN: OnceLock<String> = OnceLock::new();

/// Remember the CSRF token sent with every non-GET request
pub fn set_csrf_token(token: Option<String>) {
    if let Some(token) = token {
        let _ = CSRF_TOKEN.set(token);
    }
}

/// Request body
pub enum Body {
    /// `application/x-www-form-urlencoded` pairs
    Form(Vec<(String, String)>),
    /// `multipart/form-data`, boundary chosen by the browser
    Multipart(FormData),
}

/// Send a same-origin request and return the response text.
///
/// Non-2xx answers become [`ApiError::Status`] with the body kept for the log.
async fn request(method: &str, url: &str, body: Option<Body>) -> Result<String, ApiError> {
    let window = web_sys::window().ok_or(ApiError::NoWindow)?;

    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::SameOrigin);

    let mut content_type = None;
    match body {
        Some(Body::Form(pairs)) => {
            let params = UrlSearchParams::new().map_err(ApiError::js)?;
            for (key, value) in &pairs {
                params.append(key, value);
            }
            let encoded: String = params.to_string().into();
            opts.set_body(&JsValue::from_str(&encoded));
            content_type = Some("application/x-www-form-urlencoded; charset=UTF-8");
        }
        Some(Body::Multipart(form)) => opts.set_body(&form),
        None => {}
    }

    let request = Request::new_with_str_and_init(url, &opts).map_err(ApiError::js)?;
    let headers = request.headers();
    headers
        .set("X-Requested-With", "XMLHttpRequest")
        .map_err(ApiError::js)?;
    if let Some(ct) = content_type {
        headers.set("Content-Type", ct).map_err(ApiError::js)?;
    }
    if !method.eq_ignore_ascii_case("GET") {
        if let Some(token) = CSRF_TOKEN.get() {
            headers.set("X-CSRFToken", token).map_err(ApiError::js)?;
        }
    }

    log::debug!("{} {}", method, url);
    let value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(ApiError::js)?;
    let response: Response = value
        .dyn_into()
        .map_err(|_| ApiError::Network("fetch did not return a Response".into()))?;

    let text = JsFuture::from(response.text().map_err(ApiError::js)?)
        .await
        .map_err(ApiError::js)?
        .as_string()
        .unwrap_or_default();

    if !response.ok() {
        return Err(ApiError::Status {
            status: response.status(),
            body: text,
        });
    }
    Ok(text)
}

async fn get(url: &str) -> Result<String, ApiError> {
    request("GET", url, None).await
}

async fn post(url: &str, body: Body) -> Result<String, ApiError> {
    request("POST", url, Some(body)).await
}
