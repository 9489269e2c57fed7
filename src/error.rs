//! Frontend Errors

use leptos_fieldset::FieldSetError;
use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failure of a request to the catalog server.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("no browser window available")]
    NoWindow,

    #[error("request failed: {0}")]
    Network(String),

    #[error("server answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn js(value: JsValue) -> Self {
        Self::Network(js_message(&value))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Failure while attaching a widget to server-rendered markup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BootError {
    #[error(transparent)]
    FieldSet(#[from] FieldSetError),

    #[error("DOM operation failed: {0}")]
    Dom(String),

    #[error("element `{0}` is missing")]
    MissingElement(String),

    #[error("`{element}` needs attribute `{attribute}`")]
    MissingAttribute { element: String, attribute: String },
}

impl BootError {
    pub fn dom(value: JsValue) -> Self {
        Self::Dom(js_message(&value))
    }
}

/// Best-effort text of a thrown JS value.
pub fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
