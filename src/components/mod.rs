//! UI Components
//!
//! Leptos components mounted into server-rendered pages.

mod image_upload;
mod remote_select;
mod toast_host;

pub use image_upload::ImageUpload;
pub use remote_select::{RemoteSelect, SelectConfig};
pub use toast_host::ToastHost;
