//! Form Commands
//!
//! AJAX submission of whole forms.

use web_sys::FormData;

use super::{request, Body};
use crate::error::ApiError;
use crate::models::Feedback;

/// Submit `form_data` as multipart and decode the `{feedback, category}`
/// reply. A reply that is not JSON yields empty feedback.
pub async fn submit_form(url: &str, method: &str, form_data: FormData) -> Result<Feedback, ApiError> {
    let method = body_method(method);
    let body = request(&method, url, Some(Body::Multipart(form_data))).await?;
    Ok(serde_json::from_str(&body).unwrap_or_default())
}

/// Method for a request with a body: GET (the HTML default) becomes POST.
pub fn body_method(method: &str) -> String {
    match method.trim().to_ascii_uppercase().as_str() {
        "" | "GET" => "POST".to_string(),
        other => other.to_string(),
    }
}

/// A form is empty when every field other than `csrf_token` is blank.
pub fn is_form_data_empty<I, K, V>(entries: I) -> bool
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    entries
        .into_iter()
        .filter(|(key, _)| key.as_ref() != "csrf_token")
        .all(|(_, value)| value.as_ref().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_method() {
        assert_eq!(body_method("get"), "POST");
        assert_eq!(body_method(""), "POST");
        assert_eq!(body_method("post"), "POST");
        assert_eq!(body_method("put"), "PUT");
    }

    #[test]
    fn test_only_csrf_is_empty() {
        assert!(is_form_data_empty([("csrf_token", "abc")]));
        assert!(is_form_data_empty([("csrf_token", "abc"), ("title", "")]));
        assert!(is_form_data_empty(Vec::<(String, String)>::new()));
    }

    #[test]
    fn test_any_value_is_not_empty() {
        assert!(!is_form_data_empty([("csrf_token", ""), ("title", "Linnunrata")]));
    }
}
