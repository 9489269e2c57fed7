//! Remote Select Commands
//!
//! Search, initial values and save endpoints of remote select widgets.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Serialize;

use super::{get, post, Body};
use crate::error::ApiError;
use crate::models::{Feedback, SearchResults, SelectOption};

// ========================
// Payloads
// ========================

#[derive(Serialize)]
struct SavedItem<'a> {
    id: &'a str,
    text: &'a str,
}

/// `<search>?q=<term>` (or `&q=` when the URL already has a query)
pub fn search_url(base: &str, term: &str) -> String {
    let sep = if base.contains('?') { '&' } else { '?' };
    format!("{}{}q={}", base, sep, utf8_percent_encode(term, NON_ALPHANUMERIC))
}

/// `<init>/<item id>`
pub fn init_url(base: &str, item_id: i64) -> String {
    format!("{}/{}", base.trim_end_matches('/'), item_id)
}

/// Form fields posted to a save endpoint: `items` and `itemId`, both JSON.
pub fn save_payload(item_id: i64, items: &[SelectOption]) -> Result<Vec<(String, String)>, ApiError> {
    let saved: Vec<SavedItem<'_>> = items
        .iter()
        .map(|o| SavedItem {
            id: &o.id,
            text: &o.text,
        })
        .collect();
    Ok(vec![
        ("items".to_string(), serde_json::to_string(&saved)?),
        ("itemId".to_string(), serde_json::to_string(&item_id)?),
    ])
}

/// Search replies are `{"results": [...]}`; anything else (the server sends
/// `[""]` for an empty term) means no results.
pub fn parse_search_results(body: &str) -> Vec<SelectOption> {
    serde_json::from_str::<SearchResults>(body)
        .map(|r| r.results)
        .unwrap_or_default()
}

/// Initial values are a JSON list of options, sometimes encoded twice
/// (a JSON string holding the list).
pub fn parse_initial_options(body: &str) -> Result<Vec<SelectOption>, ApiError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    let value: serde_json::Value = serde_json::from_str(trimmed)?;
    let value = match value {
        serde_json::Value::String(inner) => serde_json::from_str(&inner)?,
        other => other,
    };
    Ok(serde_json::from_value(value)?)
}

// ========================
// Commands
// ========================

pub async fn search_options(base: &str, term: &str) -> Result<Vec<SelectOption>, ApiError> {
    let body = get(&search_url(base, term)).await?;
    Ok(parse_search_results(&body))
}

pub async fn load_initial_options(base: &str, item_id: i64) -> Result<Vec<SelectOption>, ApiError> {
    let body = get(&init_url(base, item_id)).await?;
    parse_initial_options(&body)
}

pub async fn save_selection(
    url: &str,
    item_id: i64,
    items: &[SelectOption],
) -> Result<Feedback, ApiError> {
    let body = post(url, Body::Form(save_payload(item_id, items)?)).await?;
    Ok(serde_json::from_str(&body).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_encodes_term() {
        assert_eq!(search_url("/select_person", "Ä b"), "/select_person?q=%C3%84%20b");
        assert_eq!(search_url("/select?type=1", "abc"), "/select?type=1&q=abc");
    }

    #[test]
    fn test_init_url() {
        assert_eq!(init_url("/tags_for_person", 5), "/tags_for_person/5");
        assert_eq!(init_url("/tags_for_person/", 5), "/tags_for_person/5");
    }

    #[test]
    fn test_save_payload() {
        let items = vec![SelectOption::new("3", "Scifi"), SelectOption::new("0", "uusi")];
        let payload = save_payload(17, &items).unwrap();
        assert_eq!(payload[0].0, "items");
        assert_eq!(
            payload[0].1,
            r#"[{"id":"3","text":"Scifi"},{"id":"0","text":"uusi"}]"#
        );
        assert_eq!(payload[1], ("itemId".to_string(), "17".to_string()));
    }

    #[test]
    fn test_parse_search_results() {
        let body = r#"{"results": [{"id": "1", "text": "Waltari, Mika"}]}"#;
        assert_eq!(
            parse_search_results(body),
            vec![SelectOption::new("1", "Waltari, Mika")]
        );
        assert!(parse_search_results(r#"[""]"#).is_empty());
        assert!(parse_search_results("not json").is_empty());
    }

    #[test]
    fn test_parse_initial_options() {
        let plain = r#"[{"id": 4, "text": "englanti"}]"#;
        assert_eq!(
            parse_initial_options(plain).unwrap(),
            vec![SelectOption::new("4", "englanti")]
        );

        let double = serde_json::to_string(plain).unwrap();
        assert_eq!(
            parse_initial_options(&double).unwrap(),
            vec![SelectOption::new("4", "englanti")]
        );

        assert!(parse_initial_options("").unwrap().is_empty());
        assert!(parse_initial_options("{").is_err());
    }
}
